//! Test doubles for the network and store ports

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::network::{DownloadedFile, NetworkClient, NetworkRequest};
use crate::store::{MemoryRecordStore, Predicate, Record, RecordStore};
use crate::{GeoDataError, Result};

enum Scripted {
    Body(String),
    Status(u16),
}

/// Network client answering from canned responses keyed by endpoint
#[derive(Default)]
pub(crate) struct ScriptedNetworkClient {
    responses: Mutex<HashMap<String, Scripted>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedNetworkClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_body(self, endpoint: &str, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Scripted::Body(body.to_string()));
        self
    }

    pub(crate) fn with_status(self, endpoint: &str, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Scripted::Status(status));
        self
    }

    /// Full URLs of every request seen so far
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn respond(&self, request: &NetworkRequest) -> Result<Vec<u8>> {
        self.requests
            .lock()
            .unwrap()
            .push(request.url().to_string());
        match self.responses.lock().unwrap().get(&request.endpoint()) {
            Some(Scripted::Body(body)) => Ok(body.as_bytes().to_vec()),
            Some(Scripted::Status(status)) => Err(GeoDataError::http(*status, "scripted")),
            None => Err(GeoDataError::network(format!(
                "no scripted response for {}",
                request.endpoint()
            ))),
        }
    }
}

#[async_trait]
impl NetworkClient for ScriptedNetworkClient {
    async fn fetch(&self, request: &NetworkRequest) -> Result<Vec<u8>> {
        self.respond(request)
    }

    async fn download(&self, request: &NetworkRequest) -> Result<DownloadedFile> {
        let body = self.respond(request)?;
        DownloadedFile::write(body).await
    }
}

/// Store whose deletes never signal completion
#[derive(Default)]
pub(crate) struct StalledStore {
    inner: MemoryRecordStore,
}

#[async_trait]
impl RecordStore for StalledStore {
    async fn insert(&self, collection: &str, records: Vec<Record>) -> Result<()> {
        self.inner.insert(collection, records).await
    }

    fn fetch(&self, collection: &str, predicate: &Predicate) -> Result<Vec<Record>> {
        self.inner.fetch(collection, predicate)
    }

    async fn delete_all(&self, _collection: &str) -> Result<()> {
        futures::future::pending::<()>().await;
        Ok(())
    }
}

/// Store that fails every operation
pub(crate) struct BrokenStore;

#[async_trait]
impl RecordStore for BrokenStore {
    async fn insert(&self, _collection: &str, _records: Vec<Record>) -> Result<()> {
        Err(GeoDataError::store("disk full"))
    }

    fn fetch(&self, _collection: &str, _predicate: &Predicate) -> Result<Vec<Record>> {
        Err(GeoDataError::store("corrupted"))
    }

    async fn delete_all(&self, _collection: &str) -> Result<()> {
        Err(GeoDataError::store("read-only"))
    }
}
