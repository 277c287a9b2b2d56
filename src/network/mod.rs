//! Network client port
//!
//! Repositories never talk to HTTP directly. They build a [`NetworkRequest`]
//! and hand it to a [`NetworkClient`], which either returns the body
//! ([`NetworkClient::fetch`], decoded on arrival by [`perform`]) or writes
//! it to a temporary file ([`NetworkClient::download`]).

pub mod reqwest_client;

use std::path::Path;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tempfile::{NamedTempFile, TempPath};
use tokio::task;

use crate::{GeoDataError, Result};

pub use reqwest_client::ReqwestNetworkClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// A validated request against one of the data endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRequest {
    url: Url,
    method: HttpMethod,
}

impl NetworkRequest {
    /// GET request for `url`.
    ///
    /// Fails with [`GeoDataError::InvalidUrl`] when `url` does not parse.
    pub fn get(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|_| GeoDataError::invalid_url(url))?;
        Ok(Self {
            url,
            method: HttpMethod::Get,
        })
    }

    /// Append a query parameter
    #[must_use]
    pub fn with_parameter(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }

    /// Full URL including query parameters
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// URL without query parameters, safe to log
    #[must_use]
    pub fn endpoint(&self) -> String {
        let mut endpoint = self.url.clone();
        endpoint.set_query(None);
        endpoint.to_string()
    }
}

/// Response wrapper whose payload sits in `data`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, failing with [`GeoDataError::EmptyResponseData`]
    pub fn into_data(self, endpoint: &str) -> Result<T> {
        self.data
            .ok_or_else(|| GeoDataError::empty_response_data(endpoint))
    }
}

/// A downloaded response body. The file is removed on drop.
#[derive(Debug)]
pub struct DownloadedFile {
    path: TempPath,
}

impl DownloadedFile {
    /// Write `bytes` to a fresh temporary file
    pub async fn write(bytes: Vec<u8>) -> Result<Self> {
        let path = task::spawn_blocking(move || -> std::io::Result<TempPath> {
            let mut file = NamedTempFile::new()?;
            std::io::Write::write_all(&mut file, &bytes)?;
            Ok(file.into_temp_path())
        })
        .await
        .map_err(std::io::Error::other)??;
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the downloaded bytes back
    pub async fn read(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

/// HTTP transport used by the repositories
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Perform the request and return the response body
    async fn fetch(&self, request: &NetworkRequest) -> Result<Vec<u8>>;

    /// Perform the request and store the response body in a temporary file
    async fn download(&self, request: &NetworkRequest) -> Result<DownloadedFile>;
}

/// Perform `request` and decode the body as an [`Envelope`]
pub async fn perform<T: DeserializeOwned>(
    client: &dyn NetworkClient,
    request: &NetworkRequest,
) -> Result<Envelope<T>> {
    let body = client.fetch(request).await?;
    Ok(serde_json::from_slice(&body)?)
}
