use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use fjall::Keyspace;
use tokio::sync::Mutex;
use tokio::task;

use super::{Predicate, Record, RecordStore};
use crate::{GeoDataError, Result};

type Entries = BTreeMap<String, Record>;

/// On-disk record store backed by a fjall keyspace.
///
/// Each collection is stored as one entry: a postcard-encoded map from
/// record key to record.
pub struct FjallRecordStore {
    store: Keyspace,
    // Serializes read-modify-write of a collection entry. Held by the
    // blocking task until the write lands, even if the caller gave up.
    write_lock: Arc<Mutex<()>>,
}

fn store_error(err: impl std::fmt::Display) -> GeoDataError {
    GeoDataError::store(err.to_string())
}

fn read_entries(store: &Keyspace, collection: &str) -> Result<Entries> {
    let maybe_bytes = store
        .get(collection.as_bytes().to_vec())
        .map_err(store_error)?
        .map(|v| v.to_vec());

    match maybe_bytes {
        Some(bytes) => postcard::from_bytes(&bytes).map_err(store_error),
        None => Ok(Entries::new()),
    }
}

impl FjallRecordStore {
    /// Open (or create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path)
            .open()
            .map_err(store_error)?;
        let items = db
            .keyspace("records", fjall::KeyspaceCreateOptions::default)
            .map_err(store_error)?;
        tracing::debug!("Opened record store at {}", path.as_ref().display());
        Ok(FjallRecordStore {
            store: items,
            write_lock: Arc::new(Mutex::new(())),
        })
    }
}

#[async_trait]
impl RecordStore for FjallRecordStore {
    #[tracing::instrument(
        name = "store_insert",
        level = "debug",
        skip(self, records),
        fields(count = records.len())
    )]
    async fn insert(&self, collection: &str, records: Vec<Record>) -> Result<()> {
        let guard = self.write_lock.clone().lock_owned().await;
        let store = self.store.clone();
        let collection = collection.to_string();

        task::spawn_blocking(move || -> Result<()> {
            let _guard = guard;
            let mut entries = read_entries(&store, &collection)?;
            for record in records {
                entries.insert(record.key().to_string(), record);
            }
            let bytes = postcard::to_stdvec(&entries).map_err(store_error)?;
            store
                .insert(collection.as_bytes().to_vec(), bytes)
                .map_err(store_error)?;
            tracing::debug!("Collection {} now holds {} records", collection, entries.len());
            Ok(())
        })
        .await
        .map_err(store_error)?
    }

    #[tracing::instrument(name = "store_fetch", level = "debug", skip(self))]
    fn fetch(&self, collection: &str, predicate: &Predicate) -> Result<Vec<Record>> {
        let entries = read_entries(&self.store, collection)?;
        Ok(entries
            .into_values()
            .filter(|record| record.matches(predicate))
            .collect())
    }

    #[tracing::instrument(name = "store_delete_all", level = "debug", skip(self))]
    async fn delete_all(&self, collection: &str) -> Result<()> {
        let guard = self.write_lock.clone().lock_owned().await;
        let store = self.store.clone();
        let key = collection.as_bytes().to_vec();

        task::spawn_blocking(move || {
            let _guard = guard;
            store.remove(key)
        })
            .await
            .map_err(store_error)?
            .map_err(store_error)?;
        Ok(())
    }
}
