use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use super::{Predicate, Record, RecordStore};
use crate::{GeoDataError, Result};

type Collections = HashMap<String, BTreeMap<String, Record>>;

/// In-process record store. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    collections: RwLock<Collections>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held in `collection`
    pub fn len(&self, collection: &str) -> Result<usize> {
        let collections = self
            .collections
            .read()
            .map_err(|_| GeoDataError::store("memory store lock poisoned"))?;
        Ok(collections.get(collection).map_or(0, BTreeMap::len))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, collection: &str, records: Vec<Record>) -> Result<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| GeoDataError::store("memory store lock poisoned"))?;
        let entries = collections.entry(collection.to_string()).or_default();
        debug!("Inserting {} records into {}", records.len(), collection);
        for record in records {
            entries.insert(record.key().to_string(), record);
        }
        Ok(())
    }

    fn fetch(&self, collection: &str, predicate: &Predicate) -> Result<Vec<Record>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| GeoDataError::store("memory store lock poisoned"))?;
        Ok(collections
            .get(collection)
            .map(|entries| {
                entries
                    .values()
                    .filter(|record| record.matches(predicate))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete_all(&self, collection: &str) -> Result<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| GeoDataError::store("memory store lock poisoned"))?;
        collections.remove(collection);
        Ok(())
    }
}
