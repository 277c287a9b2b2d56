//! Record store port and its adapters
//!
//! Repositories persist domain models through the [`RecordStore`] trait:
//! - `FjallRecordStore`: on-disk store for offline reuse
//! - `MemoryRecordStore`: in-process store for tests and ephemeral sessions
//!
//! Insert and delete are asynchronous and resolve when the store has
//! finished. Reads are synchronous.

pub mod memory;
pub mod persistent;
pub mod record;

use async_trait::async_trait;

use crate::Result;

pub use memory::MemoryRecordStore;
pub use persistent::FjallRecordStore;
pub use record::{Predicate, Record, StoredEntity, fields};

/// Storage engine for named collections of records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upsert `records` into `collection`, keyed by [`Record::key`]
    async fn insert(&self, collection: &str, records: Vec<Record>) -> Result<()>;

    /// Records in `collection` matching `predicate`, ordered by key
    fn fetch(&self, collection: &str, predicate: &Predicate) -> Result<Vec<Record>>;

    /// Remove every record in `collection`
    async fn delete_all(&self, collection: &str) -> Result<()>;
}
