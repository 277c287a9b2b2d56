//! Repositories for geographic reference data
//!
//! Each repository fetches one kind of record from the data service,
//! persists it through the record store and answers exact-match queries
//! against the stored copy:
//! - `CountriesRepository`, `CitiesRepository`, `AirportsRepository`: cached
//! - `LocationRepository`: network only
//! - `GeoDataFacade`: combined entry point delegating to the above
//! - `RepositoryAssembly`: binds configuration and collaborators

pub mod airports;
pub mod assembly;
pub mod cities;
pub mod countries;
pub mod facade;
pub mod location;

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::network::{self, NetworkClient, NetworkRequest};
use crate::store::{Predicate, RecordStore, StoredEntity};
use crate::travelpayouts::decode_tolerant;
use crate::{GeoDataError, Result};

pub use airports::AirportsRepository;
pub use assembly::RepositoryAssembly;
pub use cities::CitiesRepository;
pub use countries::CountriesRepository;
pub use facade::{GeoDataFacade, RefreshSummary};
pub use location::LocationRepository;

/// Store access for one entity collection
pub(crate) struct EntityCollection<E> {
    store: Arc<dyn RecordStore>,
    clear_timeout: Duration,
    entity: PhantomData<fn() -> E>,
}

impl<E: StoredEntity> EntityCollection<E> {
    pub(crate) fn new(store: Arc<dyn RecordStore>, clear_timeout: Duration) -> Self {
        Self {
            store,
            clear_timeout,
            entity: PhantomData,
        }
    }

    /// Upsert `entities`. Store failures are logged, not returned.
    pub(crate) async fn save(&self, entities: &[E]) {
        let records = entities.iter().map(E::to_record).collect();
        match self.store.insert(E::COLLECTION, records).await {
            Ok(()) => debug!("Saved {} records to {}", entities.len(), E::COLLECTION),
            Err(e) => warn!("Failed to save records to {}: {}", E::COLLECTION, e),
        }
    }

    /// Models matching `predicate`. Incomplete records are skipped.
    pub(crate) fn query(&self, predicate: &Predicate) -> Vec<E> {
        match self.store.fetch(E::COLLECTION, predicate) {
            Ok(records) => records.iter().filter_map(E::from_record).collect(),
            Err(e) => {
                warn!("Failed to read {}: {}", E::COLLECTION, e);
                Vec::new()
            }
        }
    }

    pub(crate) fn first(&self, predicate: &Predicate) -> Option<E> {
        self.query(predicate).into_iter().next()
    }

    /// Delete the whole collection and wait for the store to finish.
    /// Store failures are logged, not returned.
    pub(crate) async fn delete_all(&self) {
        if let Err(e) = self.store.delete_all(E::COLLECTION).await {
            warn!("Failed to clear {}: {}", E::COLLECTION, e);
        }
    }

    /// [`Self::delete_all`] bounded by the clear timeout
    pub(crate) async fn clear(&self) -> Result<()> {
        tokio::time::timeout(self.clear_timeout, self.delete_all())
            .await
            .map_err(|_| {
                GeoDataError::timeout(format!("Clearing {}", E::COLLECTION), self.clear_timeout)
            })
    }
}

/// Download `url` and decode it as a tolerant array of `P`
pub(crate) async fn download_list<P, M>(network: &dyn NetworkClient, url: &str) -> Result<Vec<M>>
where
    P: DeserializeOwned,
    M: From<P>,
{
    let request = NetworkRequest::get(url)?;
    let file = network.download(&request).await?;
    let bytes = file.read().await?;
    let payloads: Vec<P> = decode_tolerant(&bytes)?;
    Ok(payloads.into_iter().map(M::from).collect())
}

/// Fetch `request` and unwrap the envelope's `data`
pub(crate) async fn perform_data<P: DeserializeOwned>(
    network: &dyn NetworkClient,
    request: &NetworkRequest,
) -> Result<P> {
    let envelope = network::perform::<P>(network, request).await?;
    envelope.into_data(&request.endpoint())
}
