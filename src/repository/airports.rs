//! Airports repository

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use super::{EntityCollection, download_list};
use crate::Result;
use crate::models::Airport;
use crate::network::NetworkClient;
use crate::store::{Predicate, RecordStore, fields};
use crate::travelpayouts::AirportPayload;

/// Fetches, caches and looks up airports
pub struct AirportsRepository {
    url: String,
    network: Arc<dyn NetworkClient>,
    airports: EntityCollection<Airport>,
}

impl AirportsRepository {
    pub fn new(
        url: String,
        network: Arc<dyn NetworkClient>,
        store: Arc<dyn RecordStore>,
        clear_timeout: Duration,
    ) -> Self {
        Self {
            url,
            network,
            airports: EntityCollection::new(store, clear_timeout),
        }
    }

    /// Download all airports. Malformed entries are skipped.
    #[instrument(skip(self))]
    pub async fn load_airports(&self) -> Result<Vec<Airport>> {
        let airports =
            download_list::<AirportPayload, Airport>(self.network.as_ref(), &self.url).await?;
        info!("Loaded {} airports", airports.len());
        Ok(airports)
    }

    pub async fn save(&self, airports: &[Airport]) {
        self.airports.save(airports).await;
    }

    #[must_use]
    pub fn get_airports(&self) -> Vec<Airport> {
        self.airports.query(&Predicate::all())
    }

    #[must_use]
    pub fn get_airport_by_code(&self, code: &str) -> Option<Airport> {
        self.airports.first(&Predicate::field_equals(fields::CODE, code))
    }

    #[must_use]
    pub fn get_airports_for_city(&self, city_code: &str) -> Vec<Airport> {
        self.airports.query(&Predicate::field_equals(fields::CITY_CODE, city_code))
    }

    #[must_use]
    pub fn get_airports_for_country(&self, country_code: &str) -> Vec<Airport> {
        self.airports.query(&Predicate::field_equals(fields::COUNTRY_CODE, country_code))
    }

    pub async fn clear_airports(&self) -> Result<()> {
        self.airports.clear().await
    }

    pub(crate) fn collection(&self) -> &EntityCollection<Airport> {
        &self.airports
    }
}
