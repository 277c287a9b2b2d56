//! Cities repository

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use super::{EntityCollection, perform_data};
use crate::Result;
use crate::models::City;
use crate::network::{NetworkClient, NetworkRequest};
use crate::store::{Predicate, RecordStore, fields};
use crate::travelpayouts::CityPayload;

/// Fetches, caches and looks up cities
pub struct CitiesRepository {
    url: String,
    network: Arc<dyn NetworkClient>,
    cities: EntityCollection<City>,
}

impl CitiesRepository {
    pub fn new(
        url: String,
        network: Arc<dyn NetworkClient>,
        store: Arc<dyn RecordStore>,
        clear_timeout: Duration,
    ) -> Self {
        Self {
            url,
            network,
            cities: EntityCollection::new(store, clear_timeout),
        }
    }

    /// Fetch all cities from the enveloped endpoint.
    ///
    /// A response without `data` fails with
    /// [`crate::GeoDataError::EmptyResponseData`].
    #[instrument(skip(self))]
    pub async fn load_cities(&self) -> Result<Vec<City>> {
        let request = NetworkRequest::get(&self.url)?;
        let payloads: Vec<CityPayload> = perform_data(self.network.as_ref(), &request).await?;
        let cities: Vec<City> = payloads.into_iter().map(City::from).collect();
        info!("Loaded {} cities", cities.len());
        Ok(cities)
    }

    pub async fn save(&self, cities: &[City]) {
        self.cities.save(cities).await;
    }

    #[must_use]
    pub fn get_cities(&self) -> Vec<City> {
        self.cities.query(&Predicate::all())
    }

    /// Cities belonging to `country_code`
    #[must_use]
    pub fn get_cities_for(&self, country_code: &str) -> Vec<City> {
        self.cities.query(&Predicate::field_equals(fields::COUNTRY_CODE, country_code))
    }

    #[must_use]
    pub fn get_city_named(&self, name: &str) -> Option<City> {
        self.cities.first(&Predicate::field_equals(fields::NAME, name))
    }

    #[must_use]
    pub fn get_city_by_code(&self, code: &str) -> Option<City> {
        self.cities.first(&Predicate::field_equals(fields::CODE, code))
    }

    pub async fn clear_cities(&self) -> Result<()> {
        self.cities.clear().await
    }

    pub(crate) fn collection(&self) -> &EntityCollection<City> {
        &self.cities
    }
}
