//! Countries repository

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use super::{EntityCollection, download_list};
use crate::Result;
use crate::models::Country;
use crate::network::NetworkClient;
use crate::store::{Predicate, RecordStore, fields};
use crate::travelpayouts::CountryPayload;

/// Fetches, caches and looks up countries
pub struct CountriesRepository {
    url: String,
    network: Arc<dyn NetworkClient>,
    countries: EntityCollection<Country>,
}

impl CountriesRepository {
    pub fn new(
        url: String,
        network: Arc<dyn NetworkClient>,
        store: Arc<dyn RecordStore>,
        clear_timeout: Duration,
    ) -> Self {
        Self {
            url,
            network,
            countries: EntityCollection::new(store, clear_timeout),
        }
    }

    /// Download all countries. Malformed entries are skipped.
    #[instrument(skip(self))]
    pub async fn load_countries(&self) -> Result<Vec<Country>> {
        let countries =
            download_list::<CountryPayload, Country>(self.network.as_ref(), &self.url).await?;
        info!("Loaded {} countries", countries.len());
        Ok(countries)
    }

    pub async fn save(&self, countries: &[Country]) {
        self.countries.save(countries).await;
    }

    #[must_use]
    pub fn get_countries(&self) -> Vec<Country> {
        self.countries.query(&Predicate::all())
    }

    #[must_use]
    pub fn get_country_named(&self, name: &str) -> Option<Country> {
        self.countries.first(&Predicate::field_equals(fields::NAME, name))
    }

    #[must_use]
    pub fn get_country_by_code(&self, code: &str) -> Option<Country> {
        self.countries.first(&Predicate::field_equals(fields::CODE, code))
    }

    /// Remove every stored country
    pub async fn clear_countries(&self) -> Result<()> {
        self.countries.clear().await
    }

    pub(crate) fn collection(&self) -> &EntityCollection<Country> {
        &self.countries
    }
}
