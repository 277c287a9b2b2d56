//! Wires configuration and collaborators into repositories

use std::sync::Arc;
use std::time::Duration;

use super::{
    AirportsRepository, CitiesRepository, CountriesRepository, GeoDataFacade, LocationRepository,
};
use crate::Result;
use crate::config::{Endpoints, GeoDataConfig};
use crate::network::NetworkClient;
use crate::store::RecordStore;

/// Builds repositories sharing one network client and one record store
#[derive(Clone)]
pub struct RepositoryAssembly {
    token: String,
    location_locale: String,
    clear_timeout: Duration,
    endpoints: Endpoints,
    network: Arc<dyn NetworkClient>,
    store: Arc<dyn RecordStore>,
}

impl RepositoryAssembly {
    /// Assembly using the default endpoint URLs
    pub fn new(
        token: impl Into<String>,
        location_locale: impl Into<String>,
        clear_timeout: Duration,
        network: Arc<dyn NetworkClient>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            token: token.into(),
            location_locale: location_locale.into(),
            clear_timeout,
            endpoints: Endpoints::default(),
            network,
            store,
        }
    }

    /// Assembly configured from `config`. Fails when no token is configured.
    pub fn from_config(
        config: &GeoDataConfig,
        network: Arc<dyn NetworkClient>,
        store: Arc<dyn RecordStore>,
    ) -> Result<Self> {
        let assembly = Self::new(
            config.token()?,
            config.api.location_locale.clone(),
            Duration::from_secs(u64::from(config.store.clear_timeout_seconds)),
            network,
            store,
        );
        Ok(assembly.with_endpoints(config.api.endpoints.clone()))
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[must_use]
    pub fn create_countries_repository(&self) -> CountriesRepository {
        CountriesRepository::new(
            self.endpoints.countries.clone(),
            self.network.clone(),
            self.store.clone(),
            self.clear_timeout,
        )
    }

    #[must_use]
    pub fn create_cities_repository(&self) -> CitiesRepository {
        CitiesRepository::new(
            self.endpoints.cities.clone(),
            self.network.clone(),
            self.store.clone(),
            self.clear_timeout,
        )
    }

    #[must_use]
    pub fn create_airports_repository(&self) -> AirportsRepository {
        AirportsRepository::new(
            self.endpoints.airports.clone(),
            self.network.clone(),
            self.store.clone(),
            self.clear_timeout,
        )
    }

    #[must_use]
    pub fn create_location_repository(&self) -> LocationRepository {
        LocationRepository::new(
            self.endpoints.location.clone(),
            self.token.clone(),
            self.location_locale.clone(),
            self.network.clone(),
        )
    }

    #[must_use]
    pub fn create_facade(&self) -> GeoDataFacade {
        GeoDataFacade::new(
            self.create_countries_repository(),
            self.create_cities_repository(),
            self.create_airports_repository(),
            self.create_location_repository(),
            self.clear_timeout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoDataError;
    use crate::models::Country;
    use crate::store::MemoryRecordStore;
    use crate::testing::ScriptedNetworkClient;

    fn collaborators() -> (Arc<dyn NetworkClient>, Arc<dyn RecordStore>) {
        (
            Arc::new(ScriptedNetworkClient::new()),
            Arc::new(MemoryRecordStore::new()),
        )
    }

    #[test]
    fn test_from_config_requires_token() {
        let (network, store) = collaborators();
        let config = GeoDataConfig::default();

        let err = RepositoryAssembly::from_config(&config, network, store).err();
        assert!(matches!(err, Some(GeoDataError::Config { .. })));
    }

    #[test]
    fn test_from_config_carries_locale() {
        let (network, store) = collaborators();
        let mut config = GeoDataConfig::default();
        config.api.token = Some("0123456789abcdef".to_string());
        config.api.location_locale = "ru".to_string();

        let assembly = RepositoryAssembly::from_config(&config, network, store).unwrap();
        assert_eq!(assembly.create_location_repository().locale(), "ru");
    }

    #[tokio::test]
    async fn test_repositories_share_the_store() {
        let (network, store) = collaborators();
        let assembly =
            RepositoryAssembly::new("token", "en", Duration::from_secs(1), network, store);

        let writer = assembly.create_countries_repository();
        writer
            .save(&[Country::new("RU".to_string(), "Russia".to_string())])
            .await;

        let reader = assembly.create_facade();
        assert!(reader.get_country_by_code("RU").is_some());
    }
}
