//! Combined entry point over the geographic repositories

use std::time::Duration;

use tracing::{info, instrument};

use super::{AirportsRepository, CitiesRepository, CountriesRepository, LocationRepository};
use crate::models::{Airport, City, Country, Location};
use crate::{GeoDataError, Result};

/// Record counts written by [`GeoDataFacade::refresh_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub countries: usize,
    pub cities: usize,
    pub airports: usize,
}

/// One handle over countries, cities, airports and location lookups
pub struct GeoDataFacade {
    countries: CountriesRepository,
    cities: CitiesRepository,
    airports: AirportsRepository,
    location: LocationRepository,
    clear_timeout: Duration,
}

impl GeoDataFacade {
    pub fn new(
        countries: CountriesRepository,
        cities: CitiesRepository,
        airports: AirportsRepository,
        location: LocationRepository,
        clear_timeout: Duration,
    ) -> Self {
        Self {
            countries,
            cities,
            airports,
            location,
            clear_timeout,
        }
    }

    pub async fn load_location(&self) -> Result<Location> {
        self.location.load_location().await
    }

    pub async fn load_countries(&self) -> Result<Vec<Country>> {
        self.countries.load_countries().await
    }

    pub async fn load_cities(&self) -> Result<Vec<City>> {
        self.cities.load_cities().await
    }

    pub async fn load_airports(&self) -> Result<Vec<Airport>> {
        self.airports.load_airports().await
    }

    pub async fn save_countries(&self, countries: &[Country]) {
        self.countries.save(countries).await;
    }

    pub async fn save_cities(&self, cities: &[City]) {
        self.cities.save(cities).await;
    }

    pub async fn save_airports(&self, airports: &[Airport]) {
        self.airports.save(airports).await;
    }

    #[must_use]
    pub fn get_countries(&self) -> Vec<Country> {
        self.countries.get_countries()
    }

    #[must_use]
    pub fn get_country_named(&self, name: &str) -> Option<Country> {
        self.countries.get_country_named(name)
    }

    #[must_use]
    pub fn get_country_by_code(&self, code: &str) -> Option<Country> {
        self.countries.get_country_by_code(code)
    }

    #[must_use]
    pub fn get_cities(&self) -> Vec<City> {
        self.cities.get_cities()
    }

    #[must_use]
    pub fn get_cities_for(&self, country_code: &str) -> Vec<City> {
        self.cities.get_cities_for(country_code)
    }

    #[must_use]
    pub fn get_city_named(&self, name: &str) -> Option<City> {
        self.cities.get_city_named(name)
    }

    #[must_use]
    pub fn get_city_by_code(&self, code: &str) -> Option<City> {
        self.cities.get_city_by_code(code)
    }

    #[must_use]
    pub fn get_airports(&self) -> Vec<Airport> {
        self.airports.get_airports()
    }

    #[must_use]
    pub fn get_airport_by_code(&self, code: &str) -> Option<Airport> {
        self.airports.get_airport_by_code(code)
    }

    #[must_use]
    pub fn get_airports_for_city(&self, city_code: &str) -> Vec<Airport> {
        self.airports.get_airports_for_city(city_code)
    }

    #[must_use]
    pub fn get_airports_for_country(&self, country_code: &str) -> Vec<Airport> {
        self.airports.get_airports_for_country(country_code)
    }

    pub async fn clear_countries(&self) -> Result<()> {
        self.countries.clear_countries().await
    }

    pub async fn clear_cities(&self) -> Result<()> {
        self.cities.clear_cities().await
    }

    pub async fn clear_airports(&self) -> Result<()> {
        self.airports.clear_airports().await
    }

    /// Delete countries, cities and airports concurrently and wait for all
    /// three, bounded by the clear timeout.
    #[instrument(skip(self))]
    pub async fn clear_locations(&self) -> Result<()> {
        let deletes = async {
            futures::join!(
                self.countries.collection().delete_all(),
                self.cities.collection().delete_all(),
                self.airports.collection().delete_all(),
            );
        };

        tokio::time::timeout(self.clear_timeout, deletes)
            .await
            .map_err(|_| GeoDataError::timeout("Clearing locations", self.clear_timeout))?;
        info!("Cleared countries, cities and airports");
        Ok(())
    }

    /// Load and save countries, cities and airports in turn.
    ///
    /// Stops at the first failed load; collections refreshed before it stay
    /// saved.
    #[instrument(skip(self))]
    pub async fn refresh_all(&self) -> Result<RefreshSummary> {
        let countries = self.load_countries().await?;
        self.save_countries(&countries).await;

        let cities = self.load_cities().await?;
        self.save_cities(&cities).await;

        let airports = self.load_airports().await?;
        self.save_airports(&airports).await;

        let summary = RefreshSummary {
            countries: countries.len(),
            cities: cities.len(),
            airports: airports.len(),
        };
        info!(
            "Refreshed {} countries, {} cities, {} airports",
            summary.countries, summary.cities, summary.airports
        );
        Ok(summary)
    }
}
