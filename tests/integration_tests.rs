//! Integration tests for the travelgeo facade

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rstest::{fixture, rstest};

use travelgeo::network::DownloadedFile;
use travelgeo::{
    City, Country, FjallRecordStore, GeoDataConfig, GeoDataError, GeoDataFacade,
    MemoryRecordStore, NetworkClient, NetworkRequest, RecordStore, RepositoryAssembly,
};

const TOKEN: &str = "0123456789abcdef";

/// Serves fixed bodies keyed by endpoint URL
struct FixtureNetwork {
    bodies: HashMap<String, String>,
}

impl FixtureNetwork {
    fn travelpayouts() -> Self {
        let bodies = [
            (
                "http://api.travelpayouts.com/data/countries.json",
                r#"[
                    {"code": "RU", "name": "Russia", "name_translations": {"ru": "Россия"}},
                    {"code": "FR", "name": "France", "name_translations": {"ru": "Франция"}},
                    {"code": "??"}
                ]"#,
            ),
            (
                "http://api.travelpayouts.com/data/cities.json",
                r#"{"data": [
                    {"code": "LED", "name": "Saint Petersburg", "country_code": "RU"},
                    {"code": "MOW", "name": "Moscow", "country_code": "RU"},
                    {"code": "PAR", "name": "Paris", "country_code": "FR"}
                ]}"#,
            ),
            (
                "http://api.travelpayouts.com/data/airports.json",
                r#"[
                    {"code": "LED", "name": "Pulkovo", "country_code": "RU", "city_code": "LED"},
                    {"code": "SVO", "name": "Sheremetyevo", "country_code": "RU", "city_code": "MOW"},
                    {"code": "CDG", "name": "Charles de Gaulle", "country_code": "FR", "city_code": "PAR"}
                ]"#,
            ),
            (
                "http://www.travelpayouts.com/whereami",
                r#"{"data": {"iata": "LED", "name": "Saint Petersburg",
                    "country_name": "Russia", "coordinates": "30.31:59.94"}}"#,
            ),
        ];
        Self {
            bodies: bodies
                .into_iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        }
    }

    fn body(&self, request: &NetworkRequest) -> travelgeo::Result<Vec<u8>> {
        self.bodies
            .get(&request.endpoint())
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| GeoDataError::http(404, "not found"))
    }
}

#[async_trait]
impl NetworkClient for FixtureNetwork {
    async fn fetch(&self, request: &NetworkRequest) -> travelgeo::Result<Vec<u8>> {
        self.body(request)
    }

    async fn download(&self, request: &NetworkRequest) -> travelgeo::Result<DownloadedFile> {
        DownloadedFile::write(self.body(request)?).await
    }
}

fn facade_over(store: Arc<dyn RecordStore>) -> GeoDataFacade {
    RepositoryAssembly::new(
        TOKEN,
        "en",
        Duration::from_secs(5),
        Arc::new(FixtureNetwork::travelpayouts()),
        store,
    )
    .create_facade()
}

#[fixture]
fn facade() -> GeoDataFacade {
    facade_over(Arc::new(MemoryRecordStore::new()))
}

#[rstest]
#[tokio::test]
async fn test_refresh_then_query(facade: GeoDataFacade) {
    let summary = facade.refresh_all().await.unwrap();
    assert_eq!(
        (summary.countries, summary.cities, summary.airports),
        (2, 3, 3)
    );

    let russia = facade.get_country_by_code("RU").unwrap();
    assert_eq!(russia.localized_name.as_deref(), Some("Россия"));
    assert_eq!(facade.get_country_named("France").map(|c| c.code), Some("FR".to_string()));

    let codes: Vec<String> = facade
        .get_cities_for("RU")
        .into_iter()
        .map(|c| c.code)
        .collect();
    assert_eq!(codes, vec!["LED", "MOW"]);
    assert_eq!(facade.get_city_named("Paris").map(|c| c.country_code), Some("FR".to_string()));

    assert_eq!(facade.get_airports_for_country("RU").len(), 2);
    assert_eq!(
        facade.get_airport_by_code("SVO").map(|a| a.city_code),
        Some("MOW".to_string())
    );
}

#[rstest]
#[tokio::test]
async fn test_saint_petersburg_scenario(facade: GeoDataFacade) {
    let led = City::new(
        "LED".to_string(),
        "Saint Petersburg".to_string(),
        "RU".to_string(),
    );
    let mow = City::new("MOW".to_string(), "Moscow".to_string(), "RU".to_string());
    facade.save_cities(&[led.clone(), mow]).await;

    assert_eq!(facade.get_cities_for("RU").len(), 2);
    assert_eq!(facade.get_city_by_code("LED"), Some(led));
    assert_eq!(facade.get_city_named("Paris"), None);
}

#[rstest]
#[tokio::test]
async fn test_clear_collections(facade: GeoDataFacade) {
    facade.refresh_all().await.unwrap();

    facade.clear_cities().await.unwrap();
    assert!(facade.get_cities().is_empty());
    assert_eq!(facade.get_countries().len(), 2);

    facade.clear_locations().await.unwrap();
    assert!(facade.get_countries().is_empty());
    assert!(facade.get_airports().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_load_location(facade: GeoDataFacade) {
    let location = facade.load_location().await.unwrap();

    assert_eq!(location.iata, "LED");
    assert_eq!(location.country_name.as_deref(), Some("Russia"));
    let coordinates = location.coordinates.unwrap();
    assert_eq!(coordinates.longitude, 30.31);
    assert_eq!(coordinates.latitude, 59.94);
}

#[tokio::test]
async fn test_fjall_store_backs_the_facade() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(FjallRecordStore::open(dir.path()).unwrap());
    let facade = facade_over(store);

    facade
        .save_countries(&[Country::new("DE".to_string(), "Germany".to_string())])
        .await;
    assert_eq!(facade.get_country_by_code("DE").map(|c| c.name), Some("Germany".to_string()));

    facade.clear_countries().await.unwrap();
    assert_eq!(facade.get_country_by_code("DE"), None);
}

#[test]
fn test_assembly_from_config() {
    let mut config = GeoDataConfig::default();
    config.api.token = Some(TOKEN.to_string());

    let assembly = RepositoryAssembly::from_config(
        &config,
        Arc::new(FixtureNetwork::travelpayouts()),
        Arc::new(MemoryRecordStore::new()),
    );
    assert!(assembly.is_ok());
}
