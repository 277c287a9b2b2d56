use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use travelgeo::{
    FjallRecordStore, GeoDataConfig, NetworkClient, RecordStore, RepositoryAssembly,
    ReqwestNetworkClient, logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GeoDataConfig::load()?;
    logging::init(&config.logging)?;
    info!("travelgeo {}", travelgeo::VERSION);

    let network: Arc<dyn NetworkClient> = Arc::new(ReqwestNetworkClient::new(&config.api)?);

    let store_path = config.store.resolved_location();
    std::fs::create_dir_all(&store_path)
        .with_context(|| format!("Failed to create store directory {}", store_path.display()))?;
    let store: Arc<dyn RecordStore> = Arc::new(FjallRecordStore::open(&store_path)?);

    let facade = RepositoryAssembly::from_config(&config, network, store)?.create_facade();

    let summary = facade.refresh_all().await?;
    info!(
        "Stored {} countries, {} cities and {} airports in {}",
        summary.countries,
        summary.cities,
        summary.airports,
        store_path.display()
    );

    match facade.load_location().await {
        Ok(location) => {
            let country = location.country_name.as_deref().unwrap_or("unknown country");
            match location.format_coordinates() {
                Some(coordinates) => info!(
                    "You are near {} ({}), {} at {}",
                    location.name, location.iata, country, coordinates
                ),
                None => info!("You are near {} ({}), {}", location.name, location.iata, country),
            }
        }
        Err(e) => warn!("Could not resolve current location: {}", e.user_message()),
    }

    Ok(())
}
