//! `travelgeo` - geographic reference data for travel planning
//!
//! Fetches countries, cities and airports from the Travelpayouts data
//! service, keeps a local copy in a record store and answers lookups
//! against it. Also resolves the caller's current location.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod network;
pub mod repository;
pub mod store;
pub mod travelpayouts;

#[cfg(test)]
pub(crate) mod testing;

// Re-export core types for public API
pub use config::GeoDataConfig;
pub use error::GeoDataError;
pub use models::{Airport, City, Coordinates, Country, Location};
pub use network::{NetworkClient, NetworkRequest, ReqwestNetworkClient};
pub use repository::{
    AirportsRepository, CitiesRepository, CountriesRepository, GeoDataFacade, LocationRepository,
    RefreshSummary, RepositoryAssembly,
};
pub use store::{FjallRecordStore, MemoryRecordStore, RecordStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, GeoDataError>;
