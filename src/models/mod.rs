//! Domain models for geographic reference data
//!
//! - Country, City, Airport: cached reference records keyed by IATA code
//! - Location: the caller's transient resolved position

pub mod airport;
pub mod city;
pub mod country;
pub mod location;

// Re-export all public types for convenient access
pub use airport::Airport;
pub use city::City;
pub use country::Country;
pub use location::{Coordinates, Location};
