//! Location model for the caller's resolved position

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Parse the "where am I" format `"<longitude>:<latitude>"`.
    ///
    /// Returns `None` for malformed or out-of-range values.
    #[must_use]
    pub fn parse_lon_lat(input: &str) -> Option<Self> {
        let (lon, lat) = input.trim().split_once(':')?;
        let longitude = lon.trim().parse::<f64>().ok()?;
        let latitude = lat.trim().parse::<f64>().ok()?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }

        Some(Self {
            latitude,
            longitude,
        })
    }
}

/// Approximate current location of the caller
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// IATA code of the nearest city
    pub iata: String,
    /// City name in the requested locale
    pub name: String,
    pub country_name: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl Location {
    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> Option<String> {
        self.coordinates
            .map(|c| format!("{:.4}, {:.4}", c.latitude, c.longitude))
    }
}
