//! Travelpayouts data API response structures and conversion utilities

use std::collections::HashMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::Result;
use crate::models::{Airport, City, Coordinates, Country, Location};

/// Language whose translation becomes the model's localized name
pub const LOCALIZED_LANGUAGE: &str = "ru";

/// Element of `countries.json`
#[derive(Debug, Deserialize)]
pub struct CountryPayload {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub name_translations: Option<HashMap<String, String>>,
}

/// Element of the cities list
#[derive(Debug, Deserialize)]
pub struct CityPayload {
    pub code: String,
    pub name: String,
    pub country_code: String,
    #[serde(default)]
    pub name_translations: Option<HashMap<String, String>>,
}

/// Element of `airports.json`
#[derive(Debug, Deserialize)]
pub struct AirportPayload {
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub city_code: String,
}

/// Payload of the "where am I" endpoint
#[derive(Debug, Deserialize)]
pub struct LocationPayload {
    pub iata: String,
    pub name: String,
    #[serde(default)]
    pub country_name: Option<String>,
    /// "<longitude>:<latitude>"
    #[serde(default)]
    pub coordinates: Option<String>,
}

fn localized_name(translations: Option<&HashMap<String, String>>) -> Option<String> {
    translations?
        .get(LOCALIZED_LANGUAGE)
        .filter(|name| !name.is_empty())
        .cloned()
}

impl From<CountryPayload> for Country {
    fn from(payload: CountryPayload) -> Self {
        Country {
            localized_name: localized_name(payload.name_translations.as_ref()),
            code: payload.code,
            name: payload.name,
        }
    }
}

impl From<CityPayload> for City {
    fn from(payload: CityPayload) -> Self {
        City {
            localized_name: localized_name(payload.name_translations.as_ref()),
            code: payload.code,
            name: payload.name,
            country_code: payload.country_code,
        }
    }
}

impl From<AirportPayload> for Airport {
    fn from(payload: AirportPayload) -> Self {
        Airport::new(
            payload.code,
            payload.name,
            payload.country_code,
            payload.city_code,
        )
    }
}

impl From<LocationPayload> for Location {
    fn from(payload: LocationPayload) -> Self {
        let coordinates = payload.coordinates.as_deref().and_then(|raw| {
            let parsed = Coordinates::parse_lon_lat(raw);
            if parsed.is_none() {
                debug!("Ignoring unparsable coordinates '{}'", raw);
            }
            parsed
        });

        Location {
            iata: payload.iata,
            name: payload.name,
            country_name: payload.country_name,
            coordinates,
        }
    }
}

/// Decode a JSON array element by element, keeping only the elements that
/// decode as `T`.
///
/// Fails only when `bytes` is not a JSON array at all.
pub fn decode_tolerant<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    let elements: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
    let total = elements.len();

    let results: Vec<std::result::Result<T, serde_json::Error>> = elements
        .into_iter()
        .map(serde_json::from_value::<T>)
        .collect();
    let decoded: Vec<T> = results.into_iter().filter_map(|r| r.ok()).collect();

    if decoded.len() < total {
        debug!(
            "Skipped {} of {} malformed elements",
            total - decoded.len(),
            total
        );
    }
    Ok(decoded)
}
