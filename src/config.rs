//! Configuration management for `travelgeo`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::GeoDataError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoDataConfig {
    /// Remote data service configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Local record store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote data service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Access token for the "where am I" endpoint. Never compiled in.
    pub token: Option<String>,
    /// Locale sent with location requests
    #[serde(default = "default_location_locale")]
    pub location_locale: String,
    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_seconds: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub endpoints: Endpoints,
}

/// Endpoint URLs of the data service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_location_url")]
    pub location: String,
    #[serde(default = "default_cities_url")]
    pub cities: String,
    #[serde(default = "default_countries_url")]
    pub countries: String,
    #[serde(default = "default_airports_url")]
    pub airports: String,
}

/// Local record store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store directory location
    #[serde(default = "default_store_location")]
    pub location: String,
    /// How long a bulk clear may take before giving up
    #[serde(default = "default_clear_timeout")]
    pub clear_timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_location_locale() -> String {
    "en".to_string()
}

fn default_api_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("travelgeo/{}", crate::VERSION)
}

fn default_location_url() -> String {
    "http://www.travelpayouts.com/whereami".to_string()
}

fn default_cities_url() -> String {
    "http://api.travelpayouts.com/data/cities.json".to_string()
}

fn default_countries_url() -> String {
    "http://api.travelpayouts.com/data/countries.json".to_string()
}

fn default_airports_url() -> String {
    "http://api.travelpayouts.com/data/airports.json".to_string()
}

fn default_store_location() -> String {
    "~/.cache/travelgeo/store".to_string()
}

fn default_clear_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: None,
            location_locale: default_location_locale(),
            timeout_seconds: default_api_timeout(),
            user_agent: default_user_agent(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            location: default_location_url(),
            cities: default_cities_url(),
            countries: default_countries_url(),
            airports: default_airports_url(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: default_store_location(),
            clear_timeout_seconds: default_clear_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl StoreConfig {
    /// Store location with a leading `~` expanded to the home directory
    #[must_use]
    pub fn resolved_location(&self) -> PathBuf {
        match self.location.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.location)),
            None => PathBuf::from(&self.location),
        }
    }
}

impl GeoDataConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TRAVELGEO_API__TOKEN
        builder = builder.add_source(
            Environment::with_prefix("TRAVELGEO")
                .prefix_separator("_")
                .separator("__"),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: GeoDataConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelgeo").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api.location_locale.is_empty() {
            self.api.location_locale = default_location_locale();
        }
        if self.api.timeout_seconds == 0 {
            self.api.timeout_seconds = default_api_timeout();
        }
        if self.api.user_agent.is_empty() {
            self.api.user_agent = default_user_agent();
        }
        if self.store.location.is_empty() {
            self.store.location = default_store_location();
        }
        if self.store.clear_timeout_seconds == 0 {
            self.store.clear_timeout_seconds = default_clear_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_token()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The configured token, or a configuration error
    pub fn token(&self) -> std::result::Result<&str, GeoDataError> {
        match self.api.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(GeoDataError::config(
                "API token is required. Set api.token or TRAVELGEO_API__TOKEN.",
            )),
        }
    }

    fn validate_token(&self) -> Result<()> {
        let token = self.token()?;

        if token.len() < 8 {
            return Err(GeoDataError::config(
                "API token appears to be invalid (too short). Please check your token.",
            )
            .into());
        }

        if token.len() > 100 {
            return Err(GeoDataError::config(
                "API token appears to be invalid (too long). Please check your token.",
            )
            .into());
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(GeoDataError::config("API timeout cannot exceed 300 seconds").into());
        }

        if self.store.clear_timeout_seconds > 600 {
            return Err(
                GeoDataError::config("Store clear timeout cannot exceed 600 seconds").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(GeoDataError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(GeoDataError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let endpoints = &self.api.endpoints;
        for (name, url) in [
            ("location", &endpoints.location),
            ("cities", &endpoints.cities),
            ("countries", &endpoints.countries),
            ("airports", &endpoints.airports),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(GeoDataError::config(format!(
                    "The {name} endpoint must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn valid_config() -> GeoDataConfig {
        let mut config = GeoDataConfig::default();
        config.api.token = Some("0123456789abcdef".to_string());
        config
    }

    #[test]
    fn test_default_config() {
        let config = GeoDataConfig::default();
        assert_eq!(
            config.api.endpoints.cities,
            "http://api.travelpayouts.com/data/cities.json"
        );
        assert_eq!(config.api.location_locale, "en");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.store.clear_timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
        assert!(config.api.token.is_none());
    }

    #[test]
    fn test_config_validation_missing_token() {
        let config = GeoDataConfig::default();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API token is required"));
    }

    #[test]
    fn test_config_validation_valid_token() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = valid_config();
        config.api.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_endpoint_scheme() {
        let mut config = valid_config();
        config.api.endpoints.airports = "ftp://example.com/airports.json".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("airports endpoint"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = valid_config();
        config.api.location_locale.clear();
        config.store.clear_timeout_seconds = 0;
        config.apply_defaults();

        assert_eq!(config.api.location_locale, "en");
        assert_eq!(config.store.clear_timeout_seconds, 30);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
token = "fe17c550aaaabbbb"
location_locale = "ru"

[store]
location = "/tmp/travelgeo-test"
"#
        )
        .unwrap();

        let config = GeoDataConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.token.as_deref(), Some("fe17c550aaaabbbb"));
        assert_eq!(config.api.location_locale, "ru");
        assert_eq!(config.api.endpoints, Endpoints::default());
        assert_eq!(
            config.store.resolved_location(),
            PathBuf::from("/tmp/travelgeo-test")
        );
    }

    #[test]
    fn test_resolved_location_expands_home() {
        let store = StoreConfig::default();
        let resolved = store.resolved_location();
        if let Some(home) = dirs::home_dir() {
            assert!(resolved.starts_with(home));
        }
        assert!(resolved.ends_with(".cache/travelgeo/store"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = GeoDataConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("travelgeo"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
