//! Error types and handling for the geographic data layer

use std::time::Duration;

use thiserror::Error;

/// Main error type for `travelgeo`
#[derive(Error, Debug)]
pub enum GeoDataError {
    /// A fixed endpoint string could not be parsed as a URL
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// The response envelope decoded but carried no `data` field
    #[error("Empty response data from {endpoint}")]
    EmptyResponseData { endpoint: String },

    /// Transport-level failure (connection, TLS, timeout inside the client)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The server answered with a non-success status
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// The payload was not the JSON shape we expected
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Storage engine errors
    #[error("Store error: {message}")]
    Store { message: String },

    /// A store operation did not signal completion in time
    #[error("{operation} did not finish within {after:?}")]
    Timeout {
        operation: String,
        after: Duration,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GeoDataError {
    /// Create a new invalid URL error
    pub fn invalid_url<S: Into<String>>(url: S) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Create a new empty response data error
    pub fn empty_response_data<S: Into<String>>(endpoint: S) -> Self {
        Self::EmptyResponseData {
            endpoint: endpoint.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new HTTP status error
    pub fn http<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(operation: S, after: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            after,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GeoDataError::InvalidUrl { .. } | GeoDataError::Config { .. } => {
                "Configuration error. Please check your config file and API token.".to_string()
            }
            GeoDataError::Http { status: 401, .. } => {
                "The API token was rejected. Please check api.token in your config.".to_string()
            }
            GeoDataError::Http { status: 429, .. } => {
                "Too many requests to the travel data service. Please wait and try again."
                    .to_string()
            }
            GeoDataError::Network { .. } | GeoDataError::Http { .. } => {
                "Unable to reach the travel data service. Please check your internet connection."
                    .to_string()
            }
            GeoDataError::EmptyResponseData { .. } | GeoDataError::Decode { .. } => {
                "The travel data service returned an unexpected response.".to_string()
            }
            GeoDataError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            GeoDataError::Store { .. } => {
                "Local storage failed. You may need to clear the offline data.".to_string()
            }
            GeoDataError::Timeout { operation, .. } => {
                format!("{operation} is taking too long. Please try again.")
            }
        }
    }
}

impl From<serde_json::Error> for GeoDataError {
    fn from(err: serde_json::Error) -> Self {
        GeoDataError::decode(err.to_string())
    }
}
