//! "Where am I" lookup

use std::sync::Arc;

use tracing::{info, instrument};

use super::perform_data;
use crate::Result;
use crate::models::Location;
use crate::network::{NetworkClient, NetworkRequest};
use crate::travelpayouts::LocationPayload;

/// Resolves the caller's nearest location. Nothing is cached.
pub struct LocationRepository {
    url: String,
    token: String,
    locale: String,
    network: Arc<dyn NetworkClient>,
}

impl LocationRepository {
    pub fn new(
        url: String,
        token: String,
        locale: String,
        network: Arc<dyn NetworkClient>,
    ) -> Self {
        Self {
            url,
            token,
            locale,
            network,
        }
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    fn request(&self) -> Result<NetworkRequest> {
        Ok(NetworkRequest::get(&self.url)?
            .with_parameter("locale", &self.locale)
            .with_parameter("callback", "")
            .with_parameter("token", &self.token))
    }

    #[instrument(skip(self), fields(locale = %self.locale))]
    pub async fn load_location(&self) -> Result<Location> {
        let request = self.request()?;
        let payload: LocationPayload = perform_data(self.network.as_ref(), &request).await?;
        let location = Location::from(payload);
        info!("Resolved location {} ({})", location.name, location.iata);
        Ok(location)
    }
}
