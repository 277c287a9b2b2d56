use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, error, info, instrument, warn};

use super::{DownloadedFile, NetworkClient, NetworkRequest};
use crate::config::ApiConfig;
use crate::{GeoDataError, Result};

/// Production network client on top of reqwest
pub struct ReqwestNetworkClient {
    client: Client,
}

impl ReqwestNetworkClient {
    /// Create a new client using the API timeout and user agent
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeoDataError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Send the request and turn non-success statuses into errors.
    /// Never retries.
    async fn send(&self, request: &NetworkRequest) -> Result<Response> {
        let start_time = Instant::now();
        let response = self
            .client
            .get(request.url().clone())
            .send()
            .await
            .map_err(|e| {
                // The full URL carries the access token.
                let e = e.without_url();
                warn!("Network error for {}: {}", request.endpoint(), e);
                GeoDataError::network(format!("Request to {} failed: {e}", request.endpoint()))
            })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 => {
                error!("API authentication failed (HTTP 401)");
                Err(GeoDataError::http(401, "Invalid or missing API token"))
            }
            429 => {
                warn!("Server rate limit exceeded (HTTP 429)");
                Err(GeoDataError::http(429, "Rate limit exceeded"))
            }
            code => {
                warn!("HTTP error {} from {}", code, request.endpoint());
                Err(GeoDataError::http(
                    code,
                    format!(
                        "{} {}",
                        status.canonical_reason().unwrap_or("Unknown error"),
                        error_text
                    )
                    .trim_end()
                    .to_string(),
                ))
            }
        }
    }

    async fn body(&self, request: &NetworkRequest) -> Result<Vec<u8>> {
        let response = self.send(request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| {
                GeoDataError::network(format!(
                    "Failed to read response body from {}: {}",
                    request.endpoint(),
                    e.without_url()
                ))
            })?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl NetworkClient for ReqwestNetworkClient {
    #[instrument(skip(self, request), fields(endpoint = %request.endpoint()))]
    async fn fetch(&self, request: &NetworkRequest) -> Result<Vec<u8>> {
        let body = self.body(request).await?;
        debug!("Fetched {} bytes", body.len());
        Ok(body)
    }

    #[instrument(skip(self, request), fields(endpoint = %request.endpoint()))]
    async fn download(&self, request: &NetworkRequest) -> Result<DownloadedFile> {
        let body = self.body(request).await?;
        let size = body.len();
        let file = DownloadedFile::write(body).await?;
        info!("Downloaded {} bytes to {}", size, file.path().display());
        Ok(file)
    }
}
