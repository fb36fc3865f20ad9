//! Artwork catalog client implementation.
//!
//! This module provides the HTTP client for the Art Institute of Chicago
//! public REST API. The API needs no authentication. Requests are not
//! retried; a failure is reported to the caller exactly once.

use std::future::Future;
use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, instrument, warn};

use super::error::{ApiError, Result};
use super::source::PageSource;
use super::types::{ArtworkPage, ARTWORK_FIELDS};
use crate::config::Config;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The catalog API client.
#[derive(Debug, Clone)]
pub struct ArticClient {
    /// The HTTP client.
    client: Client,
    /// The API base URL, without a trailing slash.
    base_url: String,
}

impl ArticClient {
    /// Create a new client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no http(s) scheme or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Create a client from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Fetch one page of artworks.
    ///
    /// Calls `GET /artworks?page={page}&limit={limit}` restricted to the
    /// fields the table displays.
    #[instrument(skip(self))]
    pub async fn get_artworks(&self, page: u32, limit: u32) -> Result<ArtworkPage> {
        let url = self.artworks_url(page, limit);
        let result: ArtworkPage = self.get(&url).await?;
        debug!(
            "Fetched {} artworks (total: {})",
            result.data.len(),
            result.total()
        );
        Ok(result)
    }

    /// Build the listing URL for a page.
    fn artworks_url(&self, page: u32, limit: u32) -> String {
        format!(
            "{}/artworks?page={}&limit={}&fields={}",
            self.base_url,
            page,
            limit,
            urlencoding::encode(&ARTWORK_FIELDS.join(","))
        )
    }

    /// Perform a single GET request and decode the JSON body.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    ///
    /// The catalog reports failures as `{"status": .., "error": .., "detail": ..}`.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("detail")
                    .or_else(|| json.get("error"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .filter(|msg| !msg.is_empty());

        ApiError::from_status(status, detail.as_deref().unwrap_or(url))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PageSource for ArticClient {
    fn fetch_page(&self, page: u32, limit: u32) -> impl Future<Output = Result<ArtworkPage>> + Send {
        self.get_artworks(page, limit)
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}", url);
    }

    url.to_string()
}
