//! HTTP client for the collection projects endpoint.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::user_agent;

use super::error::ApiError;
use super::types::CollectionPage;

/// Default ArtStation base URL.
const DEFAULT_BASE_URL: &str = "https://www.artstation.com";

/// Connect timeout for metadata requests (30 seconds).
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Read timeout for metadata requests (60 seconds; pages are small JSON).
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Client for fetching pages of collection metadata.
///
/// Designed to be created once and reused across all page fetches of a run,
/// taking advantage of connection pooling. No retry happens at this layer -
/// a failed page fetch is fatal to the enumeration.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Creates a client against the live ArtStation endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Builds the deterministic endpoint URL for one page of a collection.
    #[must_use]
    pub fn collection_page_url(&self, collection_id: &str, page: u32) -> String {
        let id = urlencoding::encode(collection_id);
        format!(
            "{}/collections/{id}/projects.json?collection_id={id}&page={page}",
            self.base_url
        )
    }

    /// Fetches one page of collection metadata (pages are 1-based).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] on transport failure,
    /// [`ApiError::HttpStatus`] on a non-success response, and
    /// [`ApiError::MalformedResponse`] when the body does not decode as a
    /// collection page.
    pub async fn fetch_page(
        &self,
        collection_id: &str,
        page: u32,
    ) -> Result<CollectionPage, ApiError> {
        let url = self.collection_page_url(collection_id, page);
        debug!(%url, page, "fetching collection page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http_status(&url, status.as_u16()));
        }

        response.json::<CollectionPage>().await.map_err(|e| {
            if e.is_decode() {
                ApiError::malformed(&url, e)
            } else {
                ApiError::network(&url, e)
            }
        })
    }
}
