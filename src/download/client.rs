//! HTTP client wrapper for streaming asset downloads.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;
use url::Url;

use crate::user_agent;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::DownloadError;

/// HTTP client for streaming asset transfers to disk.
///
/// Created once and reused for every transfer of a run, taking advantage of
/// connection pooling.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with the default timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Downloads `url` to exactly `path`, overwriting any existing file.
    ///
    /// The body is streamed chunk by chunk into the file and flushed before
    /// returning. A body that ends before the advertised Content-Length is
    /// drained fails with [`DownloadError::Truncated`]. On any failure the
    /// partial file is removed, so a failed transfer never satisfies a later
    /// resume probe.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] if the URL is invalid, the request fails,
    /// the server returns an error status, the body is cut short, or writing
    /// to disk fails.
    #[must_use = "the byte count confirms the transfer completed"]
    pub async fn download_to_path(&self, url: &str, path: &Path) -> Result<u64, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
        debug!(%url, path = %path.display(), "starting transfer");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let expected = response.content_length();

        let file = File::create(path)
            .await
            .map_err(|e| DownloadError::io(path, e))?;

        let result = stream_to_file(file, response, url, path, expected).await;
        if result.is_err() {
            // A partial file must not look like a completed download.
            let _ = tokio::fs::remove_file(path).await;
        }
        result
    }
}

/// Streams the response body to the file, returning bytes written.
///
/// Extracted so the caller can clean up the partial file on error.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    path: &Path,
    expected: Option<u64>,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(path, e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk before declaring success
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(path, e))?;

    if let Some(expected_bytes) = expected
        && bytes_written != expected_bytes
    {
        return Err(DownloadError::truncated(url, expected_bytes, bytes_written));
    }

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_download_writes_exact_path() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(url_path("/large/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg bytes"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/large/a.jpg", mock_server.uri());
        let target = temp_dir.path().join("Sunset - artist1.jpg");

        let bytes = client.download_to_path(&url, &target).await.unwrap();

        assert_eq!(bytes, 10);
        assert_eq!(std::fs::read(&target).unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_download_overwrites_existing_file() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(url_path("/large/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new"))
            .mount(&mock_server)
            .await;

        let target = temp_dir.path().join("a.jpg");
        std::fs::write(&target, b"old contents").unwrap();

        let client = HttpClient::new();
        let url = format!("{}/large/a.jpg", mock_server.uri());
        client.download_to_path(&url, &target).await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_download_404_is_http_status_error() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(url_path("/4k/missing.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/4k/missing.jpg", mock_server.uri());
        let target = temp_dir.path().join("missing.jpg");

        let result = client.download_to_path(&url, &target).await;
        match result {
            Err(DownloadError::HttpStatus { status, .. }) => assert_eq!(status, 404),
            other => panic!("Expected HttpStatus error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_download_500_is_http_status_error() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(url_path("/large/a.jpg"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/large/a.jpg", mock_server.uri());
        let result = client
            .download_to_path(&url, &temp_dir.path().join("a.jpg"))
            .await;

        assert!(matches!(
            result,
            Err(DownloadError::HttpStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_download_invalid_url() {
        let temp_dir = TempDir::new().unwrap();
        let client = HttpClient::new();

        let result = client
            .download_to_path("not-a-valid-url", &temp_dir.path().join("a.jpg"))
            .await;

        assert!(matches!(result, Err(DownloadError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_download_error_leaves_no_partial_file() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(url_path("/large/a.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/large/a.jpg", mock_server.uri());
        let target = temp_dir.path().join("a.jpg");

        let result = client.download_to_path(&url, &target).await;
        assert!(result.is_err());
        assert!(
            !target.exists(),
            "partial file must be cleaned up after error"
        );
    }

    #[tokio::test]
    async fn test_download_read_timeout_cleans_up() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(url_path("/large/slow.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"data")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = HttpClient::with_timeouts(30, 1);
        let url = format!("{}/large/slow.jpg", mock_server.uri());
        let target = temp_dir.path().join("slow.jpg");

        let result = client.download_to_path(&url, &target).await;
        assert!(result.is_err(), "expected timeout or network error");
        assert!(
            !target.exists(),
            "partial file must be cleaned up after stream error"
        );
    }

    #[tokio::test]
    async fn test_download_streams_large_body() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        let large_content = vec![0u8; 1024 * 1024];
        Mock::given(method("GET"))
            .and(url_path("/large/big.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(large_content))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/large/big.jpg", mock_server.uri());
        let target = temp_dir.path().join("big.jpg");

        let bytes = client.download_to_path(&url, &target).await.unwrap();
        assert_eq!(bytes, 1024 * 1024);
        assert_eq!(std::fs::metadata(&target).unwrap().len(), 1024 * 1024);
    }
}
