//! HTTP client abstraction for testability

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::ProviderError;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for async HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing by
/// enabling mock HTTP clients in tests. Uses `Pin<Box<dyn Future>>` so the
/// trait stays dyn-compatible (`Arc<dyn AsyncHttpClient>`).
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get<'a>(&'a self, url: &str) -> BoxFuture<'a, Result<Vec<u8>, ProviderError>>;
}

/// Real HTTP client implementation using reqwest.
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new client with default configuration (30 second timeout).
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Creates a new client with a custom request timeout.
    ///
    /// The timeout here is a transport-level backstop; the fetch
    /// coordinator applies its own per-request deadline on top so that a
    /// slow response is reported as timed-out, not failed.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    fn get<'a>(&'a self, url: &str) -> BoxFuture<'a, Result<Vec<u8>, ProviderError>> {
        let url = url.to_string();
        Box::pin(async move {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| ProviderError::HttpError(format!("Request failed: {}", e)))?;

            if !response.status().is_success() {
                return Err(ProviderError::HttpError(format!(
                    "HTTP {} from {}",
                    response.status(),
                    url
                )));
            }

            response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| ProviderError::HttpError(format!("Failed to read response: {}", e)))
        })
    }
}
