use crate::error::FetchError;
use async_trait::async_trait;

/// Retrieves the raw HTML of a page.
///
/// Implementations follow redirects and fail on any non-2xx response. The
/// scanner never retries a failed fetch.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
