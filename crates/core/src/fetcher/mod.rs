//! Page fetching for the scrape orchestrator.

mod http;
mod rate_limiter;

pub use http::HttpFetcher;
pub use rate_limiter::TokenBucket;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from fetching a page.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read body: {0}")]
    Body(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Trait for retrieving raw page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url` and return its body text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
