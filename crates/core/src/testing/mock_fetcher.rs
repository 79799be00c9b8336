//! Mock page fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, PageFetcher};

/// Mock implementation of the PageFetcher trait.
///
/// Serves configured bodies by URL and records every request. URLs without
/// a configured page answer with HTTP 404.
///
/// # Example
///
/// ```rust,ignore
/// use cardex_core::testing::{MockFetcher, fixtures};
///
/// let fetcher = MockFetcher::new();
/// let page = fixtures::card_page("Charizard", "/c/4.jpg");
/// fetcher.set_page("https://x/base/001.shtml", page).await;
/// fetcher.set_failure("https://x/base/002.shtml", FetchError::Timeout).await;
///
/// // ... run a sync ...
///
/// assert_eq!(fetcher.requested_urls().await.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, Result<String, FetchError>>>>,
    requests: Arc<RwLock<Vec<String>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_page(&self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.write().await.insert(url.into(), Ok(body.into()));
    }

    pub async fn set_failure(&self, url: impl Into<String>, error: FetchError) {
        self.pages.write().await.insert(url.into(), Err(error));
    }

    /// Delay every response, e.g. to keep a sync in flight.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    pub async fn requested_urls(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    pub async fn clear_requests(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.write().await.push(url.to_string());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.pages.read().await.get(url) {
            Some(response) => response.clone(),
            None => Err(FetchError::HttpStatus {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}
