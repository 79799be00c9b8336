//! HTTP page fetcher backed by reqwest.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::ScraperConfig;

use super::{FetchError, PageFetcher, TokenBucket};

/// Fetches pages over HTTP with a per-request timeout and optional pacing.
pub struct HttpFetcher {
    client: Client,
    limiter: Option<TokenBucket>,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        let limiter = (config.rate_limit_rpm > 0).then(|| TokenBucket::new(config.rate_limit_rpm));

        Ok(Self { client, limiter })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Some(limiter) = &self.limiter {
            limiter.acquire().await;
        }

        debug!(url, "Fetching page");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(e.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_only_when_configured() {
        let unlimited = ScraperConfig {
            rate_limit_rpm: 0,
            ..Default::default()
        };
        assert!(HttpFetcher::new(&unlimited).unwrap().limiter.is_none());

        let paced = ScraperConfig {
            rate_limit_rpm: 30,
            ..Default::default()
        };
        assert!(HttpFetcher::new(&paced).unwrap().limiter.is_some());
    }
}
