//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock page fetcher and an on-disk catalog in a temporary directory.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use cardex_core::config::{
    AuthConfig, MatcherConfig, ScraperConfig, ServerConfig, StorageConfig, SyncConfig,
};
use cardex_core::testing::MockFetcher;
use cardex_core::{
    AuthMethod, CardExtractor, CardSet, CatalogManager, CatalogStore, Config, JsonCatalogStore,
    NoneAuthenticator, SyncOrchestrator,
};

/// Re-export fixtures for test convenience
pub use cardex_core::testing::fixtures;

/// Requester id configured as the operator.
pub const OPERATOR: &str = "100";

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_add_set() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post_as(OPERATOR, "/api/v1/sets", json!({
///         "name": "Base", "baseURL": "https://x/base/", "length": 102
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock fetcher - configure set pages
    pub fetcher: MockFetcher,
    /// Temporary directory holding the catalog files
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture with an empty registry.
    pub async fn new() -> Self {
        Self::with_sets(vec![]).await
    }

    /// Create a fixture whose registry starts with `sets`.
    pub async fn with_sets(sets: Vec<CardSet>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog_path = temp_dir.path().join("cards.json");
        let sets_path = temp_dir.path().join("sets.json");

        let store = JsonCatalogStore::new(&catalog_path, &sets_path);
        store.save_sets(&sets).expect("Failed to seed set registry");

        let config = Config {
            auth: AuthConfig {
                method: AuthMethod::None,
                api_key: None,
                operator_id: OPERATOR.to_string(),
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            storage: StorageConfig {
                catalog_path,
                sets_path,
            },
            scraper: ScraperConfig {
                base_origin: fixtures::ORIGIN.to_string(),
                ..Default::default()
            },
            sync: SyncConfig::default(),
            matcher: MatcherConfig::default(),
        };

        let catalog =
            Arc::new(CatalogManager::open(Box::new(store)).expect("Failed to open catalog"));
        let fetcher = MockFetcher::new();
        let orchestrator = Arc::new(SyncOrchestrator::new(
            Arc::clone(&catalog),
            Arc::new(fetcher.clone()),
            CardExtractor::new(config.scraper.base_origin.clone()),
            config.scraper.page_suffix.clone(),
            config.sync.max_concurrent_sets,
        ));

        let state = Arc::new(cardex_server::state::AppState::new(
            config,
            Arc::new(NoneAuthenticator),
            catalog,
            orchestrator,
        ));

        let router = cardex_server::api::create_router(state);

        Self {
            router,
            fetcher,
            temp_dir,
        }
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.temp_dir.path().join("cards.json")
    }

    /// Send an anonymous GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    /// Send an anonymous POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), None).await
    }

    /// Send a POST request with JSON body as `user`.
    pub async fn post_as(&self, user: &str, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), Some(user)).await
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<&str>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        if let Some(user) = user {
            request_builder = request_builder.header("X-Requester-Id", user);
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
