//! End-to-end tests with mocked external dependencies.
//!
//! These tests run the full server stack in-process with a mock page fetcher
//! and a catalog persisted to a temporary directory.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{fixtures, TestFixture, OPERATOR};

const USER: &str = "5150";

/// Fixture with one three-page "Base" set and its pages served by the mock.
async fn base_fixture() -> TestFixture {
    let fixture = TestFixture::with_sets(vec![fixtures::card_set("Base", 3)]).await;
    let pages = [
        fixtures::card_page("Charizard", "/img/base/1.jpg"),
        fixtures::card_page("Charizard ex", "/img/base/2.jpg"),
        fixtures::card_page("Blastoise", "/img/base/3.jpg"),
    ];
    for (i, page) in pages.into_iter().enumerate() {
        fixture
            .fetcher
            .set_page(fixtures::page_url("Base", i as u32 + 1), page)
            .await;
    }
    fixture
}

async fn synced_fixture() -> TestFixture {
    let fixture = base_fixture().await;
    let response = fixture
        .post_as(OPERATOR, "/api/v1/catalog/sync?wait=true", json!({}))
        .await;
    assert_status!(response, StatusCode::OK);
    fixture
}

async fn wait_for_idle(fixture: &TestFixture) -> Value {
    for _ in 0..200 {
        let response = fixture.get("/api/v1/catalog/sync").await;
        if response.body["running"] == false && !response.body["last_report"].is_null() {
            return response.body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("sync did not finish");
}

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_is_sanitized() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["auth"]["method"], "none");
    assert_eq!(response.body["auth"]["api_key_configured"], false);
    assert_eq!(response.body["auth"]["operator_id"], OPERATOR);
    assert!(response.body["auth"].get("api_key").is_none());
    assert_eq!(response.body["scraper"]["base_origin"], fixtures::ORIGIN);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = synced_fixture().await;
    let (status, body) = fixture.get_text("/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("cardex_catalog_cards"));
    assert!(body.contains("cardex_sync_runs_total"));
    assert!(body.contains("cardex_http_requests_total"));
}

// =============================================================================
// Set Registry Tests
// =============================================================================

#[tokio::test]
async fn test_operator_adds_set() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_as(
            OPERATOR,
            "/api/v1/sets",
            json!({"name": "Jungle", "baseURL": "https://cards.test/card/jungle/", "length": 64}),
        )
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["name"], "Jungle");
    assert_eq!(response.body["scraped"], false);

    let list = fixture.get("/api/v1/sets").await;
    assert_eq!(list.body["total"], 1);
    assert_eq!(list.body["sets"][0]["baseURL"], "https://cards.test/card/jungle/");
}

#[tokio::test]
async fn test_non_operator_cannot_add_set() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_as(
            USER,
            "/api/v1/sets",
            json!({"name": "Jungle", "baseURL": "https://x/", "length": 64}),
        )
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let anonymous = fixture
        .post(
            "/api/v1/sets",
            json!({"name": "Jungle", "baseURL": "https://x/", "length": 64}),
        )
        .await;
    assert_status!(anonymous, StatusCode::FORBIDDEN);

    assert_eq!(fixture.get("/api/v1/sets").await.body["total"], 0);
}

#[tokio::test]
async fn test_duplicate_and_invalid_sets_rejected() {
    let fixture = TestFixture::with_sets(vec![fixtures::card_set("Base", 3)]).await;

    let duplicate = fixture
        .post_as(
            OPERATOR,
            "/api/v1/sets",
            json!({"name": "Base", "baseURL": "https://x/", "length": 3}),
        )
        .await;
    assert_status!(duplicate, StatusCode::CONFLICT);

    let invalid = fixture
        .post_as(
            OPERATOR,
            "/api/v1/sets",
            json!({"name": "Fossil", "baseURL": "https://x/", "length": 0}),
        )
        .await;
    assert_status!(invalid, StatusCode::BAD_REQUEST);
    assert!(invalid.body["error"].as_str().unwrap().contains("length"));
}

// =============================================================================
// Sync Tests
// =============================================================================

#[tokio::test]
async fn test_sync_with_wait_returns_report() {
    let fixture = base_fixture().await;

    let response = fixture
        .post_as(OPERATOR, "/api/v1/catalog/sync?wait=true", json!({}))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "completed");
    let report = &response.body["report"];
    assert_eq!(report["scraped_sets"], 1);
    assert_eq!(report["cards_added"], 3);
    assert_eq!(report["sets"][0]["name"], "Base");

    let stats = fixture.get("/api/v1/catalog/stats").await;
    assert_eq!(stats.body["cards"], 3);
    assert_eq!(stats.body["scraped_sets"], 1);

    let sets = fixture.get("/api/v1/sets").await;
    assert_eq!(sets.body["sets"][0]["scraped"], true);
}

#[tokio::test]
async fn test_non_operator_cannot_sync() {
    let fixture = base_fixture().await;

    let response = fixture
        .post_as(USER, "/api/v1/catalog/sync?wait=true", json!({}))
        .await;

    assert_status!(response, StatusCode::FORBIDDEN);
    assert!(fixture.fetcher.requested_urls().await.is_empty());
}

#[tokio::test]
async fn test_background_sync_and_status() {
    let fixture = base_fixture().await;

    let response = fixture
        .post_as(OPERATOR, "/api/v1/catalog/sync", json!({}))
        .await;
    assert_status!(response, StatusCode::ACCEPTED);
    assert_eq!(response.body["status"], "started");

    let status = wait_for_idle(&fixture).await;
    assert_eq!(status["last_report"]["cards_added"], 3);
    assert_eq!(fixture.get("/api/v1/catalog/stats").await.body["cards"], 3);
}

#[tokio::test]
async fn test_overlapping_sync_conflicts() {
    let fixture = base_fixture().await;
    fixture.fetcher.set_delay(Duration::from_millis(100)).await;

    let first = fixture
        .post_as(OPERATOR, "/api/v1/catalog/sync", json!({}))
        .await;
    assert_status!(first, StatusCode::ACCEPTED);

    let second = fixture
        .post_as(OPERATOR, "/api/v1/catalog/sync?wait=true", json!({}))
        .await;
    assert_status!(second, StatusCode::CONFLICT);

    let status = fixture.get("/api/v1/catalog/sync").await;
    assert_eq!(status.body["running"], true);

    wait_for_idle(&fixture).await;
}

#[tokio::test]
async fn test_waited_sync_survives_dropped_request() {
    let fixture = base_fixture().await;
    fixture.fetcher.set_delay(Duration::from_millis(50)).await;

    let abandoned = tokio::time::timeout(
        Duration::from_millis(75),
        fixture.post_as(OPERATOR, "/api/v1/catalog/sync?wait=true", json!({})),
    )
    .await;
    assert!(abandoned.is_err(), "request should time out before the run ends");

    let status = wait_for_idle(&fixture).await;
    assert_eq!(status["last_report"]["scraped_sets"], 1);
    assert_eq!(status["last_report"]["cards_added"], 3);
    assert_eq!(fixture.fetcher.requested_urls().await.len(), 3);

    let sets = fixture.get("/api/v1/sets").await;
    assert_eq!(sets.body["sets"][0]["scraped"], true);
}

#[tokio::test]
async fn test_reload_picks_up_external_edits() {
    let fixture = synced_fixture().await;

    let edited = json!([{"name": "Pikachu", "image": "https://cards.test/img/p.jpg"}]);
    std::fs::write(fixture.catalog_path(), edited.to_string()).unwrap();

    let forbidden = fixture.post_as(USER, "/api/v1/catalog/reload", json!({})).await;
    assert_status!(forbidden, StatusCode::FORBIDDEN);
    assert_eq!(fixture.get("/api/v1/catalog/stats").await.body["cards"], 3);

    let response = fixture
        .post_as(OPERATOR, "/api/v1/catalog/reload", json!({}))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["cards"], 1);
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[tokio::test]
async fn test_lookup_single_match() {
    let fixture = synced_fixture().await;

    let response = fixture
        .post_as(USER, "/api/v1/lookup", json!({"text": "look at [[Blastoise]]!"}))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["type"], "single");
    assert_eq!(response.body["card"]["name"], "Blastoise");
    assert_eq!(
        response.body["card"]["image"],
        "https://cards.test/img/base/3.jpg"
    );
}

#[tokio::test]
async fn test_lookup_paged_and_step() {
    let fixture = synced_fixture().await;

    let response = fixture
        .post_as(USER, "/api/v1/lookup", json!({"text": "[[charizard]]"}))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["type"], "paged");
    assert_eq!(response.body["total"], 2);
    assert_eq!(response.body["index"], 0);
    assert_eq!(response.body["card"]["name"], "Charizard");
    assert_eq!(response.body["buttons"][0]["current"], true);

    let token = response.body["buttons"][1]["token"].as_str().unwrap().to_string();

    let next = fixture
        .post_as(USER, "/api/v1/lookup/page", json!({"token": token}))
        .await;
    assert_status!(next, StatusCode::OK);
    assert_eq!(next.body["index"], 1);
    assert_eq!(next.body["card"]["name"], "Charizard EX");
    assert_eq!(next.body["buttons"][1]["current"], true);
}

#[tokio::test]
async fn test_page_step_ignored_for_other_user_and_garbage() {
    let fixture = synced_fixture().await;

    let response = fixture
        .post_as(USER, "/api/v1/lookup", json!({"text": "[[charizard]]"}))
        .await;
    let token = response.body["buttons"][1]["token"].as_str().unwrap().to_string();

    let other = fixture
        .post_as("777", "/api/v1/lookup/page", json!({"token": token}))
        .await;
    assert_status!(other, StatusCode::NO_CONTENT);

    let garbage = fixture
        .post_as(USER, "/api/v1/lookup/page", json!({"token": "not-a-token"}))
        .await;
    assert_status!(garbage, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_lookup_group_and_no_match() {
    let fixture = synced_fixture().await;

    let group = fixture
        .post_as(
            USER,
            "/api/v1/lookup",
            json!({"text": "[[Blastoise]] vs [[Charizard EX]] vs [[Mewtwo]]"}),
        )
        .await;
    assert_status!(group, StatusCode::OK);
    assert_eq!(group.body["type"], "group");
    let names: Vec<_> = group.body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Blastoise", "Charizard EX"]);

    let none = fixture
        .post_as(USER, "/api/v1/lookup", json!({"text": "[[Mewtwo]] and no other markers"}))
        .await;
    assert_status!(none, StatusCode::OK);
    assert_eq!(none.body["type"], "no_match");
}

#[tokio::test]
async fn test_lookup_against_empty_catalog() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_as(USER, "/api/v1/lookup", json!({"text": "[[Charizard]]"}))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["type"], "no_match");
}
