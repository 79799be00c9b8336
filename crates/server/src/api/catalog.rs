//! Catalog API handlers: sync, reload and statistics.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use cardex_core::{CatalogStats, SyncError, SyncReport, SyncStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::handlers::{api_error, require_operator, ApiError};
use super::middleware::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SyncParams {
    /// Block until the run finishes and return its report.
    #[serde(default)]
    pub wait: bool,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// "started" or "completed".
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SyncReport>,
}

fn sync_error(e: SyncError) -> ApiError {
    match e {
        SyncError::AlreadyRunning => api_error(StatusCode::CONFLICT, e),
        SyncError::Catalog(_) => api_error(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/catalog/sync
///
/// Scrape every unscraped set. Operator only. With `wait=true` the response
/// carries the report; the run itself continues if the caller goes away.
pub async fn trigger_sync(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<SyncParams>,
) -> Result<(StatusCode, Json<SyncResponse>), ApiError> {
    require_operator(&state, &user_id, "sync the catalog")?;

    // Detached: dropping the request only drops the waiter.
    let handle = state.orchestrator().spawn_sync().map_err(sync_error)?;
    info!(user_id = %user_id, wait = params.wait, "Catalog sync started");

    if !params.wait {
        return Ok((
            StatusCode::ACCEPTED,
            Json(SyncResponse {
                status: "started".to_string(),
                report: None,
            }),
        ));
    }

    let report = handle
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?
        .map_err(sync_error)?;
    Ok((
        StatusCode::OK,
        Json(SyncResponse {
            status: "completed".to_string(),
            report: Some(report),
        }),
    ))
}

/// GET /api/v1/catalog/sync
///
/// Whether a sync is running, and the report of the last completed one.
pub async fn sync_status(State(state): State<Arc<AppState>>) -> Json<SyncStatus> {
    Json(state.orchestrator().status().await)
}

/// POST /api/v1/catalog/reload
///
/// Re-read the persisted catalog into memory. Operator only.
pub async fn reload_catalog(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CatalogStats>, ApiError> {
    require_operator(&state, &user_id, "reload the catalog")?;

    state
        .catalog()
        .reload()
        .await
        .map(Json)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))
}

/// GET /api/v1/catalog/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(state.catalog().stats())
}
