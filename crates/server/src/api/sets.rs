//! Set registry API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use cardex_core::{CardSet, CatalogError};
use serde::{Deserialize, Serialize};

use super::handlers::{api_error, require_operator, ApiError};
use super::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SetListResponse {
    pub sets: Vec<CardSet>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddSetRequest {
    pub name: String,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub length: u32,
}

/// GET /api/v1/sets
pub async fn list_sets(State(state): State<Arc<AppState>>) -> Json<SetListResponse> {
    let sets = state.catalog().list_sets();
    let total = sets.len();
    Json(SetListResponse { sets, total })
}

/// POST /api/v1/sets
///
/// Register a new, unscraped set. Operator only.
pub async fn add_set(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<AddSetRequest>,
) -> Result<(StatusCode, Json<CardSet>), ApiError> {
    require_operator(&state, &user_id, "register a set")?;

    let set = CardSet::new(request.name, request.base_url, request.length);
    match state.catalog().add_set(set).await {
        Ok(set) => Ok((StatusCode::CREATED, Json(set))),
        Err(e @ CatalogError::InvalidSet(_)) => Err(api_error(StatusCode::BAD_REQUEST, e)),
        Err(e @ CatalogError::DuplicateSet(_)) => Err(api_error(StatusCode::CONFLICT, e)),
        Err(e) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}
