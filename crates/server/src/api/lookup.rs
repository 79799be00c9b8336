//! Card lookup API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardex_core::{lookup, pagination, LookupReply};
use serde::Deserialize;

use super::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    /// Free text containing `[[Name]]` markers.
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PageRequest {
    pub token: String,
}

/// POST /api/v1/lookup
pub async fn lookup_cards(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<LookupRequest>,
) -> Json<LookupReply> {
    let snapshot = state.catalog().snapshot();
    Json(lookup(
        &snapshot.cards,
        state.matcher(),
        &request.text,
        &user_id,
        state.config().matcher.max_group_size,
    ))
}

/// POST /api/v1/lookup/page
///
/// Step to the page a selector button points at. Stale, forged or foreign
/// tokens get 204 and the caller leaves its view as is.
pub async fn step_page(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<PageRequest>,
) -> Response {
    let snapshot = state.catalog().snapshot();
    match pagination::step(&snapshot.cards, state.matcher(), &request.token, &user_id) {
        Some(view) => Json(view).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
