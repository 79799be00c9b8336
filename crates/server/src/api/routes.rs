use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::middleware::{auth_middleware, metrics_middleware};
use super::{catalog, handlers, lookup, sets};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog
        .route(
            "/catalog/sync",
            post(catalog::trigger_sync).get(catalog::sync_status),
        )
        .route("/catalog/reload", post(catalog::reload_catalog))
        .route("/catalog/stats", get(catalog::get_stats))
        // Set registry
        .route("/sets", get(sets::list_sets).post(sets::add_set))
        // Lookup
        .route("/lookup", post(lookup::lookup_cards))
        .route("/lookup/page", post(lookup::step_page))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth_middleware,
        ))
        .with_state(Arc::clone(&state));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
