pub mod graph;
pub mod history;
pub mod preferences;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Chart data
        .route("/api/graph/daily", get(graph::daily))
        .route("/api/graph/monthly", get(graph::monthly))
        .route("/api/graph/yearly", get(graph::yearly))
        // History listing and its filters
        .route("/api/history", get(history::index))
        .route("/api/filter", get(history::resolve_filter))
        .route("/api/filter/toggle-sort", post(history::toggle_sort))
        // Preferences
        .route(
            "/api/preferences",
            get(preferences::show).post(preferences::update),
        )
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
