use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/live", get(handlers::get_live))
        .route("/api/export", get(handlers::get_export))
        .route("/api/share", get(handlers::get_share))
        .with_state(state)
}
