use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/filters", post(handlers::apply_filters))
        .route("/api/filters/reset", post(handlers::reset_filters))
        .route("/api/export", get(handlers::export_data))
        .with_state(state)
}
