//! Router assembly for the web application.

mod api;
mod common;
mod pages;

pub use api::api_routes;
pub use common::common_routes;
pub use pages::page_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Pages at the root, the JSON API under /api, plus health/readiness/version.
pub fn app_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(page_routes(state.clone()))
        .nest("/api", api_routes(state, body_limit))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".into())
}
