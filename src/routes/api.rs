//! JSON API routes, mounted under /api.

use crate::handlers::api::{award_item, complete_session, has_achievement, player_stats, register};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

pub fn api_routes(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/award_item", post(award_item))
        .route("/complete_session/:id", post(complete_session))
        .route("/player_stats/:id", get(player_stats))
        .route("/has_achievement/:player_id/:achievement_id", get(has_achievement))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
