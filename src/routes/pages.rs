//! Page view routes.

use crate::handlers::pages::{
    game_detail, games, index, leaderboard, player_detail, players, session_detail, sessions,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/players", get(players))
        .route("/player/:id", get(player_detail))
        .route("/leaderboard", get(leaderboard))
        .route("/games", get(games))
        .route("/game/:id", get(game_detail))
        .route("/sessions", get(sessions))
        .route("/session/:id", get(session_detail))
        .with_state(state)
}
