//! Page views. Each returns the view model the page renders, in the standard envelope.

use crate::error::AppError;
use crate::extractors::LimitQuery;
use crate::handlers::parse_id;
use crate::response::{success_many, success_one};
use crate::service::{clamp_limit, ArcadeService, DEFAULT_LEADERBOARD_LIMIT, DEFAULT_SESSION_LIMIT};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

/// GET /: headline counts. Never fails; missing counts show as 0.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    success_one(ArcadeService::home_stats(&state.pool).await)
}

pub async fn players(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(success_many(ArcadeService::list_players(&state.pool).await?))
}

pub async fn player_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Player not found")?;
    Ok(success_one(ArcadeService::player_profile(&state.pool, id).await?))
}

/// GET /leaderboard?limit=N: rows from `sp_get_leaderboard`.
pub async fn leaderboard(
    State(state): State<AppState>,
    LimitQuery(limit): LimitQuery,
) -> Result<impl IntoResponse, AppError> {
    let limit = clamp_limit(limit, DEFAULT_LEADERBOARD_LIMIT);
    Ok(success_many(ArcadeService::leaderboard(&state.pool, limit).await?))
}

pub async fn games(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(success_many(ArcadeService::list_games(&state.pool).await?))
}

pub async fn game_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Game not found")?;
    Ok(success_one(ArcadeService::game_detail(&state.pool, id).await?))
}

pub async fn sessions(
    State(state): State<AppState>,
    LimitQuery(limit): LimitQuery,
) -> Result<impl IntoResponse, AppError> {
    let limit = clamp_limit(limit, DEFAULT_SESSION_LIMIT);
    Ok(success_many(ArcadeService::list_sessions(&state.pool, limit).await?))
}

pub async fn session_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Session not found")?;
    Ok(success_one(ArcadeService::session_detail(&state.pool, id).await?))
}
