//! JSON API: registration, item awards, session completion and player stats.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::parse_id;
use crate::response::{action_ok, created_player};
use crate::service::{ArcadeService, RequestValidator};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// POST /api/register, body `{username, email, avatar?}`.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let req = RequestValidator::register(&body)?;
    let player_id = ArcadeService::register_player(&state.pool, &req.username, &req.email, &req.avatar).await?;
    Ok(created_player(player_id))
}

/// POST /api/award_item, body `{player_id, item_id, quantity?}`.
pub async fn award_item(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let req = RequestValidator::award_item(&body)?;
    ArcadeService::award_item(&state.pool, req.player_id, req.item_id, req.quantity).await?;
    Ok(action_ok())
}

pub async fn complete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Session not found")?;
    ArcadeService::complete_session(&state.pool, id).await?;
    Ok(action_ok())
}

pub async fn player_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Player not found")?;
    Ok(Json(ArcadeService::player_stats(&state.pool, id).await?))
}

#[derive(Serialize)]
struct AchievementCheck {
    player_id: i64,
    achievement_id: i64,
    has_achievement: bool,
}

/// GET /api/has_achievement/:player_id/:achievement_id
pub async fn has_achievement(
    State(state): State<AppState>,
    Path((player_id, achievement_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let player_id = parse_id(&player_id, "Player not found")?;
    let achievement_id = parse_id(&achievement_id, "Achievement not found")?;
    let has_achievement = ArcadeService::has_achievement(&state.pool, player_id, achievement_id).await?;
    Ok(Json(AchievementCheck {
        player_id,
        achievement_id,
        has_achievement,
    }))
}
