//! Arcade queries and stored-logic calls behind both front-ends. Ranks,
//! achievements and leaderboards are computed by the database; this layer only
//! binds parameters, runs one round trip and shapes the rows.

use crate::error::AppError;
use crate::service::query;
use crate::service::rows::{cell_to_value, rows_to_json, row_to_json};
use crate::sql::{call_procedure, count_rows, scalar_function, statements, BindValue, QueryBuf};
use serde::Serialize;
use serde_json::Value;
use sqlx::MySqlPool;

pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 50;
pub const DEFAULT_SESSION_LIMIT: u32 = 50;
pub const MAX_LIST_LIMIT: u32 = 500;
pub const UNRANKED: &str = "Unranked";

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct HomeStats {
    pub total_players: i64,
    pub total_games: i64,
    pub active_sessions: i64,
    pub total_achievements: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerProfile {
    pub player: Value,
    pub achievements: Vec<Value>,
    pub items: Vec<Value>,
    /// Percentage of all achievements this player has earned.
    pub completion: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameDetail {
    pub game: Value,
    pub levels: Vec<Value>,
    pub sessions: Vec<Value>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionDetail {
    pub session: Value,
    pub scores: Vec<Value>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PlayerStats {
    pub achievement_completion: f64,
    pub inventory_count: i64,
    pub rank: String,
}

/// Clamp a caller-supplied list size to `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(requested: Option<u32>, default: u32) -> u32 {
    requested.unwrap_or(default).clamp(1, MAX_LIST_LIMIT)
}

pub struct ArcadeService;

impl ArcadeService {
    /// Headline counts. A count that fails is logged and shown as 0.
    pub async fn home_stats(pool: &MySqlPool) -> HomeStats {
        HomeStats {
            total_players: Self::count_or_zero(pool, count_rows("player", None)).await,
            total_games: Self::count_or_zero(pool, count_rows("game", None)).await,
            active_sessions: Self::count_or_zero(pool, count_rows("multiplayersession", Some("EndTime IS NULL"))).await,
            total_achievements: Self::count_or_zero(pool, count_rows("achievement", None)).await,
        }
    }

    async fn count_or_zero(pool: &MySqlPool, q: QueryBuf) -> i64 {
        match Self::scalar(pool, &q).await {
            Ok(v) => v.as_i64().unwrap_or(0),
            Err(e) => {
                tracing::warn!(sql = %q.sql, error = %e, "count failed");
                0
            }
        }
    }

    pub async fn list_players(pool: &MySqlPool) -> Result<Vec<Value>, AppError> {
        Self::rows(pool, QueryBuf::new(statements::LIST_PLAYERS)).await
    }

    pub async fn player_profile(pool: &MySqlPool, player_id: i64) -> Result<PlayerProfile, AppError> {
        let id = BindValue::I64(player_id);
        let player = Self::row(pool, QueryBuf::new(statements::PLAYER_BY_ID).with_param(id.clone()))
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".into()))?;
        let achievements = Self::rows(pool, QueryBuf::new(statements::PLAYER_ACHIEVEMENTS).with_param(id.clone())).await?;
        let items = Self::rows(pool, QueryBuf::new(statements::PLAYER_ITEMS).with_param(id)).await?;
        let completion = Self::achievement_completion(pool, player_id).await?;
        Ok(PlayerProfile {
            player,
            achievements,
            items,
            completion,
        })
    }

    /// Rows of `sp_get_leaderboard`, whatever columns the procedure returns.
    pub async fn leaderboard(pool: &MySqlPool, limit: u32) -> Result<Vec<Value>, AppError> {
        let q = call_procedure("sp_get_leaderboard", vec![BindValue::I64(limit as i64)]);
        let rows = query::fetch_all(pool, &q).await?;
        Ok(rows_to_json(&rows))
    }

    pub async fn list_games(pool: &MySqlPool) -> Result<Vec<Value>, AppError> {
        Self::rows(pool, QueryBuf::new(statements::LIST_GAMES)).await
    }

    pub async fn game_detail(pool: &MySqlPool, game_id: i64) -> Result<GameDetail, AppError> {
        let id = BindValue::I64(game_id);
        let game = Self::row(pool, QueryBuf::new(statements::GAME_BY_ID).with_param(id.clone()))
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".into()))?;
        let levels = Self::rows(pool, QueryBuf::new(statements::GAME_LEVELS).with_param(id.clone())).await?;
        let sessions = Self::rows(pool, QueryBuf::new(statements::GAME_RECENT_SESSIONS).with_param(id)).await?;
        Ok(GameDetail { game, levels, sessions })
    }

    pub async fn list_sessions(pool: &MySqlPool, limit: u32) -> Result<Vec<Value>, AppError> {
        Self::rows(
            pool,
            QueryBuf::new(statements::LIST_SESSIONS).with_param(BindValue::I64(limit as i64)),
        )
        .await
    }

    pub async fn session_detail(pool: &MySqlPool, session_id: i64) -> Result<SessionDetail, AppError> {
        let id = BindValue::I64(session_id);
        let session = Self::row(pool, QueryBuf::new(statements::SESSION_BY_ID).with_param(id.clone()))
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".into()))?;
        let scores = Self::rows(pool, QueryBuf::new(statements::SESSION_SCORES).with_param(id)).await?;
        Ok(SessionDetail { session, scores })
    }

    pub async fn list_achievements(pool: &MySqlPool) -> Result<Vec<Value>, AppError> {
        Self::rows(pool, QueryBuf::new(statements::LIST_ACHIEVEMENTS)).await
    }

    pub async fn list_items(pool: &MySqlPool) -> Result<Vec<Value>, AppError> {
        Self::rows(pool, QueryBuf::new(statements::LIST_ITEMS)).await
    }

    /// Runs `sp_register_player` and reads `LAST_INSERT_ID()` on the same
    /// connection. Returns `None` when the procedure did not insert a row.
    pub async fn register_player(
        pool: &MySqlPool,
        username: &str,
        email: &str,
        avatar: &str,
    ) -> Result<Option<u64>, AppError> {
        const PROC: &str = "sp_register_player";
        let mut conn = pool.acquire().await.map_err(AppError::acquire)?;
        let call = call_procedure(
            PROC,
            vec![
                BindValue::String(username.to_string()),
                BindValue::String(email.to_string()),
                BindValue::String(avatar.to_string()),
            ],
        );
        query::execute_on(&mut *conn, &call)
            .await
            .map_err(|e| AppError::procedure(PROC, e))?;
        let row = query::fetch_optional_on(&mut *conn, &QueryBuf::new(statements::LAST_INSERT_ID))
            .await
            .map_err(|e| AppError::procedure(PROC, e))?;
        let id = row.and_then(|r| cell_to_value(&r, 0).as_u64()).filter(|id| *id != 0);
        tracing::info!(username, player_id = ?id, "player registered");
        Ok(id)
    }

    pub async fn award_item(pool: &MySqlPool, player_id: i64, item_id: i64, quantity: i64) -> Result<(), AppError> {
        const PROC: &str = "sp_award_item";
        let q = call_procedure(
            PROC,
            vec![BindValue::I64(player_id), BindValue::I64(item_id), BindValue::I64(quantity)],
        );
        Self::call(pool, PROC, &q).await?;
        tracing::info!(player_id, item_id, quantity, "item awarded");
        Ok(())
    }

    pub async fn complete_session(pool: &MySqlPool, session_id: i64) -> Result<(), AppError> {
        const PROC: &str = "sp_complete_session";
        let q = call_procedure(PROC, vec![BindValue::I64(session_id)]);
        Self::call(pool, PROC, &q).await?;
        tracing::info!(session_id, "session completed");
        Ok(())
    }

    /// Completion, inventory size and rank name; a NULL from any function
    /// reads as 0, 0 or "Unranked".
    pub async fn player_stats(pool: &MySqlPool, player_id: i64) -> Result<PlayerStats, AppError> {
        let achievement_completion = Self::achievement_completion(pool, player_id).await?;
        let inventory_count = Self::scalar(
            pool,
            &scalar_function("fn_player_inventory_count", vec![BindValue::I64(player_id)], "count"),
        )
        .await?
        .as_i64()
        .unwrap_or(0);
        let rank = match Self::scalar(
            pool,
            &scalar_function("fn_get_player_rank", vec![BindValue::I64(player_id)], "rank"),
        )
        .await?
        {
            Value::String(s) => s,
            Value::Null => UNRANKED.to_string(),
            other => other.to_string(),
        };
        Ok(PlayerStats {
            achievement_completion,
            inventory_count,
            rank,
        })
    }

    pub async fn has_achievement(pool: &MySqlPool, player_id: i64, achievement_id: i64) -> Result<bool, AppError> {
        let q = scalar_function(
            "fn_has_achievement",
            vec![BindValue::I64(player_id), BindValue::I64(achievement_id)],
            "has_achievement",
        );
        Ok(truthy(&Self::scalar(pool, &q).await?))
    }

    async fn achievement_completion(pool: &MySqlPool, player_id: i64) -> Result<f64, AppError> {
        let q = scalar_function("fn_achievement_completion", vec![BindValue::I64(player_id)], "completion");
        Ok(Self::scalar(pool, &q).await?.as_f64().unwrap_or(0.0))
    }

    async fn call(pool: &MySqlPool, name: &'static str, q: &QueryBuf) -> Result<(), AppError> {
        query::execute(pool, q).await.map_err(|e| AppError::procedure(name, e))?;
        Ok(())
    }

    async fn scalar(pool: &MySqlPool, q: &QueryBuf) -> Result<Value, AppError> {
        let row = query::fetch_optional(pool, q).await?;
        Ok(row.map(|r| cell_to_value(&r, 0)).unwrap_or(Value::Null))
    }

    async fn row(pool: &MySqlPool, q: QueryBuf) -> Result<Option<Value>, AppError> {
        let row = query::fetch_optional(pool, &q).await?;
        Ok(row.as_ref().map(row_to_json))
    }

    async fn rows(pool: &MySqlPool, q: QueryBuf) -> Result<Vec<Value>, AppError> {
        let rows = query::fetch_all(pool, &q).await?;
        Ok(rows_to_json(&rows))
    }
}

/// Flag-returning SQL functions come back as TINYINT, BIT or text.
fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim(), "1" | "true" | "TRUE" | "\u{1}"),
        _ => false,
    }
}
