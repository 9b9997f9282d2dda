//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
}

/// Body of the state-changing API calls.
#[derive(Serialize, Debug, PartialEq)]
pub struct ActionOk {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<Option<u64>>,
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { data, meta: None }))
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(SuccessMany {
            data,
            meta: MetaCount { count },
        }),
    )
}

/// 200 `{"success": true}`.
pub fn action_ok() -> (StatusCode, Json<ActionOk>) {
    (
        StatusCode::OK,
        Json(ActionOk {
            success: true,
            player_id: None,
        }),
    )
}

/// 201 `{"success": true, "player_id": ...}`; the id is `null` when the database reported none.
pub fn created_player(player_id: Option<u64>) -> (StatusCode, Json<ActionOk>) {
    (
        StatusCode::CREATED,
        Json(ActionOk {
            success: true,
            player_id: Some(player_id),
        }),
    )
}
