//! Request validation for the JSON API. Only presence and type are checked;
//! range rules (item quantity, score bounds) belong to the database.

use crate::error::AppError;
use serde_json::{Map, Value};

pub const DEFAULT_AVATAR: &str = "default.png";
pub const DEFAULT_QUANTITY: i64 = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct RegisterPlayer {
    pub username: String,
    pub email: String,
    pub avatar: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AwardItem {
    pub player_id: i64,
    pub item_id: i64,
    pub quantity: i64,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Username and email must be non-empty strings; avatar falls back to the default image.
    pub fn register(body: &Value) -> Result<RegisterPlayer, AppError> {
        let obj = as_object(body)?;
        let username = non_empty_str(obj, "username");
        let email = non_empty_str(obj, "email");
        let (Some(username), Some(email)) = (username, email) else {
            return Err(AppError::Validation("Username and email required".into()));
        };
        let avatar = non_empty_str(obj, "avatar").unwrap_or(DEFAULT_AVATAR).to_string();
        Ok(RegisterPlayer {
            username: username.to_string(),
            email: email.to_string(),
            avatar,
        })
    }

    /// player_id and item_id must be present and non-zero; quantity defaults to 1.
    pub fn award_item(body: &Value) -> Result<AwardItem, AppError> {
        let obj = as_object(body)?;
        let player_id = id_field(obj, "player_id")?;
        let item_id = id_field(obj, "item_id")?;
        let (Some(player_id), Some(item_id)) = (player_id, item_id) else {
            return Err(AppError::Validation("Player ID and Item ID required".into()));
        };
        let quantity = match obj.get("quantity") {
            None | Some(Value::Null) => DEFAULT_QUANTITY,
            Some(v) => integer(v).ok_or_else(|| AppError::Validation("quantity must be an integer".into()))?,
        };
        Ok(AwardItem {
            player_id,
            item_id,
            quantity,
        })
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, AppError> {
    body.as_object()
        .ok_or_else(|| AppError::BadRequest("body must be a JSON object".into()))
}

/// The string as sent, unless it is missing or only whitespace.
fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Missing, null and zero all count as absent.
fn id_field(obj: &Map<String, Value>, key: &str) -> Result<Option<i64>, AppError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => {
            let n = integer(v).ok_or_else(|| AppError::Validation(format!("{} must be an integer", key)))?;
            Ok((n != 0).then_some(n))
        }
    }
}

/// Integers, or strings holding one (form posts often send ids as text).
fn integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_requires_username_and_email() {
        let err = RequestValidator::register(&json!({"username": "ana"})).unwrap_err();
        assert_eq!(err.to_string(), "Username and email required");
        assert!(RequestValidator::register(&json!({"username": "  ", "email": "a@b.c"})).is_err());
        assert!(matches!(
            RequestValidator::register(&json!(["ana"])),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn register_defaults_avatar() {
        let req = RequestValidator::register(&json!({"username": "ana", "email": "ana@example.com"})).unwrap();
        assert_eq!(req.avatar, DEFAULT_AVATAR);
        let req = RequestValidator::register(&json!({
            "username": "ana", "email": "ana@example.com", "avatar": "fox.png"
        }))
        .unwrap();
        assert_eq!(req.avatar, "fox.png");
    }

    #[test]
    fn register_passes_values_through_unchanged() {
        let req = RequestValidator::register(&json!({
            "username": " ana ", "email": "ana@example.com ", "avatar": " fox.png"
        }))
        .unwrap();
        assert_eq!(req.username, " ana ");
        assert_eq!(req.email, "ana@example.com ");
        assert_eq!(req.avatar, " fox.png");
    }

    #[test]
    fn award_item_requires_non_zero_ids() {
        let err = RequestValidator::award_item(&json!({"player_id": 0, "item_id": 3})).unwrap_err();
        assert_eq!(err.to_string(), "Player ID and Item ID required");
        assert!(RequestValidator::award_item(&json!({"item_id": 3})).is_err());
        assert!(RequestValidator::award_item(&json!({"player_id": "x", "item_id": 3})).is_err());
    }

    #[test]
    fn award_item_defaults_quantity_and_leaves_range_to_database() {
        let req = RequestValidator::award_item(&json!({"player_id": 4, "item_id": "7"})).unwrap();
        assert_eq!(
            req,
            AwardItem {
                player_id: 4,
                item_id: 7,
                quantity: 1
            }
        );
        let req = RequestValidator::award_item(&json!({"player_id": 4, "item_id": 7, "quantity": 5000})).unwrap();
        assert_eq!(req.quantity, 5000);
    }
}
