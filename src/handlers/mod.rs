//! HTTP handlers for page views and the JSON API.

pub mod api;
pub mod pages;

use crate::error::AppError;

/// Path ids are unsigned integers that fit a signed BIGINT; anything else is
/// treated as a missing resource, the same as an id that matches no row.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<i64, AppError> {
    raw.parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| AppError::NotFound(not_found.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_unsigned_integers() {
        assert_eq!(parse_id("42", "Player not found").unwrap(), 42);
        assert!(matches!(parse_id("-1", "Player not found"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_id("abc", "Game not found"), Err(AppError::NotFound(m)) if m == "Game not found"));
    }

    #[test]
    fn ids_cover_the_bigint_range() {
        assert_eq!(parse_id("4294967296", "Player not found").unwrap(), 4_294_967_296);
        assert_eq!(parse_id("9223372036854775807", "Player not found").unwrap(), i64::MAX);
        assert!(matches!(
            parse_id("9223372036854775808", "Player not found"),
            Err(AppError::NotFound(_))
        ));
    }
}
