//! `?limit=` for list pages, rejected through the API error envelope.

use crate::error::AppError;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct RawLimit {
    limit: Option<String>,
}

/// Requested list size. Absent or blank is `None`; values too large for `u32`
/// saturate and are clamped later like any other oversized limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitQuery(pub Option<u32>);

impl LimitQuery {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(LimitQuery(None));
        };
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::BadRequest(format!(
                "limit must be a non-negative integer, got '{}'",
                s
            )));
        }
        // digits only, so parsing fails on overflow alone
        let n = s.parse::<u64>().unwrap_or(u64::MAX);
        Ok(LimitQuery(Some(u32::try_from(n).unwrap_or(u32::MAX))))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for LimitQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawLimit>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Self::parse(raw.limit.as_deref())
    }
}
