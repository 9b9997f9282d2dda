//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    /// No connection could be obtained from the pool.
    #[error("Database connection failed")]
    Unavailable(#[source] sqlx::Error),
    /// A stored procedure rejected the call; the driver's text is shown to the caller.
    #[error("{source}")]
    Procedure {
        name: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    /// Wrap a driver error raised while running `procedure`. Connection-level
    /// failures stay `Unavailable` so they keep their 500 status.
    pub fn procedure(name: &'static str, source: sqlx::Error) -> Self {
        if is_connection_error(&source) {
            AppError::Unavailable(source)
        } else {
            AppError::Procedure { name, source }
        }
    }

    /// Classify a pool/driver error that happened before any statement ran.
    pub fn acquire(source: sqlx::Error) -> Self {
        if is_connection_error(&source) {
            AppError::Unavailable(source)
        } else {
            AppError::Db(source)
        }
    }

    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Unavailable(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_unavailable"),
            AppError::Procedure { .. } => (StatusCode::BAD_REQUEST, "procedure_error"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else if is_connection_error(e) {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_unavailable")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
        }
    }

    /// Message shown to clients. Plain query failures are not echoed back.
    fn public_message(&self) -> String {
        match self {
            AppError::Db(sqlx::Error::RowNotFound) => "not found".to_string(),
            AppError::Db(e) if is_connection_error(e) => "Database connection failed".to_string(),
            AppError::Db(_) => "Database query failed".to_string(),
            AppError::Config(_) => "Server misconfigured".to_string(),
            other => other.to_string(),
        }
    }
}

/// True for failures reaching the server at all, as opposed to errors the
/// server returned for a statement.
pub fn is_connection_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Configuration(_)
    )
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if let AppError::Procedure { name, source } = &self {
            tracing::warn!(code, procedure = *name, error = %source, "stored procedure rejected call");
        } else if status.is_server_error() {
            tracing::error!(code, error = ?self, "request failed");
        } else {
            tracing::warn!(code, error = %self, "request rejected");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.public_message(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            AppError::NotFound("Player not found".into()).status_and_code().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("Username and email required".into()).status_and_code().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unavailable(sqlx::Error::PoolTimedOut).status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "database_unavailable")
        );
        assert_eq!(
            AppError::Db(sqlx::Error::RowNotFound).status_and_code().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Db(sqlx::Error::Protocol("bad packet".into())).status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
        );
    }

    #[test]
    fn procedure_failure_is_a_bad_request_with_driver_text() {
        let err = AppError::procedure("sp_award_item", sqlx::Error::Protocol("Quantity out of range".into()));
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "procedure_error"));
        assert!(err.public_message().contains("Quantity out of range"));
    }

    #[test]
    fn procedure_connection_failure_stays_unavailable() {
        let err = AppError::procedure("sp_complete_session", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::Unavailable(_)));
        assert_eq!(err.public_message(), "Database connection failed");
    }

    #[test]
    fn query_failures_are_not_echoed() {
        let err = AppError::Db(sqlx::Error::Protocol("secret detail".into()));
        assert_eq!(err.public_message(), "Database query failed");
    }

    #[tokio::test]
    async fn envelope_carries_only_code_and_message() {
        let err = AppError::procedure("sp_award_item", sqlx::Error::Protocol("Quantity out of range".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let detail = body["error"].as_object().unwrap();
        assert_eq!(detail.keys().collect::<Vec<_>>(), ["code", "message"]);
        assert_eq!(detail["code"], "procedure_error");
        assert!(detail["message"].as_str().unwrap().contains("Quantity out of range"));
    }
}
