//! Connection pool for the arcade database. The schema and its stored logic are
//! external; nothing here creates or migrates tables.

use crate::error::AppError;
use crate::settings::DbConfig;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the shared pool. Connections are opened lazily on first use, so a
/// server can start while the database is still down.
pub fn connect(config: &DbConfig) -> Result<MySqlPool, AppError> {
    connect_with_timeout(config, ACQUIRE_TIMEOUT)
}

pub fn connect_with_timeout(config: &DbConfig, acquire_timeout: Duration) -> Result<MySqlPool, AppError> {
    let opts = config.connect_options()?;
    tracing::info!(target_db = %config.describe(), "configuring database pool");
    Ok(MySqlPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(acquire_timeout)
        .connect_lazy_with(opts))
}

/// Round trip to the server.
pub async fn ping(pool: &MySqlPool) -> Result<(), AppError> {
    sqlx::query("SELECT 1")
        .fetch_optional(pool)
        .await
        .map_err(AppError::acquire)?;
    Ok(())
}
