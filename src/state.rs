//! Shared application state for all routes.

use sqlx::MySqlPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
}

impl AppState {
    pub fn new(pool: MySqlPool) -> Self {
        AppState { pool }
    }
}
