//! Arcade portal: web front-end and query services over the arcade MySQL database.
//! Game logic lives in the database's stored procedures, functions and triggers.

pub mod catalog;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use response::{success_many, success_one};
pub use routes::app_router;
pub use service::{ArcadeService, CrudService};
pub use settings::{DbConfig, ServerConfig};
pub use state::AppState;
pub use store::{connect, ping};
