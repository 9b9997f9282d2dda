//! Database and server settings resolved from environment variables.
//!
//! `DATABASE_URL` takes precedence over the individual `ARCADE_DB_*` keys.

use crate::error::ConfigError;
use sqlx::mysql::MySqlConnectOptions;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DbConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        database: String,
    },
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            return Ok(DbConfig::Url(url));
        }
        let port_raw = lookup("ARCADE_DB_PORT").unwrap_or_else(|| "3306".into());
        let port = port_raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: "ARCADE_DB_PORT",
            value: port_raw.clone(),
        })?;
        Ok(DbConfig::Parts {
            host: lookup("ARCADE_DB_HOST").unwrap_or_else(|| "localhost".into()),
            port,
            user: lookup("ARCADE_DB_USER").unwrap_or_else(|| "root".into()),
            password: lookup("ARCADE_DB_PASSWORD").unwrap_or_default(),
            database: lookup("ARCADE_DB_NAME").unwrap_or_else(|| "arcade".into()),
        })
    }

    pub fn connect_options(&self) -> Result<MySqlConnectOptions, ConfigError> {
        match self {
            DbConfig::Url(url) => {
                MySqlConnectOptions::from_str(url).map_err(|e| ConfigError::DatabaseUrl(e.to_string()))
            }
            DbConfig::Parts {
                host,
                port,
                user,
                password,
                database,
            } => {
                let mut opts = MySqlConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .username(user)
                    .database(database);
                if !password.is_empty() {
                    opts = opts.password(password);
                }
                Ok(opts)
            }
        }
    }

    /// Target description for logs; never includes the password.
    pub fn describe(&self) -> String {
        match self {
            DbConfig::Url(url) => match url.rfind('@') {
                Some(at) => format!("mysql://…{}", &url[at..]),
                None => url.clone(),
            },
            DbConfig::Parts {
                host,
                port,
                user,
                database,
                ..
            } => format!("mysql://{}@{}:{}/{}", user, host, port, database),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Maximum accepted JSON body size in bytes.
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("ARCADE_BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind = bind_raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: "ARCADE_BIND",
            value: bind_raw.clone(),
        })?;
        let body_limit = match lookup("ARCADE_BODY_LIMIT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "ARCADE_BODY_LIMIT",
                value: raw.clone(),
            })?,
            None => DEFAULT_BODY_LIMIT,
        };
        Ok(ServerConfig { bind, body_limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_arcade_schema() {
        let cfg = DbConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            cfg,
            DbConfig::Parts {
                host: "localhost".into(),
                port: 3306,
                user: "root".into(),
                password: String::new(),
                database: "arcade".into(),
            }
        );
        assert_eq!(cfg.describe(), "mysql://root@localhost:3306/arcade");
    }

    #[test]
    fn database_url_wins_over_parts() {
        let cfg = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "mysql://u:pw@db:3307/arcade"),
            ("ARCADE_DB_HOST", "ignored"),
        ]))
        .unwrap();
        assert_eq!(cfg, DbConfig::Url("mysql://u:pw@db:3307/arcade".into()));
        assert!(!cfg.describe().contains("pw"));
        assert!(cfg.connect_options().is_ok());
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = DbConfig::from_lookup(lookup(&[("ARCADE_DB_PORT", "mysql")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "ARCADE_DB_PORT", .. }));
    }

    #[test]
    fn server_defaults_and_overrides() {
        let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind.port(), 5000);
        assert_eq!(cfg.body_limit, DEFAULT_BODY_LIMIT);

        let cfg = ServerConfig::from_lookup(lookup(&[
            ("ARCADE_BIND", "127.0.0.1:8080"),
            ("ARCADE_BODY_LIMIT", "1024"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.body_limit, 1024);

        assert!(ServerConfig::from_lookup(lookup(&[("ARCADE_BODY_LIMIT", "lots")])).is_err());
    }
}
