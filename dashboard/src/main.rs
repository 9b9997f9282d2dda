//! Terminal dashboard for operators: browse and edit the arcade tables, run the
//! stored procedures, and type ad-hoc SQL.

mod console;
mod menu;
mod render;

use arcade_portal::{connect, ping, DbConfig};
use clap::Parser;
use menu::Dashboard;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arcade-dashboard", version, about = "Interactive arcade database console")]
struct Cli {
    /// Full connection URL; takes precedence over the individual settings.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
    #[arg(long, env = "ARCADE_DB_HOST", default_value = "localhost")]
    host: String,
    #[arg(long, env = "ARCADE_DB_PORT", default_value_t = 3306)]
    port: u16,
    #[arg(long, env = "ARCADE_DB_USER", default_value = "root")]
    user: String,
    #[arg(long, env = "ARCADE_DB_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,
    #[arg(long, env = "ARCADE_DB_NAME", default_value = "arcade")]
    database: String,
}

impl Cli {
    fn db_config(self) -> DbConfig {
        match self.database_url {
            Some(url) if !url.trim().is_empty() => DbConfig::Url(url),
            _ => DbConfig::Parts {
                host: self.host,
                port: self.port,
                user: self.user,
                password: self.password,
                database: self.database,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    // stdout belongs to the menus
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let db = Cli::parse().db_config();
    let pool = connect(&db)?;
    if let Err(e) = ping(&pool).await {
        eprintln!("warning: {} ({})", e, db.describe());
    }

    let mut dashboard = Dashboard::new(pool, BufReader::new(tokio::io::stdin()), std::io::stdout());
    dashboard.run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_wins_over_parts() {
        let cli = Cli::parse_from(["arcade-dashboard", "--database-url", "mysql://a@h/db", "--host", "other"]);
        assert!(matches!(cli.db_config(), DbConfig::Url(u) if u == "mysql://a@h/db"));
    }

    #[test]
    fn parts_are_used_without_url() {
        let cli = Cli::parse_from(["arcade-dashboard", "--database-url", "", "--host", "db.local", "--port", "3307"]);
        match cli.db_config() {
            DbConfig::Parts { host, port, database, .. } => {
                assert_eq!(host, "db.local");
                assert_eq!(port, 3307);
                assert_eq!(database, "arcade");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
