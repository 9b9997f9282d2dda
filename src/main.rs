//! Web server: pages at /, JSON API under /api.

use arcade_portal::{app_router, connect, AppState, DbConfig, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("arcade_portal=info,tower_http=info")),
        )
        .init();

    let db = DbConfig::from_env()?;
    let server = ServerConfig::from_env()?;
    let pool = connect(&db)?;
    if let Err(e) = arcade_portal::ping(&pool).await {
        tracing::warn!(error = %e, "database not reachable yet; serving anyway");
    }

    let app = app_router(AppState::new(pool), server.body_limit);
    let listener = TcpListener::bind(server.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix. A handler that cannot be installed
/// is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::signal::unix::{signal, SignalKind};

    #[tokio::test]
    async fn sigterm_resolves_shutdown() {
        // keeps the process alive once SIGTERM arrives
        let _installed = signal(SignalKind::terminate()).unwrap();
        let shutdown = tokio::spawn(shutdown_signal());
        tokio::time::sleep(Duration::from_millis(100)).await;

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), shutdown)
            .await
            .expect("shutdown did not resolve")
            .unwrap();
    }
}
