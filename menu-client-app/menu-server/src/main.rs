use std::net::SocketAddr;

use anyhow::{bail, Context};
use tracing::{info, warn};

use menu_api::{build_router, AppState};
use menu_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry
    menu_shared::telemetry::init_telemetry(config.telemetry.json);

    info!("{} starting ({})...", config.app.name, config.app.env);
    info!("Backend: {}", config.backend.url);

    let session_secret = session_secret(&config)?;

    // Create App State
    let host: std::net::IpAddr = config.app.host.parse().context("Invalid app.host")?;
    let addr = SocketAddr::from((host, config.app.port));
    let state = AppState::new(config, session_secret)?;

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Production needs a fixed secret so sessions survive restarts.
/// Development falls back to a random one.
fn session_secret(config: &AppConfig) -> anyhow::Result<String> {
    let configured = config.auth.session_secret.trim();
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }
    if config.is_production() {
        bail!("auth.session_secret must be set in production (MENU__AUTH__SESSION_SECRET)");
    }
    warn!("auth.session_secret is empty; using a random secret, sessions end on restart");
    Ok(hex::encode(rand::random::<[u8; 32]>()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
