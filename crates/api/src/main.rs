use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vislog_api::config::ServerConfig;
use vislog_api::router::build_app_router;
use vislog_api::simulator::Simulator;
use vislog_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vislog_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        failure_rate = config.failure_rate,
        "Loaded server configuration"
    );

    // --- Router ---
    let state = AppState::new(Simulator::new(config.failure_rate));
    let app = build_app_router(state);

    let host = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST {:?}", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!("Starting simulated analysis service on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
