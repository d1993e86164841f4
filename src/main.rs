use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use message_board_api::auth::UserRegistry;
use message_board_api::config::AppConfig;
use message_board_api::database::{MemoryStore, MessageStore, PgMessageStore};
use message_board_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("message_board_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting Message Board API in {:?} mode", config.environment);

    let store: Arc<dyn MessageStore> = match config.database.url {
        Some(_) => Arc::new(
            PgMessageStore::connect(&config.database)
                .await
                .context("failed to connect message store")?,
        ),
        None => {
            tracing::warn!("DATABASE_URL not set; messages are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let bind_addr = format!("{}:{}", config.server.bind_addr, config.server.port);
    let state = AppState::new(config, UserRegistry::default(), store)
        .context("failed to initialize auth gate")?;
    let app = message_board_api::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Message Board API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
