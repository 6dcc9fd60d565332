//! # CourseDeck API Server
//!
//! Serves the course catalogue, todo board, flashcards, pomodoro timers and
//! recommendations over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! API_PORT=8080 SEED_DEMO_DATA=true cargo run -p coursedeck-api
//! ```

use chrono::Utc;
use coursedeck_api::{
    app::{build_router, AppState},
    config::Config,
};
use coursedeck_shared::store::{seed, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursedeck_api=debug,coursedeck_shared=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "CourseDeck API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let mut store = Store::new();
    if config.seed_demo_data {
        seed::demo(&mut store, Utc::now());
    }

    let address = config.bind_address();
    let app = build_router(AppState::with_store(store, config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
