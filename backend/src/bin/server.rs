//! Heatwise HTTP Server Binary
//!
//! Loads configuration, builds the repository, and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! # Defaults (in-memory store seeded with the demo shelters)
//! cargo run --bin heatwise-server
//!
//! # Empty store on another port
//! PORT=9000 HEATWISE_SEED=false cargo run --bin heatwise-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (overrides `[server].host`, default 0.0.0.0)
//! - `PORT`: Server port (overrides `[server].port`, default 8080)
//! - `HEATWISE_SEED`: Seed sample data (overrides `[storage].seed_sample_data`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use heatwise::config::AppConfig;
use heatwise::db::RepositoryFactory;
use heatwise::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Heatwise HTTP Server");

    let config = AppConfig::load()?;
    let repository = RepositoryFactory::create(&config.storage)?;
    info!(
        "Repository initialized (type={}, seeded={})",
        config.storage.storage_type, config.storage.seed_sample_data
    );

    let addr: SocketAddr = config.server.bind_address().parse()?;
    let app = create_router(AppState::with_config(repository, config));

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
