//! Picko Gateway Server
//!
//! Run with: cargo run --bin picko
//!
//! # Configuration
//!
//! Read from `--config`, `PICKO_CONFIG` or the default locations, then
//! overridden by environment variables:
//! - `API_BASE_URL`: Backend API (default: http://localhost:8010)
//! - `PUBLIC_CHRISTMAS_THEME`: "true" enables festive decorations
//! - `PICKO_HOST`: Host to bind to (default: 0.0.0.0)
//! - `PICKO_PORT`: Port to listen on (default: 3000)
//! - `PICKO_LOG_LEVEL`, `PICKO_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Takes precedence over the configured level

use anyhow::Context;
use clap::Parser;
use picko::api::{serve, AppState};
use picko::client::ReqwestFetch;
use picko::config::{Config, LoggingConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "picko")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Picko gift-exchange gateway")]
struct Args {
    /// Config file (default: PICKO_CONFIG or the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    tracing::info!("Starting Picko gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend API: {}", config.backend.api_base_url);
    tracing::info!("Christmas theme: {}", config.theme.christmas);

    let state = AppState::from_config(&config, Arc::new(ReqwestFetch::new()));

    // Run server
    serve(state, &config.server)
        .await
        .context("gateway server failed")?;

    tracing::info!("Picko gateway stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("picko={},tower_http=debug", logging.level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
