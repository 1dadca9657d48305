/// Roster - user account and profile service
///
/// A minimal REST API for account registration, authentication, and
/// profile management backed by a relational store.

mod account;
mod api;
mod auth;
mod config;
mod context;
mod db;
mod error;
mod profile;
mod server;

use config::ServerConfig;
use context::AppContext;
use error::ApiResult;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ApiResult<()> {
    print_banner();

    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize logging with the configured level (RUST_LOG wins)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.logging.level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create application context
    let ctx = AppContext::new(config).await?;

    // Start server
    server::serve(ctx).await?;

    Ok(())
}

fn print_banner() {
    println!("roster v{} - account & profile service", env!("CARGO_PKG_VERSION"));
}
