//! Promoboard - campaign planning service
//!
//! Main entry point for the HTTP boundary.

use std::sync::Arc;

use promoboard_lib::{router, AppContext};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging FIRST so we can see .env loading
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!("Loaded .env from: {:?}", path),
        Err(e) => tracing::warn!("Could not load .env file: {}", e),
    }

    let config = promoboard_infra::config::load()?;

    // Service-account identity for the "mine" pseudo-filter, until the
    // session layer supplies a per-request user
    let current_user = std::env::var("PROMOBOARD_CURRENT_USER").ok();

    let bind_addr = config.server.bind_addr.clone();
    let ctx = Arc::new(AppContext::new(config, current_user)?);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Promoboard listening");
    axum::serve(listener, router(ctx)).await?;

    Ok(())
}
