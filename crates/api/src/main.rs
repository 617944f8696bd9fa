//! Doctor Finder Record API
//!
//! Main entry point for the HTTP service.

use std::sync::Arc;

use doctorfinder_api::utils::logging::init_tracing;
use doctorfinder_api::{serve, ApiContext};
use doctorfinder_infra::config;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    init_tracing("info")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(err) => debug!(error = %err, "No .env loaded"),
    }

    let config = config::load()?;
    info!(
        port = config.server.port,
        development = config.server.environment.is_development(),
        "Doctor Finder API starting"
    );

    let context = Arc::new(ApiContext::open(&config)?);
    serve(context, config.server.port).await
}
