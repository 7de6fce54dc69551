//! `serve`: run the HTTP API until Ctrl-C.

use anyhow::{Context, Result};

use crate::adapters::http::{CloneHttpConfig, CloneHttpServer};
use crate::domain::models::Config;
use crate::infrastructure::logging::SecretScrubber;

use super::build_service;

pub async fn execute(config: Config) -> Result<()> {
    let service = build_service(&config.jira)?;
    let scrubber = SecretScrubber::new().context("Failed to compile secret scrubbing patterns")?;
    let server = CloneHttpServer::new(service, scrubber, CloneHttpConfig::from(config.server));

    server.serve_with_shutdown(shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
