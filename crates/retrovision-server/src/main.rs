//! Entry point for the Retro-Vision session server.
//!
//! Loads generator and server configuration from the environment, then
//! serves the session API until `Ctrl-C`.

use std::sync::Arc;

use anyhow::Context;
use retrovision_generator::{Generator, GeneratorConfig};
use retrovision_server::{AppState, ServerConfig, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("retrovision-server starting");

    let generator_config =
        GeneratorConfig::from_env().context("failed to load generator configuration")?;
    info!(
        text_api_url = %generator_config.text_api_url,
        image_api_url = %generator_config.image_api_url,
        request_timeout_ms = generator_config.request_timeout.as_millis(),
        custom_templates = generator_config.templates_dir.is_some(),
        "generator configuration loaded"
    );

    let generator = Generator::new(&generator_config).context("failed to build generator")?;
    let server_config = ServerConfig::from_env().context("failed to load server configuration")?;
    let state = Arc::new(AppState::new(generator).context("failed to compile page templates")?);

    start_server(&server_config, state)
        .await
        .context("server failed")?;

    Ok(())
}
