use anyhow::{Context, Result};
use clap::Parser;
use resume_sense::cli::{handle_command, Cli};
use resume_sense::core::ConfigManager;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    let stderr_layer = file_layer
        .is_none()
        .then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = ConfigManager::load()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }
    if let Some(output) = &cli.output {
        config = config.with_output_path(output);
    }
    config.ensure_directories().await?;

    info!("Environment: {}", config.environment);
    info!("Backend: {}", config.service.api_url);
    info!("Output: {}", config.output_path.display());

    handle_command(cli.command, config).await
}
