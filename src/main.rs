use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use homework_bot::api::PracticumClient;
use homework_bot::config::Config;
use homework_bot::notifications::{Notifier, TelegramChannel, TelegramChannelConfig};
use homework_bot::poller::{HomeworkPoller, SystemClock};

#[derive(Parser)]
#[command(
    name = "homework-bot",
    version,
    about = "Forwards homework review status changes to a Telegram chat",
    long_about = None
)]
struct Cli {
    /// Optional TOML config file; environment variables override it
    #[arg(short, long, env = "HOMEWORK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine; secrets may come from the real environment
    let _ = dotenvy::dotenv();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_env();

    let format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    setup_tracing(&format, &level)?;

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Startup configuration check failed, exiting");
        return Err(e).context("Invalid configuration");
    }

    let source = match PracticumClient::from_config(&config) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "Status API client could not be created, exiting");
            return Err(e).context("Failed to create API client");
        }
    };
    let channel = TelegramChannel::new(TelegramChannelConfig::from_config(&config))
        .context("Failed to create Telegram channel")?;

    let mut poller = HomeworkPoller::new(
        Box::new(source),
        Notifier::new(Box::new(channel)),
        Arc::new(SystemClock),
        config.retry_period(),
    );

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            tracing::info!("Shutdown signal received, stopping homework poller");
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(format!("homework_bot={level},warn")))
        .context("Invalid log level")?;

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
