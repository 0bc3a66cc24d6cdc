use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_builder::{
    config::{AttributeEscaping, Config, GroupTitleFallback},
    metrics::MetricsLogger,
    services::PlaylistService,
};

#[derive(Parser)]
#[command(name = "m3u-builder")]
#[command(version)]
#[command(about = "Builds an enriched M3U playlist from a channel catalog and per-country channel lists")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (defaults to $CONFIG_FILE, then config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Channel-list dataset root: directory or http(s) base URL (overrides config file)
    #[arg(short = 'r', long, value_name = "PATH|URL")]
    channel_list: Option<String>,

    /// Global channel catalog: file or http(s) URL (overrides config file)
    #[arg(long, value_name = "PATH|URL")]
    catalog: Option<String>,

    /// Output playlist file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Group title for channels without catalog categories
    #[arg(long, value_enum)]
    group_fallback: Option<GroupTitleFallback>,

    /// Replace quotes and line breaks in attribute values
    #[arg(long)]
    sanitize: bool,

    /// Country fetches allowed in flight at once
    #[arg(short = 'j', long, value_name = "N")]
    fetch_concurrency: Option<usize>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("m3u_builder={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting M3U Builder v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    // Override config with CLI arguments
    if let Some(channel_list) = cli.channel_list {
        config.sources.channel_list = channel_list;
    }
    if let Some(catalog) = cli.catalog {
        config.sources.catalog = catalog;
    }
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    if let Some(group_fallback) = cli.group_fallback {
        config.generation.group_title_fallback = group_fallback;
    }
    if cli.sanitize {
        config.generation.attribute_escaping = AttributeEscaping::Sanitize;
    }
    if let Some(fetch_concurrency) = cli.fetch_concurrency {
        config.generation.fetch_concurrency = fetch_concurrency;
    }

    let service = PlaylistService::from_config(&config)?;
    let published = service.publish_to(&config.output.path).await?;
    MetricsLogger::new().log_published(&published);

    Ok(())
}
