use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logo_resolver::{
    config::Config,
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "logo-resolver")]
#[command(version)]
#[command(about = "Company logo resolution service for the internship dashboard")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Logo cache JSON file (overrides config file)
    #[arg(long, value_name = "PATH")]
    cache_file: Option<PathBuf>,

    /// Placement roster CSV (overrides config file)
    #[arg(long, value_name = "PATH")]
    roster: Option<PathBuf>,

    /// Never write the logo cache file
    #[arg(long)]
    read_only: bool,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("logo_resolver={},tower_http=trace", cli.log_level)
    } else {
        format!("logo_resolver={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Logo Resolver v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(cache_file) = cli.cache_file {
        config.storage.logo_cache_path = cache_file;
    }
    if let Some(roster) = cli.roster {
        config.storage.roster_csv_path = Some(roster);
    }
    if cli.read_only {
        config.storage.read_only = true;
    }

    info!(
        "Logo cache: {} ({})",
        config.storage.logo_cache_path.display(),
        if config.storage.read_only { "read-only" } else { "read-write" }
    );

    let state = AppState::from_config(config)?;

    // Requests that need the cache wait for this; /ready reports 503 until then
    let cache = state.cache.clone();
    tokio::spawn(async move {
        cache.initialize().await;
    });

    let web_server = WebServer::new(state)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
