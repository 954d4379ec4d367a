//! Polarwatch Server
//!
//! Run with: cargo run --bin polarwatch
//!
//! # Configuration
//!
//! Settings come from, in increasing priority:
//! - built-in defaults
//! - a config file (`--config`, or the first of
//!   `~/.config/polarwatch/config.toml`, `/etc/polarwatch/config.toml`, `./config.toml`)
//! - `POLARWATCH_*` environment variables
//! - command-line flags
//!
//! `RUST_LOG` overrides the configured log level.

use anyhow::Context;
use clap::Parser;
use polarwatch::api::{serve, AppState};
use polarwatch::config::{generate_default_config, Config};
use polarwatch::sampler::Sampler;
use polarwatch::websocket::spawn_relay;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "polarwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live simulated Arctic and Antarctic temperature dashboard")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between readings
    #[arg(short, long)]
    interval: Option<u64>,

    /// Number of readings kept in the history
    #[arg(long)]
    capacity: Option<usize>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = load_config(&args)?;

    polarwatch::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("Starting Polarwatch v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        interval_secs = config.sampler.interval_secs,
        capacity = config.sampler.capacity,
        min_temp = config.sampler.min_temp,
        max_temp = config.sampler.max_temp,
        "Sampler configuration"
    );

    let sampler = Sampler::new(&config.sampler).spawn(config.sampler.interval());

    let state = AppState::new(sampler.feed(), config.api.clone());
    let relay = spawn_relay(sampler.feed(), Arc::clone(&state.ws_hub));

    serve(state, &config.api).await?;

    tracing::info!("Stopping sampler...");
    sampler.shutdown();
    relay.abort();
    tracing::info!("Polarwatch stopped");

    Ok(())
}

/// Resolve configuration from file, environment, and flags
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load_default(),
    };

    if let Some(interval) = args.interval {
        config.sampler.interval_secs = interval;
    }
    if let Some(capacity) = args.capacity {
        config.sampler.capacity = capacity;
    }
    if let Some(host) = &args.host {
        config.api.host = host.clone();
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}
