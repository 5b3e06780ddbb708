//! Radar proxy server
//!
//! Relays raw NEXRAD Level II files from the upstream archive as base64 JSON.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use radar_proxy::config::{
    ProxyConfig, UpstreamStatusPolicy, DEFAULT_LISTEN_ADDR, DEFAULT_UPSTREAM_BASE_URL,
};
use radar_proxy::server;
use radar_proxy::state::AppState;

/// Radar proxy server
#[derive(Parser, Debug)]
#[command(name = "radar-proxy")]
#[command(about = "Relay raw NEXRAD Level II files as base64-encoded JSON")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = DEFAULT_LISTEN_ADDR, env = "RADAR_PROXY_LISTEN_ADDR")]
    listen: String,

    /// Base URL of the raw Level II archive
    #[arg(long, default_value = DEFAULT_UPSTREAM_BASE_URL, env = "RADAR_UPSTREAM_BASE_URL")]
    upstream_base_url: String,

    /// Timeout for the upstream fetch in seconds (default: none)
    #[arg(long, env = "RADAR_UPSTREAM_TIMEOUT_SECS")]
    upstream_timeout_secs: Option<u64>,

    /// Report upstream 404 as 404 and other upstream failures as 502
    #[arg(long, env = "RADAR_PASSTHROUGH_UPSTREAM_STATUS")]
    passthrough_upstream_status: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "RADAR_PROXY_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

impl Args {
    fn proxy_config(&self) -> ProxyConfig {
        ProxyConfig {
            listen: self.listen.clone(),
            upstream_base_url: self.upstream_base_url.clone(),
            upstream_timeout: self.upstream_timeout_secs.map(Duration::from_secs),
            status_policy: UpstreamStatusPolicy::from_flag(self.passthrough_upstream_status),
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let config = args.proxy_config();
    config.validate().context("Invalid configuration")?;

    let prometheus_handle = radar_proxy::metrics::prometheus_builder()
        .context("Invalid metrics configuration")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!(
        upstream = %config.normalized_base_url(),
        timeout_secs = ?args.upstream_timeout_secs,
        policy = ?config.status_policy,
        "Starting radar proxy"
    );

    let state = Arc::new(AppState::new(config, Some(prometheus_handle))?);
    server::run_server(state).await
}
