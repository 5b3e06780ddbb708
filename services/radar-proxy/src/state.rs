//! Application state for the radar proxy.

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::ProxyConfig;
use crate::upstream::UpstreamClient;

/// Shared application state. Read-only after startup.
pub struct AppState {
    pub config: ProxyConfig,

    /// Client for the raw Level II archive.
    pub upstream: UpstreamClient,

    /// Prometheus handle for `/metrics`, absent when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new AppState from a validated configuration.
    pub fn new(config: ProxyConfig, prometheus: Option<PrometheusHandle>) -> Result<Self> {
        let upstream = UpstreamClient::new(&config)?;

        Ok(Self {
            config,
            upstream,
            prometheus,
        })
    }
}
