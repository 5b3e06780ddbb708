//! Client for the raw Level II archive.
//!
//! One GET per request, no retries and no resumption. The body is buffered
//! in full because the caller needs the whole file to base64-encode it.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bytes::Bytes;
use radar_common::{ProxyError, ProxyResult, RadarFileRequest};
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::ProxyConfig;

/// A fetched raw file with timing information.
#[derive(Debug, Clone)]
pub struct UpstreamPayload {
    pub bytes: Bytes,
    pub elapsed: Duration,
}

/// Build the archive URL for a request.
///
/// `{base}/{site}/{site}_{date}_{time}`, interpolated without escaping.
pub fn build_upstream_url(base_url: &str, request: &RadarFileRequest) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        request.archive_path()
    )
}

/// Fetches raw radar files from the upstream archive.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a new upstream client from the proxy configuration.
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let mut builder = Client::builder().tcp_nodelay(true);

        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Archive URL for the given request.
    pub fn file_url(&self, request: &RadarFileRequest) -> String {
        build_upstream_url(&self.base_url, request)
    }

    /// Fetch the raw file for a request.
    ///
    /// Non-2xx statuses become [`ProxyError::UpstreamStatus`]; connection
    /// failures become [`ProxyError::Transport`].
    #[instrument(skip(self, request), fields(site = %request.site, date = %request.date, time = %request.time))]
    pub async fn fetch(&self, request: &RadarFileRequest) -> ProxyResult<UpstreamPayload> {
        let url = self.file_url(request);
        let started = Instant::now();

        debug!(url = %url, "Fetching raw radar file");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProxyError::Encoding(e.to_string()))?;

        let elapsed = started.elapsed();
        info!(
            url = %url,
            bytes = bytes.len(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Fetched raw radar file"
        );

        Ok(UpstreamPayload {
            bytes,
            elapsed,
        })
    }
}
