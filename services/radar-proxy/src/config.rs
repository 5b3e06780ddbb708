//! Proxy configuration.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use radar_common::ProxyError;
use reqwest::Url;
use thiserror::Error;

/// Default raw Level II archive (Iowa Environmental Mesonet).
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://mesonet-nexrad.agron.iastate.edu/level2/raw";

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8084";

/// Configuration errors detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid upstream base URL '{url}': {message}")]
    InvalidUpstreamUrl { url: String, message: String },

    #[error("Unsupported upstream URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid listen address '{0}'")]
    InvalidListenAddr(String),

    #[error("Upstream timeout must be greater than zero")]
    ZeroTimeout,
}

/// How upstream non-2xx responses are reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpstreamStatusPolicy {
    /// Every upstream failure becomes a 500.
    #[default]
    Mirror,
    /// Upstream 404 becomes 404, any other upstream failure becomes 502.
    Passthrough,
}

impl UpstreamStatusPolicy {
    pub fn from_flag(passthrough: bool) -> Self {
        if passthrough {
            UpstreamStatusPolicy::Passthrough
        } else {
            UpstreamStatusPolicy::Mirror
        }
    }

    /// HTTP status to answer with for the given error.
    pub fn status_for(&self, err: &ProxyError) -> StatusCode {
        match (self, err) {
            (UpstreamStatusPolicy::Passthrough, ProxyError::UpstreamStatus(404)) => {
                StatusCode::NOT_FOUND
            }
            (UpstreamStatusPolicy::Passthrough, ProxyError::UpstreamStatus(_)) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::from_u16(err.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// Runtime configuration for the proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Address the HTTP server binds to.
    pub listen: String,

    /// Archive base URL; the file path is appended as `/{site}/{site}_{date}_{time}`.
    pub upstream_base_url: String,

    /// Upper bound on the outbound fetch. `None` leaves the client default (no timeout).
    pub upstream_timeout: Option<Duration>,

    pub status_policy: UpstreamStatusPolicy,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN_ADDR.to_string(),
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout: None,
            status_policy: UpstreamStatusPolicy::Mirror,
        }
    }
}

impl ProxyConfig {
    /// Config with a different upstream, other settings default.
    pub fn with_upstream(base_url: impl Into<String>) -> Self {
        Self {
            upstream_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL with any trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.upstream_base_url.trim_end_matches('/')
    }

    /// Parse the listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(self.listen.clone()))
    }

    /// Check the configuration before the server starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(self.normalized_base_url()).map_err(|e| {
            ConfigError::InvalidUpstreamUrl {
                url: self.upstream_base_url.clone(),
                message: e.to_string(),
            }
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        if self.upstream_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout);
        }

        self.listen_addr()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ProxyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.upstream_timeout, None);
        assert_eq!(config.status_policy, UpstreamStatusPolicy::Mirror);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ProxyConfig::with_upstream("http://localhost:9000/raw//");
        assert_eq!(config.normalized_base_url(), "http://localhost:9000/raw");
    }

    #[test]
    fn test_rejects_relative_upstream() {
        let config = ProxyConfig::with_upstream("level2/raw");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUpstreamUrl { .. })
        ));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = ProxyConfig::with_upstream("ftp://example.com/raw");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedScheme(s)) if s == "ftp"
        ));
    }

    #[test]
    fn test_rejects_bad_listen_addr() {
        let config = ProxyConfig {
            listen: "localhost".to_string(),
            ..ProxyConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidListenAddr(_))
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = ProxyConfig {
            upstream_timeout: Some(Duration::ZERO),
            ..ProxyConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_mirror_policy_reports_500() {
        let policy = UpstreamStatusPolicy::Mirror;
        assert_eq!(
            policy.status_for(&ProxyError::UpstreamStatus(404)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            policy.status_for(&ProxyError::MissingSite),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_passthrough_policy() {
        let policy = UpstreamStatusPolicy::from_flag(true);
        assert_eq!(
            policy.status_for(&ProxyError::UpstreamStatus(404)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            policy.status_for(&ProxyError::UpstreamStatus(503)),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            policy.status_for(&ProxyError::Transport("refused".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
