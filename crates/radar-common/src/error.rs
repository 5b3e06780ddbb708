//! Error types for the radar file proxy.

use thiserror::Error;

use crate::types::ErrorResponse;

/// Result type alias using ProxyError.
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Label used for every server-side failure envelope.
pub const INTERNAL_ERROR_LABEL: &str = "Internal Server Error";

/// Label used when upstream status passthrough is enabled.
pub const UPSTREAM_ERROR_LABEL: &str = "Upstream Error";

/// Primary error type for radar file requests.
#[derive(Debug, Error)]
pub enum ProxyError {
    // === Client Errors ===
    #[error("Missing required query parameter 'site'.")]
    MissingSite,

    #[error("Missing required query parameters. Expecting 'date' (YYYYMMDD) and 'time' (HHMM).")]
    MissingDateTime,

    // === Upstream Errors ===
    #[error("Error fetching file. Status code: {0}")]
    UpstreamStatus(u16),

    /// The archive could not be reached (DNS, connect, TLS, timeout).
    #[error("{0}")]
    Transport(String),

    /// Reading or encoding the upstream body failed.
    #[error("{0}")]
    Encoding(String),
}

impl ProxyError {
    /// True for errors caused by the inbound request itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProxyError::MissingSite | ProxyError::MissingDateTime)
    }

    /// Get the HTTP status code for this error.
    ///
    /// Every failure past validation is reported as 500, including upstream
    /// 4xx/5xx responses. The upstream status only shows up in the details.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ProxyError::MissingSite | ProxyError::MissingDateTime => 400,
            _ => 500,
        }
    }

    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::MissingSite | ProxyError::MissingDateTime => "bad_request",
            ProxyError::UpstreamStatus(_) => "upstream_status",
            ProxyError::Transport(_) => "transport",
            ProxyError::Encoding(_) => "encoding",
        }
    }

    /// Build the JSON error envelope for this error.
    pub fn to_error_response(&self) -> ErrorResponse {
        if self.is_client_error() {
            ErrorResponse::new(self.to_string())
        } else {
            ErrorResponse::with_details(INTERNAL_ERROR_LABEL, self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_site_is_bad_request() {
        let err = ProxyError::MissingSite;
        assert_eq!(err.http_status_code(), 400);
        assert!(err.to_string().contains("site"));

        let body = err.to_error_response();
        assert!(body.error.contains("'site'"));
        assert!(body.details.is_none());
    }

    #[test]
    fn test_missing_date_time_names_both_formats() {
        let message = ProxyError::MissingDateTime.to_string();
        assert!(message.contains("'date' (YYYYMMDD)"));
        assert!(message.contains("'time' (HHMM)"));
    }

    #[test]
    fn test_upstream_status_maps_to_500() {
        let err = ProxyError::UpstreamStatus(404);
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.kind(), "upstream_status");

        let body = err.to_error_response();
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(
            body.details.as_deref(),
            Some("Error fetching file. Status code: 404")
        );
    }

    #[test]
    fn test_transport_details_are_the_underlying_message() {
        let err = ProxyError::Transport("dns error: no such host".to_string());
        assert!(!err.is_client_error());

        let body = err.to_error_response();
        assert_eq!(body.details.as_deref(), Some("dns error: no such host"));
    }
}
