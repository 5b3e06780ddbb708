//! Request and response envelopes for the radar file endpoint.

use serde::{Deserialize, Serialize};

use crate::error::ProxyError;

/// Fixed message returned with every successful fetch.
pub const SUCCESS_MESSAGE: &str = "NEXRAD raw data returned in base64 encoding.";

/// Raw query parameters as they arrived on the request.
///
/// Values are kept as-is; only presence is checked by [`RadarFileQuery::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadarFileQuery {
    pub site: Option<String>,
    /// Expected format: YYYYMMDD
    pub date: Option<String>,
    /// Expected format: HHMM
    pub time: Option<String>,
}

impl RadarFileQuery {
    /// Build from decoded query pairs. The first occurrence of a key wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "site" => &mut query.site,
                "date" => &mut query.date,
                "time" => &mut query.time,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// Check that all three parameters are present and non-empty.
    ///
    /// `site` is checked first so a request missing everything gets the
    /// site-specific message.
    pub fn validate(self) -> Result<RadarFileRequest, ProxyError> {
        let site = non_empty(self.site).ok_or(ProxyError::MissingSite)?;

        match (non_empty(self.date), non_empty(self.time)) {
            (Some(date), Some(time)) => Ok(RadarFileRequest { site, date, time }),
            _ => Err(ProxyError::MissingDateTime),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A validated request for one raw Level II file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadarFileRequest {
    /// Radar station identifier (e.g., "KTLX").
    pub site: String,
    pub date: String,
    pub time: String,
}

impl RadarFileRequest {
    pub fn new(site: impl Into<String>, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    /// Archive path below the base URL: `{site}/{site}_{date}_{time}`.
    ///
    /// Values are interpolated verbatim, without percent-encoding.
    pub fn archive_path(&self) -> String {
        format!("{0}/{0}_{1}_{2}", self.site, self.date, self.time)
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarFileResponse {
    pub site: String,
    pub date: String,
    pub time: String,
    /// Upstream file bytes, standard base64 with padding.
    pub base64_data: String,
    pub message: String,
}

impl RadarFileResponse {
    pub fn new(request: RadarFileRequest, base64_data: String) -> Self {
        Self {
            site: request.site,
            date: request.date,
            time: request.time,
            base64_data,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
