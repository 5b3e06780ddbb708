//! Request and upstream metrics.
//!
//! Recorded through the `metrics` facade; the Prometheus recorder installed in
//! `main` renders them on `/metrics`. Without a recorder these are no-ops.

use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};
use radar_common::ProxyError;

/// Histogram buckets for `radar_upstream_duration_ms`.
///
/// Level II volume files are a few MB and usually arrive in well under 10s.
pub const UPSTREAM_DURATION_BUCKETS_MS: &[f64] = &[
    50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0, 30000.0,
];

/// Prometheus builder with the proxy's histogram buckets configured.
pub fn prometheus_builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("radar_upstream_duration_ms".to_string()),
        UPSTREAM_DURATION_BUCKETS_MS,
    )
}

/// Outcome label for `radar_requests_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Ok,
    BadRequest,
    UpstreamError,
}

impl RequestOutcome {
    pub fn from_error(err: &ProxyError) -> Self {
        if err.is_client_error() {
            RequestOutcome::BadRequest
        } else {
            RequestOutcome::UpstreamError
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOutcome::Ok => "ok",
            RequestOutcome::BadRequest => "bad_request",
            RequestOutcome::UpstreamError => "upstream_error",
        }
    }
}

/// Record one handled radar file request.
pub fn record_request(outcome: RequestOutcome) {
    counter!("radar_requests_total", "outcome" => outcome.as_str()).increment(1);
}

/// Record a successful upstream fetch.
pub fn record_upstream_fetch(bytes: usize, elapsed: Duration) {
    counter!("radar_upstream_bytes_total").increment(bytes as u64);
    histogram!("radar_upstream_duration_ms").record(elapsed.as_secs_f64() * 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_error() {
        assert_eq!(
            RequestOutcome::from_error(&ProxyError::MissingDateTime),
            RequestOutcome::BadRequest
        );
        assert_eq!(
            RequestOutcome::from_error(&ProxyError::UpstreamStatus(500)),
            RequestOutcome::UpstreamError
        );
        assert_eq!(RequestOutcome::UpstreamError.as_str(), "upstream_error");
    }

    #[test]
    fn test_series_rendered_by_prometheus() {
        let recorder = prometheus_builder().unwrap().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_request(RequestOutcome::Ok);
            record_request(RequestOutcome::BadRequest);
            record_request(RequestOutcome::BadRequest);
            record_upstream_fetch(3, Duration::from_millis(120));
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"radar_requests_total{outcome="ok"} 1"#));
        assert!(rendered.contains(r#"radar_requests_total{outcome="bad_request"} 2"#));
        assert!(rendered.contains("radar_upstream_bytes_total 3"));
        assert!(rendered.contains("# TYPE radar_upstream_duration_ms histogram"));
        assert!(rendered.contains("radar_upstream_duration_ms_count 1"));

        // Cumulative count of the bucket whose upper bound is `le`.
        let bucket = |le: f64| {
            rendered.lines().find_map(|line| {
                let rest = line.strip_prefix("radar_upstream_duration_ms_bucket{le=\"")?;
                let (bound, count) = rest.split_once("\"} ")?;
                let bound: f64 = bound.parse().ok()?;
                (bound == le).then(|| count.to_string())
            })
        };
        assert_eq!(bucket(100.0).as_deref(), Some("0"));
        assert_eq!(bucket(250.0).as_deref(), Some("1"));
        assert_eq!(bucket(f64::INFINITY).as_deref(), Some("1"));
    }
}
