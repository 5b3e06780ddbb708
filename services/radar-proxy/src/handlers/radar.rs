//! Raw radar file handler.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use radar_common::{
    encode_payload, error::UPSTREAM_ERROR_LABEL, ErrorResponse, ProxyError, ProxyResult,
    RadarFileQuery, RadarFileResponse,
};
use tracing::{debug, error};

use crate::config::UpstreamStatusPolicy;
use crate::metrics::{record_request, record_upstream_fetch, RequestOutcome};
use crate::state::AppState;

/// ANY / - Fetch one raw Level II file and return it base64-encoded.
///
/// Query pairs are taken as a list so repeated or malformed parameters never
/// produce a non-JSON extractor rejection.
pub async fn radar_file_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = RadarFileQuery::from_pairs(pairs);

    match fetch_radar_file(&state, query).await {
        Ok(body) => {
            record_request(RequestOutcome::Ok);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            record_request(RequestOutcome::from_error(&e));
            if e.is_client_error() {
                debug!(error = %e, "Rejected radar file request");
            } else {
                error!(error = %e, kind = e.kind(), "Radar file request failed");
            }
            error_response(state.config.status_policy, &e)
        }
    }
}

async fn fetch_radar_file(state: &AppState, query: RadarFileQuery) -> ProxyResult<RadarFileResponse> {
    let request = query.validate()?;

    let payload = state.upstream.fetch(&request).await?;
    record_upstream_fetch(payload.bytes.len(), payload.elapsed);

    let base64_data = encode_payload(&payload.bytes);
    Ok(RadarFileResponse::new(request, base64_data))
}

/// Render an error as the JSON envelope with the status chosen by the policy.
pub fn error_response(policy: UpstreamStatusPolicy, err: &ProxyError) -> Response {
    let status = policy.status_for(err);

    let body = match (policy, err) {
        (UpstreamStatusPolicy::Passthrough, ProxyError::UpstreamStatus(_)) => {
            ErrorResponse::with_details(UPSTREAM_ERROR_LABEL, err.to_string())
        }
        _ => err.to_error_response(),
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status_mirror() {
        let response = error_response(
            UpstreamStatusPolicy::Mirror,
            &ProxyError::UpstreamStatus(404),
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_status_passthrough() {
        let response = error_response(
            UpstreamStatusPolicy::Passthrough,
            &ProxyError::UpstreamStatus(404),
        );
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = error_response(UpstreamStatusPolicy::Passthrough, &ProxyError::MissingSite);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
