//! Decode-once codec for the action callback.
//!
//! - Request body => `ActionRequest` (decoded exactly once, before evaluation)
//! - `ActionResponse` => JSON bytes with the provider's content type

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use scopegate_core::{
    error::{Result, ScopeGateError},
    protocol::{ActionRequest, ActionResponse, ActionStatus},
};

/// Content type the identity provider expects on action responses.
pub const ACTION_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

pub fn decode(body: &Bytes) -> Result<ActionRequest> {
    serde_json::from_slice(body)
        .map_err(|e| ScopeGateError::BadRequest(format!("invalid action json: {e}")))
}

/// Encode an action response. `ERROR` responses carry HTTP 500.
pub fn encode(resp: &ActionResponse) -> Response {
    let status = match resp.action_status {
        ActionStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
        ActionStatus::Success | ActionStatus::Failed => StatusCode::OK,
    };

    match serde_json::to_vec(resp) {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(ACTION_CONTENT_TYPE))],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "encode action response failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
