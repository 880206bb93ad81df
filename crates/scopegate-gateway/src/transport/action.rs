//! Pre-issue access token action handler.
//!
//! Responsibilities:
//! - Decode the body once (400 `Invalid request` when it does not decode)
//! - Fetch the entitlement snapshot for this call from the store
//! - Run the decision engine and encode its result
//!
//! The handler never panics on request data; snapshot trouble is reported as
//! an `ERROR` action status with no operations.

use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use scopegate_core::engine::{self, partner_id, PARTNER_HEADER, SCOPES_APPEND_PATH};
use scopegate_core::EntitlementSnapshot;

use crate::app_state::AppState;
use crate::config::ReloadMode;
use crate::transport::codec;

pub async fn token_validation(
    State(app): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    tracing::debug!(
        %method,
        %uri,
        headers = ?headers,
        body = %String::from_utf8_lossy(&body),
        "action request"
    );

    let req = match codec::decode(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting undecodable action request");
            app.metrics().decode_errors.inc(&[("code", e.code().as_str())]);
            return (StatusCode::BAD_REQUEST, "Invalid request").into_response();
        }
    };

    let ev = &req.event;
    for h in ev.additional_headers() {
        tracing::debug!(name = %h.name, value = ?h.value, "additional header");
    }

    let partner = partner_id(ev);
    if partner.is_none() {
        tracing::warn!(
            client_id = %ev.request.client_id,
            header = PARTNER_HEADER,
            "partner header not found in additionalHeaders"
        );
    }
    if partner.is_some() && !req.permits("add", "/accessToken/scopes/") {
        tracing::warn!(
            client_id = %ev.request.client_id,
            path = SCOPES_APPEND_PATH,
            "allowedOperations does not list scope addition"
        );
    }

    let started = Instant::now();
    // Without a partner id the snapshot is never consulted, so it is not fetched.
    let decision = if partner.is_some() {
        let snapshot = app.store().snapshot_for_request().await;
        if app.store().mode() == ReloadMode::PerRequest {
            app.record_load(&snapshot.as_ref().map(|s| s.len()).map_err(|e| e.clone()));
        }
        engine::evaluate_snapshot(ev, snapshot.as_deref())
    } else {
        engine::evaluate(ev, &EntitlementSnapshot::default())
    };
    app.metrics()
        .evaluation_duration
        .observe(&[], started.elapsed());

    let status = decision.status.as_str();
    app.metrics().decisions.inc(&[("status", status)]);
    app.metrics()
        .scopes_granted
        .add(&[], decision.operations.len() as u64);

    match &decision.error {
        Some(err) => tracing::error!(
            client_id = %ev.request.client_id,
            partner = partner.unwrap_or_default(),
            code = err.code.as_str(),
            error = %err.description,
            "evaluation failed closed"
        ),
        None => tracing::info!(
            action_type = %req.action_type,
            client_id = %ev.request.client_id,
            grant_type = %ev.request.grant_type,
            partner = partner.unwrap_or_default(),
            operations = decision.operations.len(),
            status,
            "action evaluated"
        ),
    }

    codec::encode(&decision.into_response())
}
