//! Axum router wiring.
//!
//! `POST /token-validation` is the action callback; the remaining routes are
//! operational. Any other method on a known path answers 405.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let max_body = state.cfg().gateway.max_body_bytes;

    Router::new()
        .route("/token-validation", post(transport::action::token_validation))
        .route("/health", get(ops::healthz))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}
