//! scopegate callback service.
//!
//! - Action endpoint: POST /token-validation (pre-issue access token)
//! - Health endpoints: /health, /healthz, /readyz, /metrics
//! - Config: $SCOPEGATE_CONFIG (default scopegate.yaml), $PORT overrides the port
//! - Graceful shutdown on SIGINT/SIGTERM (readyz flips to draining first)

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use scopegate_core::error::{Result, ScopeGateError};
use scopegate_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "scopegate-gateway exited");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg_path = std::env::var("SCOPEGATE_CONFIG").unwrap_or_else(|_| "scopegate.yaml".into());
    let cfg = config::load_from_file(&cfg_path)?;
    let listen = config::listen_addr(&cfg, std::env::var("PORT").ok().as_deref())?;

    let state = AppState::new(cfg).await;
    let reloader = state.spawn_reloader();
    let app = router::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ScopeGateError::Internal(format!("failed to bind {listen}: {e}")))?;
    tracing::info!(%listen, "scopegate-gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| ScopeGateError::Internal(format!("server failed: {e}")))?;

    if let Some(r) = reloader {
        r.abort();
    }
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl-c handler failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler failed");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    state.set_draining();
    tracing::info!("shutdown signal received, draining");
}
