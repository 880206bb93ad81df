//! Shared application state for the scopegate callback service.
//!
//! Holds the validated config, the entitlement store and the metrics
//! registry. Cloned into every axum handler; all fields are behind `Arc`.

use std::sync::Arc;
use std::time::Duration;

use scopegate_core::error::Result;

use crate::config::{GatewayConfig, ReloadMode};
use crate::obs::GatewayMetrics;
use crate::store::EntitlementStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<EntitlementStore>,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
}

impl AppState {
    /// Build application state and perform the initial entitlements load.
    pub async fn new(cfg: GatewayConfig) -> Self {
        let store = EntitlementStore::open(&cfg.entitlements).await;
        let state = Self::with_store(cfg, store);

        let outcome = state.store.current().map(|s| s.len());
        state.record_load(&outcome);
        if let Ok(records) = outcome {
            tracing::info!(
                path = %state.store.path().display(),
                records,
                reload = ?state.store.mode(),
                "entitlements loaded"
            );
        }
        state
    }

    /// Build state over an already-constructed store.
    pub fn with_store(cfg: GatewayConfig, store: EntitlementStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            store: Arc::new(store),
            metrics: Arc::new(GatewayMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &EntitlementStore {
        &self.store
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn record_load(&self, outcome: &Result<usize>) {
        let result = if outcome.is_ok() { "ok" } else { "error" };
        self.metrics.snapshot_loads.inc(&[("result", result)]);
    }

    /// Point-in-time values rendered alongside the registered metrics.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        let records = self.store.current().map(|s| s.len() as u64);
        vec![
            ("scopegate_entitlements_ready", u64::from(records.is_ok())),
            ("scopegate_entitlements_records", records.unwrap_or(0)),
        ]
    }

    /// Start the polling reloader when `entitlements.reload` is `interval`.
    pub fn spawn_reloader(&self) -> Option<tokio::task::JoinHandle<()>> {
        if self.cfg().entitlements.reload != ReloadMode::Interval {
            return None;
        }
        let every = Duration::from_millis(self.cfg().entitlements.reload_interval_ms);
        let state = self.clone();

        Some(tokio::spawn(async move {
            let mut tick = tokio::time::interval(every);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            tick.tick().await; // first tick fires immediately; startup already loaded

            loop {
                tick.tick().await;
                let outcome = state.store.reload().await.map(|s| s.len());
                state.record_load(&outcome);
                match outcome {
                    Ok(records) => tracing::debug!(records, "entitlements reloaded"),
                    Err(e) => tracing::error!(error = %e, "entitlements reload failed; failing closed"),
                }
            }
        }))
    }
}
