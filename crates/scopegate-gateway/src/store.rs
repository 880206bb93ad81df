//! Entitlement store: the resident snapshot plus its reload policy.
//!
//! - The snapshot is held as `Arc<EntitlementSnapshot>`; readers clone the
//!   `Arc` and never hold the lock across an evaluation.
//! - Reload is copy-on-write: a fresh snapshot is decoded off to the side and
//!   swapped in whole. In-flight evaluations keep the `Arc` they already hold.
//! - A failed load replaces the state with the error. Callers then fail closed
//!   instead of evaluating against a stale snapshot.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use scopegate_core::error::{Result, ScopeGateError};
use scopegate_core::EntitlementSnapshot;

use crate::config::{EntitlementsSection, ReloadMode};

type SnapshotState = Result<Arc<EntitlementSnapshot>>;

pub struct EntitlementStore {
    path: PathBuf,
    mode: ReloadMode,
    state: RwLock<SnapshotState>,
}

impl EntitlementStore {
    /// Open the store and attempt the initial load.
    /// A failed load is recorded, not returned: the process keeps serving.
    pub async fn open(section: &EntitlementsSection) -> Self {
        let store = Self {
            path: PathBuf::from(&section.path),
            mode: section.reload,
            state: RwLock::new(Err(ScopeGateError::PolicyUnavailable(
                "entitlements not loaded yet".into(),
            ))),
        };
        if let Err(e) = store.reload().await {
            tracing::error!(path = %store.path.display(), error = %e, "initial entitlements load failed");
        }
        store
    }

    /// Store over an in-memory snapshot. Never touches the filesystem.
    pub fn from_snapshot(snapshot: EntitlementSnapshot) -> Self {
        Self {
            path: PathBuf::new(),
            mode: ReloadMode::Startup,
            state: RwLock::new(Ok(Arc::new(snapshot))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> ReloadMode {
        self.mode
    }

    /// The resident snapshot, or the error of the most recent load.
    pub fn current(&self) -> Result<Arc<EntitlementSnapshot>> {
        match self.state.read() {
            Ok(g) => g.clone(),
            Err(_) => Err(ScopeGateError::Internal("entitlement store lock poisoned".into())),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.current().is_ok()
    }

    /// Snapshot to evaluate one action call against, honouring the reload mode.
    pub async fn snapshot_for_request(&self) -> Result<Arc<EntitlementSnapshot>> {
        if self.mode == ReloadMode::PerRequest {
            return self.reload().await;
        }
        self.current()
    }

    /// Re-read the entitlement file and swap it in.
    /// Returns the snapshot this call loaded, never one swapped in by another caller.
    pub async fn reload(&self) -> Result<Arc<EntitlementSnapshot>> {
        let loaded = read_snapshot(&self.path).await.map(Arc::new);
        self.swap(loaded.clone())?;
        loaded
    }

    fn swap(&self, next: SnapshotState) -> Result<()> {
        let mut g = self
            .state
            .write()
            .map_err(|_| ScopeGateError::Internal("entitlement store lock poisoned".into()))?;
        *g = next;
        Ok(())
    }
}

async fn read_snapshot(path: &Path) -> Result<EntitlementSnapshot> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        ScopeGateError::PolicyUnavailable(format!("failed to read {}: {e}", path.display()))
    })?;
    EntitlementSnapshot::from_slice(&bytes)
}
