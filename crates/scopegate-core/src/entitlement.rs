//! Entitlement records and the immutable snapshot the engine reads.
//!
//! A snapshot is decoded once from a JSON document of the form
//! `{ "entitlements": [ ... ] }` and then shared read-only (usually behind an
//! `Arc`) by every evaluation that runs against it. Record order is the
//! document order and is preserved everywhere.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ScopeGateError};

/// Principal an entitlement grants to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// One grant of `action` to `subject`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementRecord {
    /// Traceability only; never matched on.
    #[serde(default)]
    pub entitlement_id: String,
    pub subject: Subject,
    pub action: String,
    #[serde(default)]
    pub object: Map<String, Value>,
    #[serde(default)]
    pub constraints: Map<String, Value>,
}

impl EntitlementRecord {
    pub fn new(subject_type: &str, subject_id: &str, action: &str) -> Self {
        Self {
            entitlement_id: String::new(),
            subject: Subject {
                kind: subject_type.to_string(),
                id: subject_id.to_string(),
            },
            action: action.to_string(),
            object: Map::new(),
            constraints: Map::new(),
        }
    }

    pub fn with_id(mut self, entitlement_id: &str) -> Self {
        self.entitlement_id = entitlement_id.to_string();
        self
    }

    /// Exact, case-sensitive subject match.
    pub fn grants_to(&self, subject_type: &str, subject_id: &str) -> bool {
        self.subject.kind == subject_type && self.subject.id == subject_id
    }
}

/// Read-only, ordered set of entitlement records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitlementSnapshot {
    entitlements: Vec<EntitlementRecord>,
}

impl EntitlementSnapshot {
    pub fn new(entitlements: Vec<EntitlementRecord>) -> Self {
        Self { entitlements }
    }

    /// Decode a snapshot document. Any decode failure is `PolicyUnavailable`.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| ScopeGateError::PolicyUnavailable(format!("invalid entitlements json: {e}")))
    }

    pub fn from_slice(b: &[u8]) -> Result<Self> {
        serde_json::from_slice(b)
            .map_err(|e| ScopeGateError::PolicyUnavailable(format!("invalid entitlements json: {e}")))
    }

    pub fn records(&self) -> &[EntitlementRecord] {
        &self.entitlements
    }

    pub fn len(&self) -> usize {
        self.entitlements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entitlements.is_empty()
    }

    /// Records granting to `(subject_type, subject_id)`, in snapshot order.
    pub fn lookup<'a>(
        &'a self,
        subject_type: &'a str,
        subject_id: &'a str,
    ) -> impl Iterator<Item = &'a EntitlementRecord> + 'a {
        self.entitlements
            .iter()
            .filter(move |r| r.grants_to(subject_type, subject_id))
    }
}
