//! JSON decision vector loader shared by engine tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;

use scopegate_core::protocol::event::ActionRequest;
use scopegate_core::{EntitlementSnapshot, ScopeGateError};

#[derive(Debug, Deserialize)]
pub struct DecisionVector {
    pub description: String,
    /// Well-formed snapshot document.
    #[serde(default)]
    pub entitlements: Option<serde_json::Value>,
    /// Raw snapshot text, used for documents that must fail to decode.
    #[serde(default)]
    pub entitlements_raw: Option<String>,
    pub request: ActionRequest,
    pub expect: serde_json::Value,
}

impl DecisionVector {
    pub fn snapshot(&self) -> Result<EntitlementSnapshot, ScopeGateError> {
        match (&self.entitlements, &self.entitlements_raw) {
            (Some(doc), None) => EntitlementSnapshot::from_json_str(&doc.to_string()),
            (None, Some(raw)) => EntitlementSnapshot::from_json_str(raw),
            _ => panic!("{}: exactly one of entitlements / entitlements_raw", self.description),
        }
    }
}

pub fn read_vector(name: &str) -> String {
    fs::read_to_string(format!("{}/tests/vectors/{name}", env!("CARGO_MANIFEST_DIR"))).unwrap()
}

pub fn load(name: &str) -> DecisionVector {
    serde_json::from_str(&read_vector(name)).unwrap()
}
