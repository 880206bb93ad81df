//! Scope decision engine.
//!
//! Given an issuance event and an entitlement snapshot, decide which scopes to
//! append to the access token and express them as patch operations.
//!
//! Rule (closed over one subject type and one operation kind):
//! - partner id = first value of the first `x-b2b-usp-partner` additional
//!   header carrying at least one value (exact-case name match)
//! - every record with `subject.type == "partner"` and `subject.id == partner id`
//!   yields `add /accessToken/scopes/- "partner:{action}"`, in snapshot order
//!
//! A missing header, an empty header value, or zero matches are all successful
//! outcomes with no operations. Only an unavailable snapshot is an error, and it
//! never produces operations.

use crate::entitlement::EntitlementSnapshot;
use crate::error::{ErrorCode, ScopeGateError};
use crate::protocol::event::{AdditionalHeader, IssuanceEvent};
use crate::protocol::response::{ActionResponse, ActionStatus, PatchOp, PatchOperation};

/// Additional header carrying the caller's partner identity.
pub const PARTNER_HEADER: &str = "x-b2b-usp-partner";

/// The only subject type the rule grants scopes for.
pub const PARTNER_SUBJECT_TYPE: &str = "partner";

/// Append-to-array pointer into the access token scopes.
pub const SCOPES_APPEND_PATH: &str = "/accessToken/scopes/-";

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionResult {
    pub status: ActionStatus,
    pub operations: Vec<PatchOperation>,
    /// Set only when `status` is `Error`.
    pub error: Option<DecisionError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionError {
    pub code: ErrorCode,
    pub description: String,
}

impl DecisionResult {
    fn success(operations: Vec<PatchOperation>) -> Self {
        Self {
            status: ActionStatus::Success,
            operations,
            error: None,
        }
    }

    fn fail_closed(err: &ScopeGateError) -> Self {
        Self {
            status: ActionStatus::Error,
            operations: Vec::new(),
            error: Some(DecisionError {
                code: err.code(),
                description: err.to_string(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }

    /// Scope strings this decision appends, in order.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(|o| o.value.as_str())
    }

    pub fn into_response(self) -> ActionResponse {
        match self.error {
            Some(e) if self.status == ActionStatus::Error => {
                ActionResponse::error(e.code.as_str(), e.description)
            }
            _ => ActionResponse::success(self.operations),
        }
    }
}

/// First value of the first header named exactly `name` that has any value.
pub fn header_value<'a>(headers: &'a [AdditionalHeader], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .filter(|h| h.name == name)
        .find_map(|h| h.value.first())
        .map(String::as_str)
}

/// Partner identity of the caller; `None` when absent or empty.
pub fn partner_id(event: &IssuanceEvent) -> Option<&str> {
    header_value(event.additional_headers(), PARTNER_HEADER).filter(|v| !v.is_empty())
}

/// Scope patch for one granted action.
pub fn scope_patch(subject_type: &str, action: &str) -> PatchOperation {
    PatchOperation {
        op: PatchOp::Add,
        path: SCOPES_APPEND_PATH.to_string(),
        value: format!("{subject_type}:{action}"),
    }
}

/// Evaluate one event against a resident snapshot. Pure and deterministic.
pub fn evaluate(event: &IssuanceEvent, snapshot: &EntitlementSnapshot) -> DecisionResult {
    let Some(partner) = partner_id(event) else {
        return DecisionResult::success(Vec::new());
    };

    let operations = snapshot
        .lookup(PARTNER_SUBJECT_TYPE, partner)
        .map(|r| {
            let patch = scope_patch(&r.subject.kind, &r.action);
            tracing::debug!(
                partner,
                entitlement_id = %r.entitlement_id,
                scope = %patch.value,
                "scope granted"
            );
            patch
        })
        .collect();

    DecisionResult::success(operations)
}

/// Evaluate against a snapshot that may have failed to load.
///
/// Without a partner header the snapshot is never consulted, so that case
/// succeeds even when no snapshot is available.
pub fn evaluate_snapshot(
    event: &IssuanceEvent,
    snapshot: std::result::Result<&EntitlementSnapshot, &ScopeGateError>,
) -> DecisionResult {
    if partner_id(event).is_none() {
        return DecisionResult::success(Vec::new());
    }
    match snapshot {
        Ok(s) => evaluate(event, s),
        Err(e) => DecisionResult::fail_closed(e),
    }
}
