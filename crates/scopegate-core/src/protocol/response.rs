//! Outbound action response.

use serde::Serialize;

/// Overall outcome reported to the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Success,
    Failed,
    Error,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Success => "SUCCESS",
            ActionStatus::Failed => "FAILED",
            ActionStatus::Error => "ERROR",
        }
    }
}

/// Patch operation kind. Scope addition is the only mutation emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
}

/// One JSON-Pointer style mutation of the token being issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    pub value: String,
}

/// Response body returned by the callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub action_status: ActionStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<PatchOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl ActionResponse {
    pub fn success(operations: Vec<PatchOperation>) -> Self {
        Self {
            action_status: ActionStatus::Success,
            operations,
            failure_reason: None,
            failure_description: None,
            error_message: None,
            error_description: None,
        }
    }

    pub fn error(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            action_status: ActionStatus::Error,
            operations: Vec::new(),
            failure_reason: None,
            failure_description: None,
            error_message: Some(message.into()),
            error_description: Some(description.into()),
        }
    }
}
