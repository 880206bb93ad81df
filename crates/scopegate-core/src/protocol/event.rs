//! Inbound action body (pre-issue access token event).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level body posted by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// Action type, e.g. `PRE_ISSUE_ACCESS_TOKEN`. Informational only.
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_type: String,
    /// The issuance event under evaluation.
    #[serde(default, deserialize_with = "null_as_default")]
    pub event: IssuanceEvent,
    /// Operations the provider will accept in the response.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub allowed_operations: Vec<AllowedOperation>,
}

impl ActionRequest {
    /// Whether `allowedOperations` (when present) permits `op` on a path
    /// starting with `path_prefix`. An absent list permits everything.
    pub fn permits(&self, op: &str, path_prefix: &str) -> bool {
        if self.allowed_operations.is_empty() {
            return true;
        }
        self.allowed_operations
            .iter()
            .filter(|a| a.op == op)
            .flat_map(|a| a.paths.iter())
            .any(|p| p.starts_with(path_prefix) || path_prefix.starts_with(p.as_str()))
    }
}

/// Explicit JSON `null` decodes like a missing field.
fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Token issuance event. Immutable for the duration of an evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuanceEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub request: RequestData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_token: AccessToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<RefreshToken>,
}

impl IssuanceEvent {
    /// Headers forwarded from the original token request.
    pub fn additional_headers(&self) -> &[AdditionalHeader] {
        &self.request.additional_headers
    }
}

/// Token request details forwarded by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grant_type: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub additional_headers: Vec<AdditionalHeader>,
}

/// One forwarded header. `value` keeps every value in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalHeader {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: Vec<String>,
}

impl AdditionalHeader {
    pub fn new(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            value: values.iter().map(|v| (*v).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(default, deserialize_with = "null_as_default")]
    pub scopes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub claims: Vec<Claim>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshToken {
    #[serde(default, deserialize_with = "null_as_default")]
    pub claims: Vec<Claim>,
}

/// Token claim. The value is passed through without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Operation kind and paths the provider accepts in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowedOperation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub op: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paths: Vec<String>,
}
