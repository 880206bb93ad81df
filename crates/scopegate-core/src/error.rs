//! Shared error type across scopegate crates.

use thiserror::Error;

/// Stable error codes surfaced in logs, metrics labels and error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Inbound action body could not be decoded.
    BadRequest,
    /// Entitlement snapshot missing or corrupt.
    PolicyUnavailable,
    /// Invalid configuration.
    Config,
    /// Internal server error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::PolicyUnavailable => "POLICY_UNAVAILABLE",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ScopeGateError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Clone, Error)]
pub enum ScopeGateError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("entitlements unavailable: {0}")]
    PolicyUnavailable(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ScopeGateError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ScopeGateError::BadRequest(_) => ErrorCode::BadRequest,
            ScopeGateError::PolicyUnavailable(_) => ErrorCode::PolicyUnavailable,
            ScopeGateError::Config(_) => ErrorCode::Config,
            ScopeGateError::Internal(_) => ErrorCode::Internal,
        }
    }
}
