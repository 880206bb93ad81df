//! scopegate core: wire types, entitlement model, and the scope decision engine.
//!
//! This crate decides which scopes a pre-issue access token callback should
//! append, and expresses that decision as patch operations. It carries no
//! transport or runtime dependencies so the engine can be exercised directly
//! from tests and reused behind any server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed entitlement data surfaces as `ScopeGateError` and the engine
//! fails closed instead of crashing the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod engine;
pub mod entitlement;
pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, ScopeGateError};

pub use engine::{evaluate, evaluate_snapshot, DecisionResult};
pub use entitlement::{EntitlementRecord, EntitlementSnapshot, Subject};
