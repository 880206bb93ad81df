//! scopegate gateway library entry.
//!
//! This crate wires the HTTP transport, entitlement store, and operational
//! endpoints around the decision engine in `scopegate-core`. It is intended to
//! be consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
pub mod transport;
