//! Transport layer (HTTP action callback).
//!
//! Exposes the action handler and the codec that decodes the body once before
//! it reaches the decision engine.

pub mod action;
pub mod codec;
