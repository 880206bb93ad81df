//! Top-level facade crate for scopegate.
//!
//! Re-exports the decision core and the gateway library so users can depend on a single crate.

pub mod core {
    pub use scopegate_core::*;
}

pub mod gateway {
    pub use scopegate_gateway::*;
}
