//! Wire formats of the pre-issue access token action.
//!
//! - `event`: the JSON body the identity provider posts to the callback.
//! - `response`: the action status plus patch operations sent back.
//!
//! Both follow the provider's camelCase JSON naming. Inbound types ignore
//! unknown fields since the provider adds fields over time.

pub mod event;
pub mod response;

pub use event::{ActionRequest, AdditionalHeader, AllowedOperation, IssuanceEvent};
pub use response::{ActionResponse, ActionStatus, PatchOp, PatchOperation};
