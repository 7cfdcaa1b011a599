//! Confirmation of visibility expansions.
//!
//! The reconciler only reports expansions. This module asks the user about
//! them through a [`ConfirmationPort`] and turns the answer into a
//! [`CommitRequest`]:
//!
//! - [`request`]: `ConfirmationRequest` / `ConfirmationResponse`, prompt text
//! - [`port`]: the async `ConfirmationPort` trait, `AutoConfirm`, `ScriptedConfirm`
//! - [`finalize`]: `DeclinePolicy`, `resolve_plan()`, `finalize_plan()`

pub mod finalize;
pub mod port;
pub mod request;

pub use finalize::{
    finalize_plan, resolve_plan, CommitOutcome, CommitRequest, DeclinePolicy, VisibilityUpdate,
};
pub use port::{AutoConfirm, ConfirmationPort, ScriptedConfirm};
pub use request::{render_message, ConfirmationRequest, ConfirmationResponse};
