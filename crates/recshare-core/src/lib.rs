//! Recshare Core Library
//!
//! Visibility rules for shared recommendation lists:
//! - [`expansion`]: does adding a recommendation to a list widen its audience?
//! - [`reconcile`]: what does a membership edit add, remove and expand?
//! - [`confirm`]: ask about expansions and build the commit request.
//!
//! Everything here is pure over caller-supplied snapshots; nothing performs
//! network or storage I/O.

pub mod config;
pub mod confirm;
pub mod domain;
pub mod expansion;
pub mod metrics;
pub mod obs;
pub mod reconcile;
pub mod telemetry;

pub use config::{ConfirmMode, ShareConfig};
pub use confirm::{
    finalize_plan, render_message, resolve_plan, AutoConfirm, CommitOutcome, CommitRequest,
    ConfirmationPort, ConfirmationRequest, ConfirmationResponse, DeclinePolicy, ScriptedConfirm,
    VisibilityUpdate,
};
pub use domain::{
    index_recommendations, parse_id_set, IdSet, ListSnapshot, Recommendation,
    RecommendationIndex, RecommendationList, Result, ShareError, VisibilityLevel,
};
pub use expansion::{
    evaluate_expansion, expanded_visibility, is_visibility_expansion, newly_exposed_communities,
    Expansion,
};
pub use metrics::METRICS;
pub use reconcile::{plan_additions, plan_for_list, plan_list_update, plan_snapshot, ListUpdatePlan};
pub use telemetry::init_tracing;

/// Recshare version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
