//! Structured observability hooks for list planning.
//!
//! This module provides:
//! - List-scoped tracing spans via the `ListSpan` RAII guard
//! - Emission functions for the planning lifecycle: plan computed,
//!   expansion flagged, confirmation resolved, commit finalized/aborted
//!
//! Events are emitted at `info!`/`debug!` level; filter with `RUST_LOG`.

use tracing::{debug, info, warn};

use crate::domain::VisibilityLevel;
use crate::expansion::Expansion;

/// RAII guard that enters a list-scoped tracing span.
///
/// ```ignore
/// let _span = ListSpan::enter("list-42");
/// // events below carry list_id = "list-42"
/// ```
pub struct ListSpan {
    _span: tracing::span::EnteredSpan,
}

impl ListSpan {
    pub fn enter(list_id: &str) -> Self {
        Self {
            _span: list_span(list_id).entered(),
        }
    }
}

/// The list-scoped span, for instrumenting futures (an entered span must
/// not be held across `.await`).
pub fn list_span(list_id: &str) -> tracing::Span {
    tracing::info_span!("recshare.list", list_id = %list_id)
}

/// Emit event: a membership plan was computed.
pub fn emit_plan_computed(to_add: usize, to_remove: usize, expansions: usize) {
    info!(
        event = "plan.computed",
        to_add = to_add,
        to_remove = to_remove,
        expansions = expansions,
    );
}

/// Emit event: an addition widens a recommendation's audience.
pub fn emit_expansion_flagged(expansion: &Expansion, list_visibility: VisibilityLevel) {
    debug!(
        event = "expansion.flagged",
        recommendation_id = %expansion.id,
        current = %expansion.current_visibility,
        list = %list_visibility,
        newly_exposed = expansion.newly_exposed.len(),
    );
}

/// Emit event: the confirmation port answered.
pub fn emit_confirmation_resolved(response: &str, accepted: usize, declined: usize) {
    info!(
        event = "confirmation.resolved",
        response = %response,
        accepted = accepted,
        declined = declined,
    );
}

/// Emit event: a commit request was produced.
pub fn emit_commit_finalized(request_id: &str, add: usize, remove: usize, updates: usize) {
    info!(
        event = "commit.finalized",
        request_id = %request_id,
        add = add,
        remove = remove,
        visibility_updates = updates,
    );
}

/// Emit event: the commit was abandoned (warning level).
pub fn emit_commit_aborted(reason: &dyn std::fmt::Display) {
    warn!(event = "commit.aborted", reason = %reason);
}
