//! Expansion rule evaluator.
//!
//! Decides whether putting a recommendation on a list would widen the
//! recommendation's audience. A list is an independent audience: when the
//! list is broader than its member, membership leaks the member to people it
//! was not shared with.
//!
//! Rules, in order:
//! 1. list tier above recommendation tier: expansion.
//! 2. both at the `communities` tier: expansion iff the list reaches a
//!    community the recommendation is not already shared with
//!    (`list_communities \ rec_communities ≠ ∅`).
//! 3. anything else: no expansion.

use serde::{Deserialize, Serialize};

use crate::domain::{IdSet, Recommendation, VisibilityLevel};

/// A flagged expansion, carrying what a confirmation prompt needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    /// Recommendation id.
    pub id: String,
    /// Display name, if the record had one.
    pub name: Option<String>,
    /// Tier the recommendation has today.
    pub current_visibility: VisibilityLevel,
    /// Tier it would need to honestly belong to the list.
    pub target_visibility: VisibilityLevel,
    /// Community scope that goes with `target_visibility` (empty unless the
    /// target tier is `communities`).
    pub target_community_ids: IdSet,
    /// Communities that would newly see it (empty when the list is broader
    /// than any community scope).
    pub newly_exposed: IdSet,
}

impl Expansion {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Whether adding `rec` to a list with the given audience broadens who can
/// see `rec`.
pub fn is_visibility_expansion(
    rec: &Recommendation,
    list_visibility: VisibilityLevel,
    list_community_ids: &IdSet,
) -> bool {
    if list_visibility > rec.visibility {
        return true;
    }
    if both_community_scoped(rec.visibility, list_visibility) {
        return list_community_ids.has_any_outside(&rec.community_ids);
    }
    false
}

/// Communities that would start seeing `rec` if it joined the list.
pub fn newly_exposed_communities(
    rec: &Recommendation,
    list_visibility: VisibilityLevel,
    list_community_ids: &IdSet,
) -> IdSet {
    if both_community_scoped(rec.visibility, list_visibility) {
        return list_community_ids.difference(&rec.community_ids);
    }
    if list_visibility > rec.visibility && list_visibility.is_community_scoped() {
        // only reachable from private
        return list_community_ids.clone();
    }
    IdSet::new()
}

/// The visibility `rec` must take so that list membership does not exceed
/// it: the list's tier when the list is broader, or the union of both
/// community sets when both are community-scoped. Otherwise unchanged.
pub fn expanded_visibility(
    rec: &Recommendation,
    list_visibility: VisibilityLevel,
    list_community_ids: &IdSet,
) -> (VisibilityLevel, IdSet) {
    if list_visibility > rec.visibility {
        let communities = if list_visibility.is_community_scoped() {
            list_community_ids.clone()
        } else {
            IdSet::new()
        };
        return (list_visibility, communities);
    }
    if both_community_scoped(rec.visibility, list_visibility) {
        return (
            VisibilityLevel::Communities,
            rec.community_ids.union(list_community_ids),
        );
    }
    (rec.visibility, rec.effective_communities())
}

/// Evaluate `rec` against a list audience, returning the flagged expansion
/// if there is one.
pub fn evaluate_expansion(
    rec: &Recommendation,
    list_visibility: VisibilityLevel,
    list_community_ids: &IdSet,
) -> Option<Expansion> {
    if !is_visibility_expansion(rec, list_visibility, list_community_ids) {
        return None;
    }
    let (target_visibility, target_community_ids) =
        expanded_visibility(rec, list_visibility, list_community_ids);
    Some(Expansion {
        id: rec.id.clone(),
        name: rec.name.clone(),
        current_visibility: rec.visibility,
        target_visibility,
        target_community_ids,
        newly_exposed: newly_exposed_communities(rec, list_visibility, list_community_ids),
    })
}

fn both_community_scoped(a: VisibilityLevel, b: VisibilityLevel) -> bool {
    a.is_community_scoped() && b.is_community_scoped()
}
