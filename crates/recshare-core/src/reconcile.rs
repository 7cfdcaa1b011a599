//! List membership reconciler.
//!
//! Turns "the list should contain exactly these recommendations" into a
//! [`ListUpdatePlan`]: what to add, what to remove, and which additions
//! would widen a recommendation's audience. The reconciler never asks for
//! confirmation itself; see [`crate::confirm`] for that step.

use serde::{Deserialize, Serialize};

use crate::domain::{
    compute_digest, IdSet, ListSnapshot, RecommendationIndex, RecommendationList, Result,
    ShareError, VisibilityLevel,
};
use crate::expansion::{evaluate_expansion, Expansion};
use crate::metrics::METRICS;
use crate::obs;

/// The outcome of reconciling a desired membership against the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUpdatePlan {
    pub to_add: IdSet,
    pub to_remove: IdSet,
    /// Additions that widen the member's audience, in `to_add` order.
    pub expansions: Vec<Expansion>,
}

impl ListUpdatePlan {
    /// True when the plan changes nothing.
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// True when at least one addition must be confirmed.
    pub fn requires_confirmation(&self) -> bool {
        !self.expansions.is_empty()
    }

    pub fn expansion(&self, id: &str) -> Option<&Expansion> {
        self.expansions.iter().find(|e| e.id == id)
    }

    pub fn expansion_ids(&self) -> IdSet {
        self.expansions.iter().map(|e| e.id.clone()).collect()
    }

    /// Membership after applying this plan to `current`.
    pub fn apply_to(&self, current: &IdSet) -> IdSet {
        current.difference(&self.to_remove).union(&self.to_add)
    }

    /// SHA-256 of the canonical JSON of the plan.
    pub fn digest(&self) -> Result<String> {
        compute_digest(self)
    }
}

/// Reconcile `desired` against `current` for a list with the given audience.
///
/// Every id in `desired \ current` must have a record in `recommendations`;
/// a missing record is [`ShareError::InvalidArgument`]. Removals are never
/// checked for expansion.
pub fn plan_list_update(
    current: &IdSet,
    desired: &IdSet,
    recommendations: &RecommendationIndex,
    list_visibility: VisibilityLevel,
    list_community_ids: &IdSet,
) -> Result<ListUpdatePlan> {
    let to_remove = current.difference(desired);
    let to_add = desired.difference(current);

    let mut expansions = Vec::new();
    for id in &to_add {
        let rec = recommendations.get(id).ok_or_else(|| {
            ShareError::invalid(format!("no recommendation record for id {id}"))
        })?;
        if let Some(expansion) = evaluate_expansion(rec, list_visibility, list_community_ids) {
            obs::emit_expansion_flagged(&expansion, list_visibility);
            expansions.push(expansion);
        }
    }

    METRICS.inc_plans_computed();
    METRICS.add_expansions_flagged(expansions.len() as u64);
    obs::emit_plan_computed(to_add.len(), to_remove.len(), expansions.len());

    Ok(ListUpdatePlan {
        to_add,
        to_remove,
        expansions,
    })
}

/// Plan replacing `list`'s membership with `desired`.
pub fn plan_for_list(
    list: &RecommendationList,
    desired: &IdSet,
    recommendations: &RecommendationIndex,
) -> Result<ListUpdatePlan> {
    let _span = obs::ListSpan::enter(&list.id);
    plan_list_update(
        &list.recommendation_ids,
        desired,
        recommendations,
        list.visibility,
        &list.trust_circle_ids,
    )
}

/// Plan adding `candidates` to `list` without removing anything.
pub fn plan_additions(
    list: &RecommendationList,
    candidates: &IdSet,
    recommendations: &RecommendationIndex,
) -> Result<ListUpdatePlan> {
    let desired = list.recommendation_ids.union(candidates);
    plan_for_list(list, &desired, recommendations)
}

/// Plan the edit described by a snapshot document.
pub fn plan_snapshot(snapshot: &ListSnapshot) -> Result<ListUpdatePlan> {
    let index = snapshot.index()?;
    plan_for_list(&snapshot.list, &snapshot.desired_recommendation_ids, &index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{index_recommendations, Recommendation};

    fn ids(v: &[&str]) -> IdSet {
        v.iter().copied().collect()
    }

    fn index(recs: Vec<Recommendation>) -> RecommendationIndex {
        index_recommendations(&recs).unwrap()
    }

    #[test]
    fn test_add_and_remove() {
        let recs = index(vec![
            Recommendation::new("x", VisibilityLevel::Public),
            Recommendation::new("y", VisibilityLevel::Public),
            Recommendation::new("z", VisibilityLevel::Public),
        ]);
        let plan = plan_list_update(
            &ids(&["x", "y"]),
            &ids(&["y", "z"]),
            &recs,
            VisibilityLevel::Public,
            &IdSet::new(),
        )
        .unwrap();
        assert_eq!(plan.to_add, ids(&["z"]));
        assert_eq!(plan.to_remove, ids(&["x"]));
        assert!(plan.expansions.is_empty());
    }

    #[test]
    fn test_empty_plan() {
        let plan = plan_list_update(
            &IdSet::new(),
            &IdSet::new(),
            &RecommendationIndex::new(),
            VisibilityLevel::Public,
            &IdSet::new(),
        )
        .unwrap();
        assert!(plan.is_noop());
        assert!(!plan.requires_confirmation());
    }

    #[test]
    fn test_flags_only_additions() {
        // "old" is private and being removed from a public list: no flag.
        let recs = index(vec![
            Recommendation::new("old", VisibilityLevel::Private),
            Recommendation::new("new", VisibilityLevel::Private).with_name("Ace"),
        ]);
        let plan = plan_list_update(
            &ids(&["old"]),
            &ids(&["new"]),
            &recs,
            VisibilityLevel::Public,
            &IdSet::new(),
        )
        .unwrap();
        assert_eq!(plan.expansion_ids(), ids(&["new"]));
        let e = plan.expansion("new").unwrap();
        assert_eq!(e.current_visibility, VisibilityLevel::Private);
    }

    #[test]
    fn test_missing_record_is_invalid_argument() {
        let err = plan_list_update(
            &IdSet::new(),
            &ids(&["ghost"]),
            &RecommendationIndex::new(),
            VisibilityLevel::Public,
            &IdSet::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ShareError::InvalidArgument(_)));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_removal_only_needs_no_records() {
        let plan = plan_list_update(
            &ids(&["a", "b"]),
            &ids(&["a"]),
            &RecommendationIndex::new(),
            VisibilityLevel::Public,
            &IdSet::new(),
        )
        .unwrap();
        assert_eq!(plan.to_remove, ids(&["b"]));
    }

    #[test]
    fn test_plan_additions_keeps_existing_members() {
        let list = RecommendationList::new("l1", VisibilityLevel::Communities)
            .with_trust_circles(["A", "B"])
            .with_members(["r1"]);
        let recs = index(vec![
            Recommendation::new("r2", VisibilityLevel::Communities).with_communities(["A"]),
        ]);
        let plan = plan_additions(&list, &ids(&["r2"]), &recs).unwrap();
        assert_eq!(plan.to_add, ids(&["r2"]));
        assert!(plan.to_remove.is_empty());
        assert_eq!(plan.expansions[0].newly_exposed, ids(&["B"]));
    }

    #[test]
    fn test_apply_round_trip() {
        let recs = index(vec![Recommendation::new("c", VisibilityLevel::Public)]);
        let current = ids(&["a", "b"]);
        let desired = ids(&["b", "c"]);
        let plan = plan_list_update(
            &current,
            &desired,
            &recs,
            VisibilityLevel::Private,
            &IdSet::new(),
        )
        .unwrap();
        assert_eq!(plan.apply_to(&current), desired);
    }

    #[test]
    fn test_digest_tracks_content() {
        let a = ListUpdatePlan {
            to_add: ids(&["a"]),
            ..Default::default()
        };
        let b = ListUpdatePlan {
            to_add: ids(&["b"]),
            ..Default::default()
        };
        assert_eq!(a.digest().unwrap(), a.clone().digest().unwrap());
        assert_ne!(a.digest().unwrap(), b.digest().unwrap());
    }
}
