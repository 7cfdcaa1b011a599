//! What gets shown to the user, and what they can answer.

use serde::{Deserialize, Serialize};

use crate::domain::{IdSet, RecommendationList, Result, VisibilityLevel};
use crate::expansion::Expansion;
use crate::reconcile::ListUpdatePlan;

/// A request to confirm the expansions of one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub list_id: String,
    pub list_name: String,
    pub list_visibility: VisibilityLevel,
    /// Digest of the plan being confirmed.
    pub plan_digest: String,
    pub expansions: Vec<Expansion>,
    /// Human-readable prompt text.
    pub message: String,
}

impl ConfirmationRequest {
    pub fn from_plan(list: &RecommendationList, plan: &ListUpdatePlan) -> Result<Self> {
        Ok(Self {
            list_id: list.id.clone(),
            list_name: list.display_name().to_string(),
            list_visibility: list.visibility,
            plan_digest: plan.digest()?,
            expansions: plan.expansions.clone(),
            message: render_message(list, &plan.expansions),
        })
    }
}

/// Render the prompt listing each flagged recommendation with its current
/// visibility.
pub fn render_message(list: &RecommendationList, expansions: &[Expansion]) -> String {
    let mut msg = format!(
        "Adding to \"{}\" ({}) will widen who can see {} recommendation(s):\n",
        list.display_name(),
        list.visibility,
        expansions.len()
    );
    for e in expansions {
        msg.push_str(&format!(
            "  - {} (currently {}, becomes {}",
            e.display_name(),
            e.current_visibility,
            e.target_visibility
        ));
        if !e.newly_exposed.is_empty() {
            let names: Vec<&str> = e.newly_exposed.iter().collect();
            msg.push_str(&format!("; newly shared with {}", names.join(", ")));
        }
        msg.push_str(")\n");
    }
    msg.push_str("Continue?");
    msg
}

/// The user's answer to a [`ConfirmationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfirmationResponse {
    /// Expand every flagged recommendation.
    AcceptAll,
    /// Expand none of them.
    DeclineAll,
    /// Expand exactly `accepted`; every other flagged id is declined.
    PerItem { accepted: IdSet },
    /// Drop the whole edit.
    Abort,
}

impl ConfirmationResponse {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AcceptAll => "accept_all",
            Self::DeclineAll => "decline_all",
            Self::PerItem { .. } => "per_item",
            Self::Abort => "abort",
        }
    }
}
