//! Turning a confirmed plan into a commit request.
//!
//! The commit request is the logical payload for the backend: which ids to
//! add and remove, and which recommendations must widen their visibility
//! because the user accepted the expansion. Sending it is the caller's job.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use super::port::ConfirmationPort;
use super::request::{ConfirmationRequest, ConfirmationResponse};
use crate::domain::{IdSet, RecommendationList, Result, ShareError, VisibilityLevel};
use crate::metrics::METRICS;
use crate::obs;
use crate::reconcile::ListUpdatePlan;

/// What to do with the rest of the edit when some expansions are declined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclinePolicy {
    /// Commit everything except the declined additions.
    #[default]
    Exclude,
    /// Any declined expansion abandons the whole edit.
    AbortAll,
}

impl FromStr for DeclinePolicy {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "exclude" => Ok(Self::Exclude),
            "abort_all" | "abort" => Ok(Self::AbortAll),
            other => Err(ShareError::Config(format!("unknown decline policy: {other}"))),
        }
    }
}

/// A visibility change the backend must apply alongside the membership edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityUpdate {
    pub recommendation_id: String,
    pub from: VisibilityLevel,
    pub to: VisibilityLevel,
    /// Community scope for `to`; empty unless `to` is `communities`.
    pub community_ids: IdSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub request_id: Uuid,
    pub list_id: String,
    /// Digest of the plan this request was derived from.
    pub plan_digest: String,
    pub add: IdSet,
    pub remove: IdSet,
    pub visibility_updates: Vec<VisibilityUpdate>,
    /// Flagged additions the user declined; never part of `add`.
    pub declined: IdSet,
    pub created_at: DateTime<Utc>,
}

impl CommitRequest {
    /// True when there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.visibility_updates.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommitOutcome {
    Commit(CommitRequest),
    Aborted { reason: String },
}

impl CommitOutcome {
    pub fn commit(&self) -> Option<&CommitRequest> {
        match self {
            Self::Commit(req) => Some(req),
            Self::Aborted { .. } => None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

/// Apply a confirmation response to a plan. Pure apart from the request id
/// and timestamp.
///
/// A `PerItem` response naming an id that was not flagged is
/// [`ShareError::InvalidArgument`].
pub fn resolve_plan(
    list_id: &str,
    plan: &ListUpdatePlan,
    response: &ConfirmationResponse,
    policy: DeclinePolicy,
) -> Result<CommitOutcome> {
    let flagged = plan.expansion_ids();
    let accepted = match response {
        ConfirmationResponse::Abort => {
            return Ok(abort("confirmation aborted by user".to_string()));
        }
        ConfirmationResponse::AcceptAll => flagged.clone(),
        ConfirmationResponse::DeclineAll => IdSet::new(),
        ConfirmationResponse::PerItem { accepted } => {
            let unknown = accepted.difference(&flagged);
            if !unknown.is_empty() {
                let names: Vec<&str> = unknown.iter().collect();
                return Err(ShareError::invalid(format!(
                    "accepted ids were not flagged for confirmation: {}",
                    names.join(", ")
                )));
            }
            accepted.clone()
        }
    };

    let declined = flagged.difference(&accepted);
    obs::emit_confirmation_resolved(response.label(), accepted.len(), declined.len());
    METRICS.add_expansions_declined(declined.len() as u64);

    if !declined.is_empty() && policy == DeclinePolicy::AbortAll {
        return Ok(abort(format!(
            "{} expansion(s) declined and decline policy is abort_all",
            declined.len()
        )));
    }

    build_commit(list_id, plan, &accepted, declined)
}

fn build_commit(
    list_id: &str,
    plan: &ListUpdatePlan,
    accepted: &IdSet,
    declined: IdSet,
) -> Result<CommitOutcome> {
    let visibility_updates = plan
        .expansions
        .iter()
        .filter(|e| accepted.contains(&e.id))
        .map(|e| VisibilityUpdate {
            recommendation_id: e.id.clone(),
            from: e.current_visibility,
            to: e.target_visibility,
            community_ids: e.target_community_ids.clone(),
        })
        .collect::<Vec<_>>();

    let request = CommitRequest {
        request_id: Uuid::new_v4(),
        list_id: list_id.to_string(),
        plan_digest: plan.digest()?,
        add: plan.to_add.difference(&declined),
        remove: plan.to_remove.clone(),
        visibility_updates,
        declined,
        created_at: Utc::now(),
    };
    obs::emit_commit_finalized(
        &request.request_id.to_string(),
        request.add.len(),
        request.remove.len(),
        request.visibility_updates.len(),
    );
    Ok(CommitOutcome::Commit(request))
}

/// Ask `port` about the plan's expansions (if any) and build the commit.
///
/// Plans without expansions never reach the port.
pub async fn finalize_plan(
    list: &RecommendationList,
    plan: &ListUpdatePlan,
    port: &dyn ConfirmationPort,
    policy: DeclinePolicy,
) -> Result<CommitOutcome> {
    async {
        if !plan.requires_confirmation() {
            return build_commit(&list.id, plan, &IdSet::new(), IdSet::new());
        }
        let request = ConfirmationRequest::from_plan(list, plan)?;
        let response = port.confirm(&request).await?;
        resolve_plan(&list.id, plan, &response, policy)
    }
    .instrument(obs::list_span(&list.id))
    .await
}

fn abort(reason: String) -> CommitOutcome {
    METRICS.inc_commits_aborted();
    obs::emit_commit_aborted(&reason);
    CommitOutcome::Aborted { reason }
}
