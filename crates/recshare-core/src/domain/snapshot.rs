//! Snapshot documents handed to the planner by the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{Result, ShareError};
use super::ids::IdSet;
use super::list::RecommendationList;
use super::recommendation::Recommendation;

/// Recommendation records keyed by id.
pub type RecommendationIndex = BTreeMap<String, Recommendation>;

/// Everything needed to plan one list edit: the list as it is now, the
/// recommendation records involved and the membership the user wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub list: RecommendationList,

    #[serde(default)]
    pub recommendations: Vec<Recommendation>,

    pub desired_recommendation_ids: IdSet,
}

impl ListSnapshot {
    /// Decode a snapshot document.
    ///
    /// Shape errors (wrong collection types, bad ids) are
    /// [`ShareError::InvalidArgument`]; malformed JSON text is
    /// [`ShareError::Serialization`].
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| match e.classify() {
            serde_json::error::Category::Data => ShareError::invalid(e.to_string()),
            _ => ShareError::Serialization(e),
        })
    }

    /// Index the snapshot's recommendation records by id.
    pub fn index(&self) -> Result<RecommendationIndex> {
        index_recommendations(&self.recommendations)
    }
}

/// Build a by-id lookup, rejecting duplicate ids.
pub fn index_recommendations(records: &[Recommendation]) -> Result<RecommendationIndex> {
    let mut index = RecommendationIndex::new();
    for rec in records {
        if index.insert(rec.id.clone(), rec.clone()).is_some() {
            return Err(ShareError::invalid(format!(
                "duplicate recommendation id: {}",
                rec.id
            )));
        }
    }
    Ok(index)
}
