//! Shareable recommendation lists.

use serde::{Deserialize, Serialize};

use super::ids::{deserialize_lenient, IdSet};
use super::recommendation::deserialize_id;
use super::visibility::VisibilityLevel;

/// A named collection of recommendations with its own audience.
///
/// A list's visibility is independent of the visibility of its members;
/// adding a member that is narrower than the list is what the expansion
/// rules guard against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationList {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default, alias = "title")]
    pub name: Option<String>,

    /// `specific` decodes as `communities`.
    #[serde(default)]
    pub visibility: VisibilityLevel,

    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub trust_circle_ids: IdSet,

    /// Current members. Must be an array of ids when present.
    #[serde(default)]
    pub recommendation_ids: IdSet,
}

impl RecommendationList {
    pub fn new(id: impl Into<String>, visibility: VisibilityLevel) -> Self {
        Self {
            id: id.into(),
            name: None,
            visibility,
            trust_circle_ids: IdSet::new(),
            recommendation_ids: IdSet::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_trust_circles<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trust_circle_ids = ids.into_iter().collect();
        self
    }

    pub fn with_members<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendation_ids = ids.into_iter().collect();
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}
