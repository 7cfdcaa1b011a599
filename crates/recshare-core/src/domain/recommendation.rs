//! Recommendation records as seen by the sharing rules.

use serde::{Deserialize, Deserializer, Serialize};

use super::ids::{deserialize_lenient, id_from_value, IdSet};
use super::visibility::VisibilityLevel;

/// The subset of a recommendation the visibility rules care about.
///
/// Display fields beyond `name` are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Provider/business name shown in confirmation prompts.
    #[serde(default, alias = "business_name")]
    pub name: Option<String>,

    #[serde(default)]
    pub visibility: VisibilityLevel,

    /// Communities the recommendation is shared with. Only meaningful at the
    /// `communities` tier.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub community_ids: IdSet,
}

impl Recommendation {
    pub fn new(id: impl Into<String>, visibility: VisibilityLevel) -> Self {
        Self {
            id: id.into(),
            name: None,
            visibility,
            community_ids: IdSet::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_communities<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.community_ids = ids.into_iter().collect();
        self
    }

    /// Communities that actually grant access: empty unless the
    /// recommendation is community-scoped.
    pub fn effective_communities(&self) -> IdSet {
        if self.visibility.is_community_scoped() {
            self.community_ids.clone()
        } else {
            IdSet::new()
        }
    }

    /// Name for user-facing messages, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    id_from_value(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_defaults() {
        let rec: Recommendation = serde_json::from_value(json!({
            "id": 12,
            "business_name": "Ace Plumbing",
            "rating": 5
        }))
        .unwrap();
        assert_eq!(rec.id, "12");
        assert_eq!(rec.name.as_deref(), Some("Ace Plumbing"));
        assert_eq!(rec.visibility, VisibilityLevel::Private);
        assert!(rec.community_ids.is_empty());
    }

    #[test]
    fn test_decode_non_array_communities_is_empty() {
        let rec: Recommendation = serde_json::from_value(json!({
            "id": "r1",
            "visibility": "communities",
            "community_ids": "A"
        }))
        .unwrap();
        assert!(rec.community_ids.is_empty());
    }

    #[test]
    fn test_decode_rejects_padded_id() {
        let res = serde_json::from_value::<Recommendation>(json!({"id": " 12"}));
        assert!(res.is_err());
    }

    #[test]
    fn test_decode_rejects_bad_community_entry() {
        let res = serde_json::from_value::<Recommendation>(json!({
            "id": "r1",
            "community_ids": ["A", true]
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_effective_communities_ignored_outside_tier() {
        let rec = Recommendation::new("r1", VisibilityLevel::Public).with_communities(["A"]);
        assert!(rec.effective_communities().is_empty());

        let rec = Recommendation::new("r1", VisibilityLevel::Communities).with_communities(["A"]);
        assert!(rec.effective_communities().contains("A"));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let rec = Recommendation::new("r9", VisibilityLevel::Private);
        assert_eq!(rec.display_name(), "r9");
        assert_eq!(rec.with_name("Bob's Bikes").display_name(), "Bob's Bikes");
    }
}
