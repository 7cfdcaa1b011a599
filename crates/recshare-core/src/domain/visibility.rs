//! Visibility tiers for recommendations and lists.

use serde::{Deserialize, Deserializer, Serialize};

/// Exposure tier of a recommendation or list.
///
/// Tiers are totally ordered from most restrictive to broadest:
/// `Private < Communities < Connections < Public`.
///
/// Decoding is fail-safe: the `specific` alias maps to [`Communities`],
/// anything unrecognized (or missing) maps to [`Private`].
///
/// [`Communities`]: VisibilityLevel::Communities
/// [`Private`]: VisibilityLevel::Private
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityLevel {
    /// Only the owner can see it.
    #[default]
    Private,
    /// Shared with an explicit set of trust circles.
    Communities,
    /// Visible to all of the owner's connections.
    Connections,
    /// Visible to everyone.
    Public,
}

impl VisibilityLevel {
    pub const ALL: [VisibilityLevel; 4] = [
        Self::Private,
        Self::Communities,
        Self::Connections,
        Self::Public,
    ];

    /// Decode a wire value. Never fails; unknown values are `Private`.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "public" => Self::Public,
            "connections" => Self::Connections,
            "communities" | "specific" => Self::Communities,
            _ => Self::Private,
        }
    }

    /// Numeric rank used for comparisons (`private = 0` .. `public = 3`).
    pub fn level(self) -> u8 {
        match self {
            Self::Private => 0,
            Self::Communities => 1,
            Self::Connections => 2,
            Self::Public => 3,
        }
    }

    /// Whether the tier is scoped to an explicit set of communities.
    pub fn is_community_scoped(self) -> bool {
        matches!(self, Self::Communities)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Communities => "communities",
            Self::Connections => "connections",
            Self::Public => "public",
        }
    }
}

impl std::fmt::Display for VisibilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for VisibilityLevel {
    fn from(raw: &str) -> Self {
        Self::from_wire(raw)
    }
}

impl<'de> Deserialize<'de> for VisibilityLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .map(Self::from_wire)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_ordering() {
        assert!(VisibilityLevel::Private < VisibilityLevel::Communities);
        assert!(VisibilityLevel::Communities < VisibilityLevel::Connections);
        assert!(VisibilityLevel::Connections < VisibilityLevel::Public);
    }

    #[test]
    fn test_level_matches_ordering() {
        let levels: Vec<u8> = VisibilityLevel::ALL.iter().map(|v| v.level()).collect();
        assert_eq!(levels, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_specific_is_communities() {
        assert_eq!(
            VisibilityLevel::from_wire("specific"),
            VisibilityLevel::Communities
        );
        assert_eq!(
            VisibilityLevel::from_wire(" Communities "),
            VisibilityLevel::Communities
        );
    }

    #[test]
    fn test_unknown_is_private() {
        assert_eq!(VisibilityLevel::from_wire(""), VisibilityLevel::Private);
        assert_eq!(
            VisibilityLevel::from_wire("friends-of-friends"),
            VisibilityLevel::Private
        );
    }

    #[test]
    fn test_deserialize_is_fail_safe() {
        let v: VisibilityLevel = serde_json::from_str("\"public\"").unwrap();
        assert_eq!(v, VisibilityLevel::Public);
        let v: VisibilityLevel = serde_json::from_str("null").unwrap();
        assert_eq!(v, VisibilityLevel::Private);
        let v: VisibilityLevel = serde_json::from_str("42").unwrap();
        assert_eq!(v, VisibilityLevel::Private);
    }

    #[test]
    fn test_serializes_canonical_name() {
        let json = serde_json::to_string(&VisibilityLevel::from_wire("specific")).unwrap();
        assert_eq!(json, "\"communities\"");
    }
}
