//! Identifier sets with explicit set algebra.
//!
//! Membership collections (list members, community ids, trust circles) are
//! modelled as [`IdSet`]s rather than arrays so that union / difference /
//! intersection are first-class and iteration order is deterministic.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::{Result, ShareError};

/// An ordered set of string identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IdSet(BTreeSet<String>);

impl IdSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Insert an id. Returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// `self ∪ other`
    pub fn union(&self, other: &IdSet) -> IdSet {
        IdSet(self.0.union(&other.0).cloned().collect())
    }

    /// `self \ other`
    pub fn difference(&self, other: &IdSet) -> IdSet {
        IdSet(self.0.difference(&other.0).cloned().collect())
    }

    /// `self ∩ other`
    pub fn intersection(&self, other: &IdSet) -> IdSet {
        IdSet(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn is_subset(&self, other: &IdSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// True if some id of `self` is missing from `other`, i.e. `self \ other ≠ ∅`.
    pub fn has_any_outside(&self, other: &IdSet) -> bool {
        self.0.iter().any(|id| !other.0.contains(id))
    }
}

impl<S: Into<String>> FromIterator<S> for IdSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        IdSet(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a IdSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for IdSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Render a JSON id (string or integer) as a string id.
///
/// Strings are taken verbatim; empty or whitespace-padded strings are not ids.
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() && s.trim() == s => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

fn collect_ids(items: &[Value], what: &str) -> Result<IdSet> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            id_from_value(item).ok_or_else(|| {
                ShareError::invalid(format!(
                    "{what}[{i}] is not a string or integer id: {item}"
                ))
            })
        })
        .collect()
}

/// Parse an id collection strictly.
///
/// `null` is the empty set; anything other than an array of string/integer
/// ids is [`ShareError::InvalidArgument`]. Duplicates collapse.
pub fn parse_id_set(value: &Value, what: &str) -> Result<IdSet> {
    match value {
        Value::Null => Ok(IdSet::new()),
        Value::Array(items) => collect_ids(items, what),
        other => Err(ShareError::invalid(format!(
            "{what} must be an array of ids, got {}",
            json_kind(other)
        ))),
    }
}

/// Parse an id collection leniently: a missing or non-array value is the
/// empty set, but array elements must still be valid ids.
pub fn parse_id_set_lenient(value: &Value, what: &str) -> Result<IdSet> {
    match value {
        Value::Array(items) => collect_ids(items, what),
        _ => Ok(IdSet::new()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<'de> Deserialize<'de> for IdSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        parse_id_set(&raw, "ids").map_err(serde::de::Error::custom)
    }
}

/// `deserialize_with` adapter for record fields that default to empty.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> std::result::Result<IdSet, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    parse_id_set_lenient(&raw, "ids").map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(ids: &[&str]) -> IdSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_set_algebra() {
        let a = set(&["a", "b", "c"]);
        let b = set(&["b", "c", "d"]);
        assert_eq!(a.union(&b), set(&["a", "b", "c", "d"]));
        assert_eq!(a.difference(&b), set(&["a"]));
        assert_eq!(b.difference(&a), set(&["d"]));
        assert_eq!(a.intersection(&b), set(&["b", "c"]));
        assert!(set(&["b"]).is_subset(&a));
        assert!(a.has_any_outside(&b));
        assert!(!set(&["b", "c"]).has_any_outside(&a));
    }

    #[test]
    fn test_duplicates_collapse() {
        let ids = parse_id_set(&json!(["x", "x", 7, 7]), "ids").unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("7"));
    }

    #[test]
    fn test_strict_rejects_non_array() {
        let err = parse_id_set(&json!("x,y"), "desired_recommendation_ids").unwrap_err();
        assert!(matches!(err, ShareError::InvalidArgument(_)));
        assert!(err.to_string().contains("desired_recommendation_ids"));
        assert!(parse_id_set(&json!(null), "ids").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_bad_elements() {
        let err = parse_id_set(&json!(["a", {"id": "b"}]), "ids").unwrap_err();
        assert!(err.to_string().contains("ids[1]"));
        assert!(parse_id_set_lenient(&json!(["a", 1.5]), "ids").is_err());
        assert!(parse_id_set(&json!([""]), "ids").is_err());
    }

    #[test]
    fn test_padded_ids_rejected() {
        let err = parse_id_set(&json!(["a", " a"]), "ids").unwrap_err();
        assert!(err.to_string().contains("ids[1]"));
        assert!(parse_id_set(&json!(["a\t"]), "ids").is_err());
        assert!(parse_id_set(&json!(["   "]), "ids").is_err());
        assert_eq!(id_from_value(&json!("a b")).as_deref(), Some("a b"));
    }

    #[test]
    fn test_lenient_defaults_to_empty() {
        assert!(parse_id_set_lenient(&json!("A"), "ids").unwrap().is_empty());
        assert!(parse_id_set_lenient(&json!({"A": true}), "ids")
            .unwrap()
            .is_empty());
        assert!(parse_id_set_lenient(&Value::Null, "ids").unwrap().is_empty());
    }

    #[test]
    fn test_serializes_sorted_array() {
        let ids = set(&["z", "a", "m"]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"["a","m","z"]"#);
    }
}
