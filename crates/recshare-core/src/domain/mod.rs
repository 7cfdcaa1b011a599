//! Domain models for recshare.
//!
//! Canonical definitions for the entities the sharing rules read:
//! - `VisibilityLevel`: ordered exposure tiers
//! - `IdSet`: membership collections with set algebra
//! - `Recommendation` / `RecommendationList`: snapshot records
//! - `ListSnapshot`: the document a list edit is planned from

pub mod digest;
pub mod error;
pub mod ids;
pub mod list;
pub mod recommendation;
pub mod snapshot;
pub mod visibility;

pub use digest::{canonical_json, compute_digest};
pub use error::{Result, ShareError};
pub use ids::{parse_id_set, parse_id_set_lenient, IdSet};
pub use list::RecommendationList;
pub use recommendation::Recommendation;
pub use snapshot::{index_recommendations, ListSnapshot, RecommendationIndex};
pub use visibility::VisibilityLevel;
