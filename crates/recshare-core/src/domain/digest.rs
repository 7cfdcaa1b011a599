//! Canonical JSON digests.
//!
//! Plans are hashed over canonical JSON so that a confirmation can be bound
//! to the exact plan that was shown to the user. Canonical means compact
//! encoding with object keys in byte order, which is the order of
//! `serde_json::Map` (a `BTreeMap` without `preserve_order`).

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::error::Result;

/// Canonical compact JSON for any serializable value.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(serde_json::to_string(&value)?)
}

/// SHA-256 hex digest of the canonical JSON of `value`.
pub fn compute_digest<T: Serialize>(value: &T) -> Result<String> {
    let canonical = canonical_json(value)?;
    Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
}
