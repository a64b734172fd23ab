//! Locked regions and the placeholder token format.

use serde::{Deserialize, Serialize};

/// Attribute carrying a lock id on a region root in an editable document.
pub const LOCK_ATTR: &str = "data-lock";

/// Prefix of the placeholder comment body. The full token is `<!--LOCK:<id>-->`.
///
/// This literal is part of the contract sent to the generative backend; the
/// contract text is built from [`LockedRegion::placeholder`] so both move together.
pub const LOCK_TOKEN_PREFIX: &str = "LOCK:";

/// A markup subtree the user asked to keep verbatim across regenerations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedRegion {
    /// Opaque, stable id.
    pub id: String,
    /// Short human-readable hint for where the region belongs.
    pub label: String,
    /// Verbatim serialized subtree.
    pub html: String,
}

impl LockedRegion {
    pub fn new(id: impl Into<String>, label: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            html: html.into(),
        }
    }

    /// The placeholder comment the backend must echo for this region.
    pub fn placeholder(&self) -> String {
        placeholder_for(&self.id)
    }
}

/// Placeholder comment for a lock id.
pub fn placeholder_for(id: &str) -> String {
    format!("<!--{}{}-->", LOCK_TOKEN_PREFIX, id)
}

/// Extract the lock id from a comment body such as `LOCK:L1` or ` LOCK:L1 `.
pub fn parse_placeholder_body(body: &str) -> Option<&str> {
    let id = body.trim().strip_prefix(LOCK_TOKEN_PREFIX)?.trim();
    (!id.is_empty()).then_some(id)
}
