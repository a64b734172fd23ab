//! The artifact both producer paths converge on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute marking an element as editable; its value is `<tag>-<n>`.
pub const EDIT_MARKER_ATTR: &str = "data-edit";

/// A complete HTML document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedDocument(String);

impl GeneratedDocument {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GeneratedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GeneratedDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<GeneratedDocument> for String {
    fn from(doc: GeneratedDocument) -> Self {
        doc.0
    }
}
