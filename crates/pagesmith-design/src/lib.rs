//! Design import for pagesmith.
//!
//! Turns a layered design export into the typed intermediate representation
//! the markup generator consumes:
//! - [`classify`]: element and section classification heuristics
//! - [`tokens`]: frequency-based design-token inference
//! - [`parser`]: page and design parsing
//!
//! Every operation here is infallible. Malformed or missing layer fields are
//! defaulted when the export is decoded, and unknown layer kinds are skipped.

pub mod classify;
pub mod parser;
pub mod tokens;

pub use classify::{classify_element, SectionClassifier};
pub use parser::{parse_design, DesignParser};
pub use tokens::{extract_design_tokens, TokenExtractor};
