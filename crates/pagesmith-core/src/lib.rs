//! Core types for the pagesmith design-to-markup compiler.
//!
//! This crate provides the foundational types used across all other pagesmith crates:
//! - Design export input (layers, pages)
//! - The parsed intermediate representation (elements, sections, design tokens)
//! - Locked regions and the placeholder token format
//! - Color math used by token inference and navigation synthesis
//! - Error types

mod de;

pub mod color;
pub mod document;
pub mod element;
pub mod errors;
pub mod layer;
pub mod lock;
pub mod tokens;

pub use color::Color;
pub use document::{GeneratedDocument, EDIT_MARKER_ATTR};
pub use element::{ElementKind, ParsedDesign, DesignMetadata, ParsedElement, ParsedSection, SectionKind, StyleMap};
pub use errors::*;
pub use layer::{
    DesignExport, Dimensions, FontSpec, FontStyle, FontWeight, ImageFilters, ImageLayer, Layer,
    PageExport, Rect, ShapeKind, ShapeLayer, Stroke, TextAlign, TextLayer,
};
pub use lock::{parse_placeholder_body, placeholder_for, LockedRegion, LOCK_ATTR, LOCK_TOKEN_PREFIX};
pub use tokens::{DesignTokens, TokenCategory};
