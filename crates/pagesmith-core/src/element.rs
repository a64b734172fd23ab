//! The parsed intermediate representation.
//!
//! One parse invocation owns these values; they are handed to the markup
//! generator and dropped afterwards.

use crate::layer::Rect;
use crate::tokens::DesignTokens;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// CSS declarations keyed by property name, in insertion order.
///
/// Order matters: the generator emits declarations in this order and must be
/// byte-for-byte deterministic.
pub type StyleMap = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Heading,
    Paragraph,
    Button,
    Image,
    Icon,
    Card,
    Container,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Button => "button",
            Self::Image => "image",
            Self::Icon => "icon",
            Self::Card => "card",
            Self::Container => "container",
        }
    }
}

/// A typed element produced from one layer (or a card aggregating several).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub styles: StyleMap,
    pub position: Rect,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ParsedElement>,
}

impl ParsedElement {
    pub fn new(kind: ElementKind, position: Rect) -> Self {
        Self {
            kind,
            content: None,
            styles: StyleMap::new(),
            position,
            children: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: ParsedElement) -> Self {
        self.children.push(child);
        self
    }

    /// Font size in pixels, read back from the `font-size` style.
    pub fn font_size(&self) -> Option<f64> {
        self.styles
            .get("font-size")
            .and_then(|v| v.trim().trim_end_matches("px").parse().ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Header,
    Hero,
    Features,
    Pricing,
    Testimonials,
    Footer,
    Custom,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Hero => "hero",
            Self::Features => "features",
            Self::Pricing => "pricing",
            Self::Testimonials => "testimonials",
            Self::Footer => "footer",
            Self::Custom => "custom",
        }
    }
}

/// A page-level grouping of elements.
///
/// `elements` is always ordered by ascending vertical position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSection {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub page_name: String,
    pub elements: Vec<ParsedElement>,
    pub background_color: String,
}

/// Descriptive data carried alongside a parse result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignMetadata {
    pub total_pages: usize,
    pub design_id: String,
    pub design_title: String,
}

/// The full output of the design parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDesign {
    pub sections: Vec<ParsedSection>,
    pub design_tokens: DesignTokens,
    pub metadata: DesignMetadata,
}
