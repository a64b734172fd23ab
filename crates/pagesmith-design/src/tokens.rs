//! Design-token inference.
//!
//! Colors and fonts are ranked by how often they occur across every text and
//! shape layer of a design. The most frequent distinct colors become the
//! primary, secondary and accent colors; the most frequent fonts become the
//! heading and body fonts. Spacing and radius scales are fixed.

use indexmap::IndexMap;
use pagesmith_core::{Color, DesignTokens, Layer, PageExport};

/// Accumulates color and font occurrences over a batch of layers.
#[derive(Debug, Default)]
pub struct TokenExtractor {
    colors: IndexMap<String, usize>,
    fonts: IndexMap<String, usize>,
    background: Option<String>,
}

impl TokenExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the colors and font of one layer.
    pub fn observe_layer(&mut self, layer: &Layer) {
        match layer {
            Layer::Text(text) => {
                count(&mut self.colors, normalize_color(&text.color));
                count(&mut self.fonts, normalize_font(&text.font.family));
            }
            Layer::Shape(shape) => {
                count(&mut self.colors, normalize_color(&shape.fill));
            }
            Layer::Image(_) | Layer::Unknown => {}
        }
    }

    /// Count every layer of a page.
    ///
    /// The first page observed also supplies the background color: the fill
    /// of its first shape layer.
    pub fn observe_page(&mut self, page: &PageExport) {
        let first_page = self.background.is_none();
        for layer in &page.layers {
            self.observe_layer(layer);
        }
        if first_page {
            let fill = page
                .layers
                .iter()
                .find_map(Layer::as_shape)
                .and_then(|shape| normalize_color(&shape.fill));
            self.background = Some(fill.unwrap_or_default());
        }
    }

    /// Build the token record, filling anything unobserved with defaults.
    pub fn finish(self) -> DesignTokens {
        let defaults = DesignTokens::default();
        let colors = ranked(self.colors);
        let fonts = ranked(self.fonts);

        let mut colors = colors.into_iter();
        let color_primary = colors.next().unwrap_or(defaults.color_primary);
        let color_secondary = colors.next().unwrap_or(defaults.color_secondary);
        let color_accent = colors.next().unwrap_or(defaults.color_accent);

        let mut fonts = fonts.into_iter();
        let font_heading = fonts.next().unwrap_or(defaults.font_heading);
        // A single observed font serves both roles.
        let font_body = fonts.next().unwrap_or_else(|| font_heading.clone());

        let color_background = self
            .background
            .filter(|fill| !fill.is_empty())
            .unwrap_or(defaults.color_background);

        DesignTokens {
            color_primary,
            color_secondary,
            color_accent,
            color_background,
            font_heading,
            font_body,
            ..defaults
        }
    }
}

/// Infer design tokens for a whole design.
///
/// Never fails: a design with no text or shape layers yields the default palette.
pub fn extract_design_tokens(pages: &[PageExport]) -> DesignTokens {
    let mut extractor = TokenExtractor::new();
    for page in pages {
        extractor.observe_page(page);
    }
    extractor.finish()
}

fn count(counts: &mut IndexMap<String, usize>, value: Option<String>) {
    if let Some(value) = value {
        *counts.entry(value).or_insert(0) += 1;
    }
}

/// Values by descending count; ties keep first-seen order.
fn ranked(counts: IndexMap<String, usize>) -> Vec<String> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().map(|(value, _)| value).collect()
}

/// Canonical `#RRGGBB` for parseable hex colors, trimmed text otherwise.
fn normalize_color(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(match Color::from_hex(raw) {
        Some(color) if raw.starts_with('#') => color.to_hex(),
        _ => raw.to_string(),
    })
}

fn normalize_font(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}
