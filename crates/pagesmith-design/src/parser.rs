//! Page and design parsing.

use crate::classify::{classify_element, SectionClassifier};
use crate::tokens::extract_design_tokens;
use pagesmith_core::tokens::DEFAULT_BACKGROUND;
use pagesmith_core::{
    Color, DesignExport, DesignMetadata, ElementKind, FontStyle, ImageLayer, Layer, PageExport,
    ParsedDesign, ParsedElement, ParsedSection, ShapeLayer, TextLayer,
};

/// A shape at least this fraction of the page width can be the page background.
pub const BACKGROUND_MIN_WIDTH_RATIO: f64 = 0.8;

/// Converts design exports into sections, elements and tokens.
#[derive(Debug, Clone, Default)]
pub struct DesignParser {
    classifier: SectionClassifier,
}

impl DesignParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert one layer into an element. Unknown layers yield `None`.
    pub fn parse_layer(&self, layer: &Layer) -> Option<ParsedElement> {
        let kind = classify_element(layer);
        match layer {
            Layer::Text(text) => Some(text_element(kind, text)),
            Layer::Image(image) => Some(image_element(kind, image)),
            Layer::Shape(shape) => Some(shape_element(kind, shape)),
            Layer::Unknown => None,
        }
    }

    /// Convert one page into a section.
    ///
    /// Elements come out ordered by ascending `y`, independent of the order
    /// of the layers in the export.
    pub fn parse_page(&self, page: &PageExport) -> ParsedSection {
        let kind = self.classifier.classify(&page.name, &page.layers);

        let mut layers: Vec<&Layer> = page
            .layers
            .iter()
            .filter(|layer| {
                let known = !matches!(layer, Layer::Unknown);
                if !known {
                    tracing::debug!(page = %page.name, "skipping layer of unknown kind");
                }
                known
            })
            .collect();
        layers.sort_by(|a, b| a.position().y.total_cmp(&b.position().y));

        let background = find_background(page, &layers);
        let background_color = background
            .and_then(|i| layers[i].as_shape())
            .and_then(|shape| normalized_fill(&shape.fill))
            .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());

        // Which card, if any, absorbs each layer.
        let mut owner: Vec<Option<usize>> = vec![None; layers.len()];
        for (i, layer) in layers.iter().enumerate() {
            let Layer::Shape(shape) = layer else { continue };
            if Some(i) == background {
                continue;
            }
            for (j, candidate) in layers.iter().enumerate() {
                let absorbable = matches!(candidate, Layer::Text(_) | Layer::Image(_));
                if absorbable && owner[j].is_none() && shape.position.contains(&candidate.position()) {
                    owner[j] = Some(i);
                }
            }
        }

        let mut elements = Vec::new();
        for (i, layer) in layers.iter().enumerate() {
            if Some(i) == background || owner[i].is_some() {
                continue;
            }
            let Some(mut element) = self.parse_layer(layer) else {
                continue;
            };
            if let Layer::Shape(shape) = layer {
                element.children = layers
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| owner[*j] == Some(i))
                    .filter_map(|(_, child)| self.parse_layer(child))
                    .collect();
                if element.children.is_empty() && !has_radius(shape) {
                    element.kind = ElementKind::Container;
                }
            }
            elements.push(element);
        }

        ParsedSection {
            kind,
            page_name: page.name.clone(),
            elements,
            background_color,
        }
    }

    /// Parse a whole design: one section per page plus inferred tokens.
    pub fn parse_design(&self, export: &DesignExport) -> ParsedDesign {
        let sections: Vec<ParsedSection> = export.pages.iter().map(|p| self.parse_page(p)).collect();
        let design_tokens = extract_design_tokens(&export.pages);

        tracing::info!(
            pages = export.pages.len(),
            elements = sections.iter().map(|s| s.elements.len()).sum::<usize>(),
            "design parsed"
        );

        ParsedDesign {
            sections,
            design_tokens,
            metadata: DesignMetadata {
                total_pages: export.pages.len(),
                design_id: export.design_id.clone(),
                design_title: export.design_title.clone(),
            },
        }
    }
}

/// Parse a design with the default parser.
pub fn parse_design(export: &DesignExport) -> ParsedDesign {
    DesignParser::new().parse_design(export)
}

/// Index of the largest shape spanning most of the page width.
fn find_background(page: &PageExport, layers: &[&Layer]) -> Option<usize> {
    let min_width = page.dimensions.width * BACKGROUND_MIN_WIDTH_RATIO;
    let mut best: Option<(usize, f64)> = None;
    for (i, layer) in layers.iter().enumerate() {
        let Some(shape) = layer.as_shape() else { continue };
        if shape.position.width < min_width {
            continue;
        }
        let area = shape.position.area();
        if best.map_or(true, |(_, best_area)| area > best_area) {
            best = Some((i, area));
        }
    }
    best.map(|(i, _)| i)
}

fn has_radius(shape: &ShapeLayer) -> bool {
    shape.border_radius.is_some_and(|r| r > 0.0)
}

fn normalized_fill(fill: &str) -> Option<String> {
    let fill = fill.trim();
    if fill.is_empty() {
        return None;
    }
    Some(match Color::from_hex(fill) {
        Some(color) if fill.starts_with('#') => color.to_hex(),
        _ => fill.to_string(),
    })
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

fn text_element(kind: ElementKind, text: &TextLayer) -> ParsedElement {
    let mut element = ParsedElement::new(kind, text.position).with_content(text.content.clone());
    if !text.color.trim().is_empty() {
        element = element.with_style("color", text.color.trim());
    }
    if text.font.size > 0.0 {
        element = element.with_style("font-size", px(text.font.size));
    }
    if !text.font.family.trim().is_empty() {
        element = element.with_style("font-family", text.font.family.trim());
    }
    element = element.with_style("font-weight", text.font.weight.css_value());
    if text.font.style == FontStyle::Italic {
        element = element.with_style("font-style", "italic");
    }
    element.with_style("text-align", text.alignment.as_str())
}

fn image_element(kind: ElementKind, image: &ImageLayer) -> ParsedElement {
    let mut element = ParsedElement::new(kind, image.position)
        .with_content(image.url.trim())
        .with_style("width", px(image.position.width))
        .with_style("height", px(image.position.height));
    if let Some(filter) = image.filters.as_ref().and_then(|f| f.css_value()) {
        element = element.with_style("filter", filter);
    }
    element
}

fn shape_element(kind: ElementKind, shape: &ShapeLayer) -> ParsedElement {
    let mut element = ParsedElement::new(kind, shape.position);
    if let Some(fill) = normalized_fill(&shape.fill) {
        element = element.with_style("background-color", fill);
    }
    if let Some(radius) = shape.border_radius.filter(|r| *r > 0.0) {
        element = element.with_style("border-radius", px(radius));
    }
    element = element
        .with_style("width", px(shape.position.width))
        .with_style("height", px(shape.position.height));
    if let Some(stroke) = &shape.stroke {
        if stroke.width > 0.0 && !stroke.color.trim().is_empty() {
            element = element.with_style("border", format!("{} solid {}", px(stroke.width), stroke.color.trim()));
        }
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_core::{Dimensions, FontSpec, FontWeight, Rect, SectionKind, Stroke};
    use proptest::prelude::*;
    use serde_json::json;

    fn text_at(content: &str, y: f64) -> Layer {
        Layer::Text(TextLayer {
            content: content.to_string(),
            color: "#111111".to_string(),
            font: FontSpec {
                family: "Inter".to_string(),
                size: 16.0,
                weight: FontWeight::Normal,
                ..Default::default()
            },
            position: Rect::new(0.0, y, 200.0, 20.0),
            ..Default::default()
        })
    }

    fn shape_at(fill: &str, rect: Rect, radius: Option<f64>) -> Layer {
        Layer::Shape(ShapeLayer {
            fill: fill.to_string(),
            position: rect,
            border_radius: radius,
            ..Default::default()
        })
    }

    fn page(name: &str, layers: Vec<Layer>) -> PageExport {
        PageExport {
            name: name.to_string(),
            dimensions: Dimensions {
                width: 1000.0,
                height: 800.0,
            },
            layers,
            ..Default::default()
        }
    }

    #[test]
    fn test_elements_ordered_by_y() {
        let parser = DesignParser::new();
        let section = parser.parse_page(&page(
            "Page",
            vec![text_at("c", 50.0), text_at("a", 10.0), text_at("b", 30.0)],
        ));

        let ys: Vec<f64> = section.elements.iter().map(|e| e.position.y).collect();
        assert_eq!(ys, vec![10.0, 30.0, 50.0]);
        let contents: Vec<_> = section.elements.iter().filter_map(|e| e.content.as_deref()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_background_detection() {
        let parser = DesignParser::new();
        let section = parser.parse_page(&page(
            "Hero",
            vec![
                shape_at("#0f172a", Rect::new(0.0, 0.0, 1000.0, 800.0), None),
                shape_at("#ffffff", Rect::new(0.0, 0.0, 900.0, 100.0), None),
                text_at("Hello", 300.0),
            ],
        ));

        assert_eq!(section.kind, SectionKind::Hero);
        assert_eq!(section.background_color, "#0F172A");
        // The narrower full-width strip stays an element.
        assert_eq!(section.elements.len(), 2);
        assert_eq!(section.elements[0].kind, ElementKind::Container);
    }

    #[test]
    fn test_no_background_defaults_to_white() {
        let parser = DesignParser::new();
        let section = parser.parse_page(&page(
            "Page",
            vec![shape_at("#000000", Rect::new(0.0, 0.0, 100.0, 100.0), Some(8.0))],
        ));
        assert_eq!(section.background_color, "#FFFFFF");
        assert_eq!(section.elements[0].kind, ElementKind::Card);
        assert_eq!(section.elements[0].styles.get("border-radius").map(String::as_str), Some("8px"));
    }

    #[test]
    fn test_card_aggregates_contained_layers() {
        let parser = DesignParser::new();
        let section = parser.parse_page(&page(
            "Features",
            vec![
                text_at("Outside", 10.0),
                text_at("Inside second", 160.0),
                shape_at("#F3F4F6", Rect::new(0.0, 100.0, 300.0, 200.0), None),
                text_at("Inside first", 120.0),
            ],
        ));

        assert_eq!(section.elements.len(), 2);
        assert_eq!(section.elements[0].content.as_deref(), Some("Outside"));
        let card = &section.elements[1];
        assert_eq!(card.kind, ElementKind::Card);
        let children: Vec<_> = card.children.iter().filter_map(|c| c.content.as_deref()).collect();
        assert_eq!(children, vec!["Inside first", "Inside second"]);
    }

    #[test]
    fn test_style_mapping() {
        let parser = DesignParser::new();
        let layer: Layer = serde_json::from_value(json!({
            "type": "text",
            "content": "Quote",
            "font": { "family": "Lora", "size": 20, "weight": 300, "style": "italic" },
            "color": "#334155",
            "alignment": "center"
        }))
        .unwrap();

        let element = parser.parse_layer(&layer).unwrap();
        let styles: Vec<(&str, &str)> = element
            .styles
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            styles,
            vec![
                ("color", "#334155"),
                ("font-size", "20px"),
                ("font-family", "Lora"),
                ("font-weight", "300"),
                ("font-style", "italic"),
                ("text-align", "center"),
            ]
        );

        let bordered = Layer::Shape(ShapeLayer {
            fill: "#fff".to_string(),
            stroke: Some(Stroke {
                color: "#E5E7EB".to_string(),
                width: 1.0,
            }),
            position: Rect::new(0.0, 0.0, 50.0, 20.0),
            ..Default::default()
        });
        let element = parser.parse_layer(&bordered).unwrap();
        assert_eq!(element.styles["background-color"], "#FFFFFF");
        assert_eq!(element.styles["border"], "1px solid #E5E7EB");
    }

    #[test]
    fn test_unknown_layers_skipped() {
        let export = DesignExport::from_json(
            r#"{"designId":"d1","designTitle":"Launch","pages":[{"name":"Landing","structure":[{"type":"video"},{"type":"text","content":"Hi","font":{"size":14}}]}]}"#,
        )
        .unwrap();

        let design = parse_design(&export);
        assert_eq!(design.metadata.total_pages, 1);
        assert_eq!(design.metadata.design_title, "Launch");
        assert_eq!(design.sections[0].elements.len(), 1);
        assert_eq!(design.sections[0].page_name, "Landing");
    }

    #[test]
    fn test_empty_page_falls_back() {
        let design = parse_design(&DesignExport {
            pages: vec![page("Page", Vec::new())],
            ..Default::default()
        });
        assert_eq!(design.design_tokens, pagesmith_core::DesignTokens::default());
        assert!(design.sections[0].elements.is_empty());
        assert_eq!(design.sections[0].kind, SectionKind::Custom);
    }

    proptest! {
        #[test]
        fn test_order_is_position_derived(ys in proptest::collection::vec(0u16..2000, 0..24)) {
            let layers: Vec<Layer> = ys.iter().map(|y| text_at("t", *y as f64)).collect();
            let section = DesignParser::new().parse_page(&page("Page", layers));

            let out: Vec<f64> = section.elements.iter().map(|e| e.position.y).collect();
            let mut expected: Vec<f64> = ys.iter().map(|y| *y as f64).collect();
            expected.sort_by(|a, b| a.total_cmp(b));
            prop_assert_eq!(out, expected);
        }
    }
}
