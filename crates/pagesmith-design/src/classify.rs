//! Element and section classification.

use pagesmith_core::{ElementKind, Layer, SectionKind};

/// Text at or above this size (and bold) is a heading.
pub const HEADING_MIN_SIZE: f64 = 24.0;
/// Text at or below this size is always body copy.
pub const PARAGRAPH_MAX_SIZE: f64 = 16.0;
/// Bold text shorter than this many characters reads as a button label.
pub const BUTTON_MAX_CHARS: usize = 30;
/// A page whose first text layer is this large is treated as a hero.
pub const HERO_MIN_SIZE: f64 = 32.0;

const ICON_MAX_SIDE: f64 = 100.0;
const ICON_MAX_ASPECT_DELTA: f64 = 20.0;

/// Classify a single layer into an element kind.
///
/// Shapes always classify as [`ElementKind::Card`] here; the page parser
/// demotes empty, square-cornered shapes to containers once it knows what
/// they hold.
pub fn classify_element(layer: &Layer) -> ElementKind {
    match layer {
        Layer::Text(text) => {
            let size = text.font.size;
            let bold = text.font.weight.is_bold();

            if size >= HEADING_MIN_SIZE && bold {
                ElementKind::Heading
            } else if size <= PARAGRAPH_MAX_SIZE {
                ElementKind::Paragraph
            } else if bold && text.content.chars().count() < BUTTON_MAX_CHARS {
                ElementKind::Button
            } else {
                ElementKind::Paragraph
            }
        }
        Layer::Image(image) => {
            let (width, height) = (image.position.width, image.position.height);
            if width <= ICON_MAX_SIDE
                && height <= ICON_MAX_SIDE
                && (width - height).abs() < ICON_MAX_ASPECT_DELTA
            {
                ElementKind::Icon
            } else {
                ElementKind::Image
            }
        }
        Layer::Shape(_) => ElementKind::Card,
        Layer::Unknown => ElementKind::Container,
    }
}

/// Classifies pages into section kinds.
#[derive(Debug, Clone)]
pub struct SectionClassifier {
    /// Page-name substrings per section kind, checked in order.
    section_keywords: Vec<(SectionKind, Vec<&'static str>)>,
}

impl SectionClassifier {
    pub fn new() -> Self {
        Self {
            section_keywords: vec![
                (SectionKind::Header, vec!["header", "nav"]),
                (SectionKind::Hero, vec!["hero", "banner"]),
                (SectionKind::Features, vec!["feature", "service"]),
                (SectionKind::Pricing, vec!["pricing", "plan"]),
                (SectionKind::Testimonials, vec!["testimonial", "review"]),
                (SectionKind::Footer, vec!["footer", "contact"]),
            ],
        }
    }

    /// Classify a page by its name, falling back to its layers.
    pub fn classify(&self, page_name: &str, layers: &[Layer]) -> SectionKind {
        if let Some(kind) = self.kind_from_name(page_name) {
            return kind;
        }

        let first_text = layers.iter().find_map(Layer::as_text);
        match first_text {
            Some(text) if text.font.size >= HERO_MIN_SIZE => {
                tracing::debug!(page = page_name, "no section keyword; large first text implies hero");
                SectionKind::Hero
            }
            _ => {
                tracing::debug!(page = page_name, "no section keyword; using custom section");
                SectionKind::Custom
            }
        }
    }

    fn kind_from_name(&self, page_name: &str) -> Option<SectionKind> {
        let name_lower = page_name.to_lowercase();

        for (kind, keywords) in &self.section_keywords {
            if keywords.iter().any(|keyword| name_lower.contains(keyword)) {
                return Some(*kind);
            }
        }

        None
    }
}

impl Default for SectionClassifier {
    fn default() -> Self {
        Self::new()
    }
}
