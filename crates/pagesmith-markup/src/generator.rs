//! Document generation from parsed sections.

use crate::css::{token_css, GLOBAL_STYLES};
use crate::escape::{css_value, escape_attr, escape_text};
use pagesmith_core::tokens::DEFAULT_BACKGROUND;
use pagesmith_core::{DesignTokens, ElementKind, GeneratedDocument, ParsedElement, ParsedSection, SectionKind};
use std::collections::HashSet;

/// Headings at or above this pixel size render as `h1`.
pub const TOP_HEADING_MIN_SIZE: f64 = 32.0;

pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400/EEE/31343C?text=Image";
pub const DEFAULT_BUTTON_TEXT: &str = "Click Me";
pub const DEFAULT_TITLE: &str = "My Website";

const STAR_ICON_PATH: &str =
    "M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z";

/// Document-level settings for the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub lang: String,
    pub description: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            description: "Responsive website generated by pagesmith".to_string(),
        }
    }
}

/// Renders sections and tokens into a complete document.
#[derive(Debug, Clone, Default)]
pub struct MarkupGenerator {
    options: GeneratorOptions,
}

impl MarkupGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Render a document. Identical input always yields identical output.
    pub fn generate(&self, sections: &[ParsedSection], tokens: &DesignTokens, title: &str) -> GeneratedDocument {
        let title = if title.trim().is_empty() { DEFAULT_TITLE } else { title.trim() };

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n");
        html.push_str(&format!("<html lang=\"{}\">\n", escape_attr(&self.options.lang)));
        html.push_str("<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        html.push_str(&format!(
            "  <meta name=\"description\" content=\"{}\">\n",
            escape_attr(&self.options.description)
        ));
        html.push_str(&format!("  <title>{}</title>\n", escape_text(title)));
        html.push_str("  <style>\n");
        html.push_str(&token_css(tokens));
        html.push_str("\n\n");
        html.push_str(GLOBAL_STYLES);
        html.push_str("\n  </style>\n");
        html.push_str("</head>\n");
        html.push_str("<body>\n");

        let mut builder = HtmlBuilder {
            html: &mut html,
            indent: 1,
            used_ids: HashSet::new(),
        };
        for (index, section) in sections.iter().enumerate() {
            builder.write_section(section, index);
        }

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        tracing::info!(sections = sections.len(), bytes = html.len(), "document generated");
        GeneratedDocument::new(html)
    }
}

/// Render with default options.
pub fn generate(sections: &[ParsedSection], tokens: &DesignTokens, title: &str) -> GeneratedDocument {
    MarkupGenerator::default().generate(sections, tokens, title)
}

struct HtmlBuilder<'a> {
    html: &'a mut String,
    indent: usize,
    used_ids: HashSet<String>,
}

impl<'a> HtmlBuilder<'a> {
    fn write_line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.html.push_str("  ");
        }
        self.html.push_str(line);
        self.html.push('\n');
    }

    fn section_id(&mut self, section: &ParsedSection, index: usize) -> String {
        let id = match section.kind {
            SectionKind::Custom => format!("section-{}", index),
            kind => kind.as_str().to_string(),
        };
        let id = if self.used_ids.contains(&id) {
            format!("{}-{}", id, index)
        } else {
            id
        };
        self.used_ids.insert(id.clone());
        id
    }

    fn write_section(&mut self, section: &ParsedSection, index: usize) {
        let id = self.section_id(section, index);
        let background = css_value(&section.background_color);
        let style = if background.is_empty() || background.eq_ignore_ascii_case(DEFAULT_BACKGROUND) {
            String::new()
        } else {
            format!(" style=\"background-color: {}\"", escape_attr(&background))
        };

        self.write_line(&format!("<section id=\"{}\"{}>", escape_attr(&id), style));
        self.indent += 1;
        self.write_line("<div class=\"container\">");
        self.indent += 1;
        for (i, element) in section.elements.iter().enumerate() {
            self.write_element(element, i);
        }
        self.indent -= 1;
        self.write_line("</div>");
        self.indent -= 1;
        self.write_line("</section>");
    }

    fn write_element(&mut self, element: &ParsedElement, index: usize) {
        let style = style_attr(element);
        let content = element.content.as_deref().unwrap_or("");

        match element.kind {
            ElementKind::Heading => {
                let level = match element.font_size() {
                    Some(size) if size >= TOP_HEADING_MIN_SIZE => "h1",
                    _ => "h2",
                };
                self.write_line(&format!("<{level}{style}>{}</{level}>", escape_text(content)));
            }
            ElementKind::Paragraph => {
                self.write_line(&format!("<p{style}>{}</p>", escape_text(content)));
            }
            ElementKind::Button => {
                let label = if content.trim().is_empty() { DEFAULT_BUTTON_TEXT } else { content };
                self.write_line(&format!(
                    "<button class=\"btn\" type=\"button\"{style}>{}</button>",
                    escape_text(label)
                ));
            }
            ElementKind::Image => {
                let src = if content.trim().is_empty() { PLACEHOLDER_IMAGE_URL } else { content.trim() };
                self.write_line(&format!(
                    "<img src=\"{}\" alt=\"Image {}\" loading=\"lazy\"{style}>",
                    escape_attr(src),
                    index + 1
                ));
            }
            ElementKind::Icon => {
                self.write_line(&format!(
                    "<svg class=\"icon\" viewBox=\"0 0 24 24\" aria-hidden=\"true\"{style}><path fill=\"currentColor\" d=\"{}\"/></svg>",
                    STAR_ICON_PATH
                ));
            }
            ElementKind::Card | ElementKind::Container => {
                let class = if element.kind == ElementKind::Card { " class=\"card\"" } else { "" };
                if element.children.is_empty() {
                    self.write_line(&format!("<div{class}{style}>{}</div>", escape_text(content)));
                } else {
                    self.write_line(&format!("<div{class}{style}>"));
                    self.indent += 1;
                    for (i, child) in element.children.iter().enumerate() {
                        self.write_element(child, i);
                    }
                    self.indent -= 1;
                    self.write_line("</div>");
                }
            }
        }
    }
}

fn style_attr(element: &ParsedElement) -> String {
    let declarations: Vec<String> = element
        .styles
        .iter()
        .map(|(property, value)| (property, css_value(value)))
        .filter(|(_, value)| !value.is_empty())
        .map(|(property, value)| format!("{}: {}", property, value))
        .collect();

    if declarations.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape_attr(&declarations.join("; ")))
    }
}
