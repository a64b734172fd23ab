//! Path A: design import.

use pagesmith_core::{DesignError, DesignExport, GeneratedDocument, ParsedDesign};
use pagesmith_design::DesignParser;
use pagesmith_markup::{GeneratorOptions, MarkupGenerator};
use pagesmith_post::{AssetMap, PostProcessOptions, PostProcessor};

/// Parses a design export and renders it as an editable document.
///
/// The rendered markup goes through the post-processor (without a
/// synthesized navigation layer) so the result carries the same baseline
/// styles and editable markers as prompt-driven output, and can be opened in
/// a lock session.
#[derive(Debug, Clone)]
pub struct DesignImporter {
    parser: DesignParser,
    generator: MarkupGenerator,
    processor: PostProcessor,
}

impl Default for DesignImporter {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl DesignImporter {
    pub fn new(options: GeneratorOptions) -> Self {
        let post = PostProcessOptions {
            lang: options.lang.clone(),
            mobile_nav: false,
            ..Default::default()
        };
        Self {
            parser: DesignParser::new(),
            generator: MarkupGenerator::new(options),
            processor: PostProcessor::new(post),
        }
    }

    /// The intermediate representation only.
    pub fn analyze(&self, export: &DesignExport) -> ParsedDesign {
        self.parser.parse_design(export)
    }

    /// Parse and render. An empty `title` falls back to the design's own
    /// title, then to the generator default.
    pub fn import(&self, export: &DesignExport, title: Option<&str>) -> GeneratedDocument {
        let design = self.analyze(export);
        self.render(&design, title)
    }

    /// Render an already parsed design.
    pub fn render(&self, design: &ParsedDesign, title: Option<&str>) -> GeneratedDocument {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(design.metadata.design_title.trim());

        let markup = self.generator.generate(&design.sections, &design.design_tokens, title);
        self.processor.process(markup.as_str(), &AssetMap::new(), &[])
    }
}

/// Path A with default options.
pub fn import_design(export: &DesignExport, title: Option<&str>) -> GeneratedDocument {
    DesignImporter::default().import(export, title)
}

/// Path A from JSON text.
pub fn import_design_json(json: &str, title: Option<&str>) -> Result<GeneratedDocument, DesignError> {
    let export = DesignExport::from_json(json)?;
    Ok(import_design(&export, title))
}
