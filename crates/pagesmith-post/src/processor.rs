//! The post-processing entry point.

use crate::assets::{inline_assets, AssetMap};
use crate::fence::strip_fences;
use crate::locks::{normalize_placeholders, resubstitute};
use crate::markers::add_edit_markers;
use crate::nav::ensure_mobile_nav;
use crate::responsive::{ensure_baseline, mark_galleries};
use crate::sanitize::sanitize;
use crate::shell::ensure_shell;
use pagesmith_core::{GeneratedDocument, LockedRegion};
use pagesmith_dom::{parse_document, serialize_document};
use serde::{Deserialize, Serialize};

/// Settings for [`PostProcessor`]. Script removal is not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcessOptions {
    /// `lang` given to fragments wrapped in a new shell.
    pub lang: String,
    /// Title given to fragments that have none.
    pub fallback_title: String,
    /// Whether to synthesize the mobile navigation layer.
    pub mobile_nav: bool,
}

impl Default for PostProcessOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            fallback_title: "Generated Site".to_string(),
            mobile_nav: true,
        }
    }
}

/// What one post-processing run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostProcessReport {
    pub shell_created: bool,
    pub scripts_removed: usize,
    pub handlers_removed: usize,
    pub urls_neutralized: usize,
    pub baseline_injected: bool,
    pub galleries_marked: usize,
    pub nav_synthesized: bool,
    pub assets_inlined: usize,
    pub markers_added: usize,
    pub locks_substituted: usize,
    pub locks_appended: usize,
}

/// Normalizes raw generative output into a safe, responsive, editable document.
///
/// Holds no state between calls; one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct PostProcessor {
    options: PostProcessOptions,
}

impl PostProcessor {
    pub fn new(options: PostProcessOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PostProcessOptions {
        &self.options
    }

    /// Run every step and return the document.
    pub fn process(&self, raw: &str, assets: &AssetMap, locks: &[LockedRegion]) -> GeneratedDocument {
        self.process_with_report(raw, assets, locks).0
    }

    /// Run every step, also reporting what changed.
    pub fn process_with_report(
        &self,
        raw: &str,
        assets: &AssetMap,
        locks: &[LockedRegion],
    ) -> (GeneratedDocument, PostProcessReport) {
        let mut report = PostProcessReport::default();

        let text = strip_fences(raw);
        let dom = parse_document(&text);

        let removed = sanitize(&dom);
        report.scripts_removed = removed.scripts;
        report.handlers_removed = removed.handlers;
        report.urls_neutralized = removed.urls;

        report.shell_created = ensure_shell(&dom, &self.options.lang, &self.options.fallback_title);

        report.baseline_injected = ensure_baseline(&dom);
        report.galleries_marked = mark_galleries(&dom);

        if self.options.mobile_nav {
            report.nav_synthesized = ensure_mobile_nav(&dom);
        }

        report.assets_inlined = inline_assets(&dom, assets);
        report.markers_added = add_edit_markers(&dom, locks);

        let missing = normalize_placeholders(&dom, locks);
        let html = serialize_document(&dom);
        let (html, outcome) = resubstitute(&html, locks);
        report.locks_substituted = outcome.substituted.saturating_sub(missing);
        report.locks_appended = outcome.appended + missing;

        tracing::info!(
            bytes = html.len(),
            scripts_removed = report.scripts_removed,
            markers_added = report.markers_added,
            locks_substituted = report.locks_substituted,
            locks_appended = report.locks_appended,
            "post-processed document"
        );

        (GeneratedDocument::new(html), report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn process(raw: &str) -> String {
        PostProcessor::default()
            .process(raw, &AssetMap::new(), &[])
            .into_string()
    }

    #[test]
    fn test_fenced_scenario() {
        let html = process("```html\n<html><head></head><body><h1>Hi</h1></body></html>\n```");
        assert!(!html.contains("```"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("name=\"viewport\""));
        assert_eq!(html.matches("id=\"ps-baseline\"").count(), 1);
        assert!(html.contains("<h1 data-edit=\"h1-1\">Hi</h1>"));
    }

    #[test]
    fn test_gallery_scenario() {
        let html = process("<!DOCTYPE html><html><head></head><body><div><img src=\"a.png\"><img src=\"b.png\"></div></body></html>");
        assert!(html.contains("<div data-ps-gallery=\"\"><img src=\"a.png\" data-edit=\"img-1\">"));
        assert!(html.contains("repeat(auto-fit, minmax(150px, 1fr))"));
        assert!(html.contains("object-fit: contain"));
    }

    #[test]
    fn test_scripts_never_survive() {
        let html = process("<body><script>alert(1)</script><button onclick=\"go()\">Go</button></body>");
        assert!(!html.contains("<script"));
        assert!(!html.contains("onclick"));
        assert!(html.contains("<button data-edit=\"button-1\">Go</button>"));
    }

    #[test]
    fn test_mobile_nav_optional() {
        let processor = PostProcessor::new(PostProcessOptions {
            mobile_nav: false,
            ..Default::default()
        });
        let (doc, report) = processor.process_with_report("<p>x</p>", &AssetMap::new(), &[]);
        assert!(!report.nav_synthesized);
        assert!(!doc.as_str().contains("ps-mobile-layer"));
    }

    #[test]
    fn test_report_counts() {
        let mut assets = AssetMap::new();
        assets.insert("logo.png".to_string(), "data:image/png;base64,AA==".to_string());
        let locks = vec![LockedRegion::new("L1", "Footer", "<footer>kept</footer>")];

        let (doc, report) = PostProcessor::default().process_with_report(
            "<body><img src=\"logo.png\"><script></script><!--LOCK:L1--></body>",
            &assets,
            &locks,
        );

        assert!(report.shell_created);
        assert!(report.baseline_injected);
        assert!(report.nav_synthesized);
        assert_eq!(report.scripts_removed, 1);
        assert_eq!(report.assets_inlined, 1);
        assert_eq!(report.locks_substituted, 1);
        assert_eq!(report.locks_appended, 0);
        assert_eq!(doc.as_str().matches("<footer>kept</footer>").count(), 1);
    }

    #[test]
    fn test_missing_lock_lands_inside_body() {
        let locks = vec![LockedRegion::new("L1", "Notes", "<section><style>p::after{content:\"</body>\"}</style></section>")];
        let (doc, report) = PostProcessor::default().process_with_report(
            "<html><body><p>new</p></body></html><!-- </body> -->",
            &AssetMap::new(),
            &locks,
        );
        assert_eq!(report.locks_appended, 1);
        assert_eq!(report.locks_substituted, 0);
        let html = doc.as_str();
        let region = html.find("<section><style>").unwrap();
        let body_close = html.rfind("</body></html>").unwrap();
        assert!(region < body_close);
        assert!(html.ends_with("<!-- </body> -->"));
    }

    #[test]
    fn test_second_pass_is_stable() {
        let raw = "Here it is:\n```html\n<!doctype html><html><head><title>Cafe</title><style>:root{--brand:#7C3AED}</style></head>\
                   <body><nav><a href=\"#menu\">Menu</a></nav><h1>Cafe</h1><section><p>One</p><p>Two</p>\
                   <div><img src=\"a.png\"><img src=\"b.png\"></div></section></body></html>\n```";
        let once = process(raw);
        let twice = process(&once);
        assert_eq!(once, twice);
        assert_eq!(twice.matches("id=\"ps-baseline\"").count(), 1);
        assert_eq!(twice.matches("id=\"ps-mobile-layer\"").count(), 1);
    }

    proptest! {
        #[test]
        fn test_idempotent_on_generated_fragments(
            headings in proptest::collection::vec("[A-Za-z ]{1,12}", 0..4),
            paragraphs in proptest::collection::vec("[A-Za-z ,.]{0,24}", 0..4),
            images in 0usize..4,
        ) {
            let mut raw = String::from("<main>");
            for h in &headings {
                raw.push_str(&format!("<h2>{}</h2>", h));
            }
            for p in &paragraphs {
                raw.push_str(&format!("<p>{}</p>", p));
            }
            raw.push_str("<div>");
            for i in 0..images {
                raw.push_str(&format!("<img src=\"{}.png\">", i));
            }
            raw.push_str("</div></main>");

            let once = process(&raw);
            let twice = process(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
