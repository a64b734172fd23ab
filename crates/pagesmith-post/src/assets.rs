//! Asset inlining.

use indexmap::IndexMap;
use pagesmith_dom::{attr, descendants, set_attr, RcDom};

/// Asset filename to inlineable payload (usually a `data:` URL), in upload order.
pub type AssetMap = IndexMap<String, String>;

const REFERENCE_ATTRS: [&str; 2] = ["src", "href"];

/// Replace `src`/`href` values that name an uploaded asset with its payload.
///
/// A value matches when it equals the filename exactly, or is a relative path
/// whose last segment is the filename (`./logo.png`, `/img/logo.png`).
/// Matching is case-sensitive. Absolute URLs and existing `data:` URLs are
/// never touched. Returns how many attributes were rewritten.
pub fn inline_assets(dom: &RcDom, assets: &AssetMap) -> usize {
    if assets.is_empty() {
        return 0;
    }

    let mut inlined = 0;
    for node in descendants(&dom.document) {
        for name in REFERENCE_ATTRS {
            let Some(value) = attr(&node, name) else { continue };
            if let Some(payload) = lookup(assets, value.trim()) {
                set_attr(&node, name, payload);
                inlined += 1;
            }
        }
    }

    if inlined > 0 {
        tracing::debug!(inlined, "inlined asset references");
    }
    inlined
}

fn lookup<'a>(assets: &'a AssetMap, value: &str) -> Option<&'a str> {
    if value.is_empty() || value.contains("://") || value.starts_with("data:") {
        return None;
    }
    if let Some(payload) = assets.get(value) {
        return Some(payload.as_str());
    }
    let (_, last) = value.rsplit_once('/')?;
    assets.get(last).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_dom::{parse_document, serialize_document};

    fn assets() -> AssetMap {
        let mut map = AssetMap::new();
        map.insert("logo.png".to_string(), "data:image/png;base64,AAA".to_string());
        map.insert("hero.jpg".to_string(), "data:image/jpeg;base64,BBB".to_string());
        map
    }

    #[test]
    fn test_exact_and_relative_matches() {
        let dom = parse_document(
            "<body><img src=\"logo.png\"><img src=\"./hero.jpg\"><a href=\"/assets/logo.png\">l</a></body>",
        );
        assert_eq!(inline_assets(&dom, &assets()), 3);
        let html = serialize_document(&dom);
        assert!(html.contains("<img src=\"data:image/png;base64,AAA\">"));
        assert!(html.contains("<img src=\"data:image/jpeg;base64,BBB\">"));
        assert!(html.contains("<a href=\"data:image/png;base64,AAA\">"));
    }

    #[test]
    fn test_non_matches_untouched() {
        let dom = parse_document(
            "<body><img src=\"Logo.png\"><img src=\"https://cdn.example.com/logo.png\"><img src=\"mylogo.png\"></body>",
        );
        assert_eq!(inline_assets(&dom, &assets()), 0);
    }

    #[test]
    fn test_unreferenced_assets_ignored() {
        let dom = parse_document("<body><p>No images</p></body>");
        assert_eq!(inline_assets(&dom, &assets()), 0);
        assert_eq!(inline_assets(&dom, &AssetMap::new()), 0);
    }
}
