//! Script removal.
//!
//! Previews are rendered sandboxed and must never execute code. This step
//! has no switch.

use pagesmith_dom::{attr, descendants, detach, find_all, is_element, remove_attrs_where, set_attr, Handle, RcDom};

/// Attributes whose value is a navigable URL.
const URL_ATTRS: [&str; 4] = ["href", "src", "action", "formaction"];

/// What [`sanitize`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeCounts {
    pub scripts: usize,
    pub handlers: usize,
    pub urls: usize,
}

/// Remove every `<script>`, every `on*` attribute and every `javascript:` URL.
pub fn sanitize(dom: &RcDom) -> SanitizeCounts {
    let mut counts = SanitizeCounts::default();

    for script in find_all(&dom.document, |n| is_element(n, "script")) {
        detach(&script);
        counts.scripts += 1;
    }

    for node in descendants(&dom.document) {
        counts.handlers += remove_attrs_where(&node, |name, _| is_event_handler(name));
        counts.urls += neutralize_urls(&node);
    }

    if counts != SanitizeCounts::default() {
        tracing::debug!(
            scripts = counts.scripts,
            handlers = counts.handlers,
            urls = counts.urls,
            "removed executable content"
        );
    }
    counts
}

fn is_event_handler(name: &str) -> bool {
    name.len() > 2 && name.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}

fn neutralize_urls(node: &Handle) -> usize {
    let mut neutralized = 0;
    for name in URL_ATTRS {
        let Some(value) = attr(node, name) else { continue };
        if !is_script_url(&value) {
            continue;
        }
        if name == "href" {
            set_attr(node, name, "#");
        } else {
            remove_attrs_where(node, |attr_name, _| attr_name == name);
        }
        neutralized += 1;
    }
    neutralized
}

/// `javascript:` after stripping whitespace and control characters, as browsers do.
fn is_script_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take("javascript:".len())
        .collect();
    compact.eq_ignore_ascii_case("javascript:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_dom::{parse_document, serialize_document};

    #[test]
    fn test_scripts_removed_everywhere() {
        let dom = parse_document(
            "<html><head><script src=\"x.js\"></script></head><body><p>a</p><script>alert(1)</script><div><script>b()</script></div></body></html>",
        );
        let counts = sanitize(&dom);
        assert_eq!(counts.scripts, 3);
        let html = serialize_document(&dom);
        assert!(!html.contains("<script"));
        assert!(html.contains("<p>a</p>"));
    }

    #[test]
    fn test_handlers_and_urls() {
        let dom = parse_document(
            "<body><a href=\" JavaScript:evil()\" onclick=\"x()\">a</a><img src=\"javascript:x\" onerror=\"y()\"><form action=\"/ok\"></form></body>",
        );
        let counts = sanitize(&dom);
        assert_eq!(counts.handlers, 2);
        assert_eq!(counts.urls, 2);
        let html = serialize_document(&dom);
        assert!(html.contains("<a href=\"#\">a</a>"));
        assert!(html.contains("<img>"));
        assert!(html.contains("action=\"/ok\""));
    }

    #[test]
    fn test_clean_document_untouched() {
        let dom = parse_document("<body><p class=\"online\">x</p></body>");
        assert_eq!(sanitize(&dom), SanitizeCounts::default());
    }
}
