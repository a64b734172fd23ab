//! Markup tree helpers.
//!
//! Every markup transform in pagesmith runs on a parsed node tree rather than
//! on text patterns. This crate wraps html5ever's spec-compliant parser and
//! the reference-counted DOM from `markup5ever_rcdom` with the small set of
//! query, build and mutation helpers the transforms need.
//!
//! Parsing never fails: html5ever recovers from any input the way a browser
//! would, including inserting missing `html`/`head`/`body` elements.

mod build;
mod query;

pub use build::*;
pub use query::*;

pub use markup5ever_rcdom::{Handle, NodeData, RcDom};

use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::ParseOpts;
use markup5ever_rcdom::SerializableHandle;

/// Parse a complete document.
pub fn parse_document(html: &str) -> RcDom {
    html5ever::parse_document(RcDom::default(), ParseOpts::default()).one(html)
}

/// Serialize a whole document, doctype included.
pub fn serialize_document(dom: &RcDom) -> String {
    serialize(&dom.document, TraversalScope::ChildrenOnly(None))
}

/// Serialize a node including its own start and end tags.
pub fn outer_html(node: &Handle) -> String {
    serialize(node, TraversalScope::IncludeNode)
}

/// Serialize only the children of a node.
pub fn inner_html(node: &Handle) -> String {
    serialize(node, TraversalScope::ChildrenOnly(None))
}

fn serialize(node: &Handle, traversal_scope: TraversalScope) -> String {
    let mut bytes = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    // Writing into a Vec cannot fail.
    if html5ever::serialize::serialize(&mut bytes, &SerializableHandle::from(node.clone()), opts)
        .is_err()
    {
        return String::new();
    }
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_gets_shell() {
        let dom = parse_document("<h1>Hi</h1>");
        assert!(head(&dom).is_some());
        let body = body(&dom).unwrap();
        let h1 = find_first_element(&body, "h1").unwrap();
        assert_eq!(text_content(&h1), "Hi");
        assert!(!has_doctype(&dom));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let dom = parse_document("<!doctype html><html><head></head><body><p class=\"a\">x</p></body></html>");
        let html = serialize_document(&dom);
        assert_eq!(
            html,
            "<!DOCTYPE html><html><head></head><body><p class=\"a\">x</p></body></html>"
        );
    }

    #[test]
    fn test_outer_html() {
        let dom = parse_document("<body><section id=\"s\"><h2>T</h2></section></body>");
        let section = find_first(&dom.document, |n| attr(n, "id").as_deref() == Some("s")).unwrap();
        assert_eq!(outer_html(&section), "<section id=\"s\"><h2>T</h2></section>");
        assert_eq!(inner_html(&section), "<h2>T</h2>");
    }

    #[test]
    fn test_style_text_not_escaped() {
        let dom = parse_document("<head><style>a > b { color: red; }</style></head>");
        let html = serialize_document(&dom);
        assert!(html.contains("a > b { color: red; }"));
    }
}
