//! Responsive hardening.
//!
//! Injects one baseline stylesheet, identified by [`BASELINE_STYLE_ID`], and
//! tags image galleries so the stylesheet can lay them out.

use pagesmith_dom::{
    append_child, attr, create_text_element, descendants, detach, element_children, find_all,
    has_attr, head, is_element, set_attr, set_text_content, tag, Handle, RcDom,
};

pub const BASELINE_STYLE_ID: &str = "ps-baseline";

/// Set on containers holding two or more adjacent image-like children.
pub const GALLERY_ATTR: &str = "data-ps-gallery";

const GALLERY_CONTAINERS: [&str; 8] = ["div", "section", "article", "main", "aside", "header", "footer", "figure"];
const IMAGE_LIKE: [&str; 3] = ["img", "picture", "figure"];

pub const BASELINE_CSS: &str = r#"
*, *::before, *::after { box-sizing: border-box; }
html, body { margin: 0; }
html, body { overflow-x: hidden; }
body { -webkit-overflow-scrolling: touch; }

img, picture img, figure img, svg, video {
  display: block;
  max-width: 100%;
  height: auto;
  margin-left: auto;
  margin-right: auto;
  object-position: center;
}
picture, figure { display: block; }
[style*="background-image"] {
  background-position: center;
  background-size: cover;
  background-repeat: no-repeat;
}

.container, .wrap, main { width: 100%; max-width: 1200px; margin: 0 auto; }

@media (max-width: 480px) {
  [style*="grid-template-columns"] { grid-template-columns: 1fr !important; }
  [style*="display:flex"], [style*="display: flex"] { flex-wrap: wrap !important; flex-direction: column !important; }
  .grid, [class*="cols-"], [class*="columns"] { grid-template-columns: 1fr !important; }
  .row, .flex, [class*="row"] { flex-direction: column !important; }
  section, header, footer, main, .container, .wrap { padding-left: 14px; padding-right: 14px; }
}

[data-ps-gallery], .gallery, .image-grid, .images-grid,
section:has(> img + img), div:has(> img + img),
section:has(> picture + picture), div:has(> picture + picture),
section:has(> figure + figure), div:has(> figure + figure) {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
  gap: 16px;
  align-items: start;
}
[data-ps-gallery] > img, [data-ps-gallery] > picture img, [data-ps-gallery] > figure img,
.gallery img, .image-grid img, .images-grid img {
  width: 100%;
  height: auto;
  object-fit: contain;
  object-position: center;
}
"#;

/// Inject the baseline stylesheet, or refresh it if a previous pass left one.
///
/// Extra copies beyond the first are removed. Returns whether a new block was added.
pub fn ensure_baseline(dom: &RcDom) -> bool {
    let existing = find_all(&dom.document, |n| {
        is_element(n, "style") && attr(n, "id").as_deref() == Some(BASELINE_STYLE_ID)
    });

    if let Some((first, rest)) = existing.split_first() {
        set_text_content(first, BASELINE_CSS);
        for duplicate in rest {
            detach(duplicate);
        }
        tracing::debug!(duplicates = rest.len(), "baseline stylesheet already present; refreshed");
        return false;
    }

    let Some(head) = head(dom) else { return false };
    append_child(
        &head,
        create_text_element("style", &[("id", BASELINE_STYLE_ID)], BASELINE_CSS),
    );
    true
}

/// Tag every container with two or more adjacent image-like element children.
pub fn mark_galleries(dom: &RcDom) -> usize {
    let mut marked = 0;
    for node in descendants(&dom.document) {
        let is_container = tag(&node).is_some_and(|t| GALLERY_CONTAINERS.contains(&t));
        if !is_container || has_attr(&node, GALLERY_ATTR) {
            continue;
        }
        if has_adjacent_images(&node) {
            set_attr(&node, GALLERY_ATTR, "");
            marked += 1;
        }
    }
    marked
}

fn has_adjacent_images(node: &Handle) -> bool {
    let children = element_children(node);
    children
        .windows(2)
        .any(|pair| is_image_like(&pair[0]) && is_image_like(&pair[1]))
}

fn is_image_like(node: &Handle) -> bool {
    tag(node).is_some_and(|t| IMAGE_LIKE.contains(&t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_dom::{parse_document, serialize_document};

    #[test]
    fn test_baseline_injected_once() {
        let dom = parse_document("<html><head></head><body></body></html>");
        assert!(ensure_baseline(&dom));
        assert!(!ensure_baseline(&dom));
        let html = serialize_document(&dom);
        assert_eq!(html.matches("id=\"ps-baseline\"").count(), 1);
        assert!(html.contains("object-fit: contain"));
    }

    #[test]
    fn test_phone_breakpoint_stacks_inline_flex_rows() {
        let phone = BASELINE_CSS
            .split("@media (max-width: 480px) {")
            .nth(1)
            .and_then(|rest| rest.split("\n}\n").next())
            .unwrap();
        let flex_rule = phone
            .lines()
            .find(|line| line.contains("[style*=\"display:flex\"]"))
            .unwrap();
        assert!(flex_rule.contains("flex-direction: column !important"));
        assert!(flex_rule.contains("flex-wrap: wrap !important"));
    }

    #[test]
    fn test_stale_baseline_replaced_and_deduplicated() {
        let dom = parse_document(
            "<head><style id=\"ps-baseline\">old</style></head><body><style id=\"ps-baseline\">older</style></body>",
        );
        ensure_baseline(&dom);
        let html = serialize_document(&dom);
        assert_eq!(html.matches("id=\"ps-baseline\"").count(), 1);
        assert!(!html.contains(">old<"));
        assert!(html.contains(BASELINE_CSS));
    }

    #[test]
    fn test_adjacent_images_form_gallery() {
        let dom = parse_document("<body><div><img src=\"a.png\">\n<img src=\"b.png\"></div></body>");
        assert_eq!(mark_galleries(&dom), 1);
        let html = serialize_document(&dom);
        assert!(html.contains("<div data-ps-gallery=\"\"><img src=\"a.png\">"));
        assert_eq!(mark_galleries(&dom), 0);
    }

    #[test]
    fn test_separated_images_are_not_a_gallery() {
        let dom = parse_document("<body><div><img src=\"a.png\"><p>caption</p><img src=\"b.png\"></div><p><img><img></p></body>");
        assert_eq!(mark_galleries(&dom), 0);
    }
}
