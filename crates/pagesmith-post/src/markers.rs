//! Editable-marker injection.
//!
//! Every element of an allow-listed tag gets a `data-edit="<tag>-<n>"`
//! attribute the editor uses to address it. Numbering is per tag, starts at
//! one, and is local to a single call: numbers already used by existing
//! markers (including those inside locked regions that will be put back
//! later) are skipped, and existing markers are never rewritten.

use crate::nav::LAYER_ID;
use pagesmith_core::{LockedRegion, EDIT_MARKER_ATTR};
use pagesmith_dom::{attr, descendants, has_attr, is_within, set_attr, tag, RcDom};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

pub const MARKER_TAGS: [&str; 7] = ["h1", "h2", "h3", "p", "img", "button", "a"];

/// Per-tag marker numbering for one invocation.
#[derive(Debug, Default)]
pub struct MarkerCounter {
    taken: HashMap<String, HashSet<u32>>,
    next: HashMap<String, u32>,
}

impl MarkerCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an existing marker value such as `h2-3`.
    pub fn reserve(&mut self, marker: &str) {
        if let Some((tag, n)) = parse_marker(marker) {
            self.taken.entry(tag.to_string()).or_default().insert(n);
        }
    }

    /// The next free marker for `tag`.
    pub fn next_marker(&mut self, tag: &str) -> String {
        let taken = self.taken.entry(tag.to_string()).or_default();
        let next = self.next.entry(tag.to_string()).or_insert(1);
        while taken.contains(next) {
            *next += 1;
        }
        let n = *next;
        taken.insert(n);
        *next += 1;
        format!("{}-{}", tag, n)
    }
}

/// Add markers to every unmarked allow-listed element outside the
/// synthesized navigation layer. Returns how many were added.
pub fn add_edit_markers(dom: &RcDom, locks: &[LockedRegion]) -> usize {
    let mut counter = MarkerCounter::new();
    let nodes = descendants(&dom.document);

    for node in &nodes {
        if let Some(marker) = attr(node, EDIT_MARKER_ATTR) {
            counter.reserve(&marker);
        }
    }
    if let Some(re) = locked_marker_regex() {
        for region in locks {
            for caps in re.captures_iter(&region.html) {
                if let Some(m) = caps.get(1) {
                    counter.reserve(m.as_str());
                }
            }
        }
    }

    let mut added = 0;
    for node in &nodes {
        let Some(tag_name) = tag(node).filter(|t| MARKER_TAGS.contains(t)) else {
            continue;
        };
        if has_attr(node, EDIT_MARKER_ATTR) {
            continue;
        }
        if is_within(node, |n| attr(n, "id").as_deref() == Some(LAYER_ID)) {
            continue;
        }
        let marker = counter.next_marker(tag_name);
        set_attr(node, EDIT_MARKER_ATTR, &marker);
        added += 1;
    }

    if added > 0 {
        tracing::debug!(added, "attached editable markers");
    }
    added
}

/// Split `h2-3` into its tag and number, for allow-listed tags only.
pub fn parse_marker(marker: &str) -> Option<(&str, u32)> {
    let (tag, n) = marker.trim().rsplit_once('-')?;
    if !MARKER_TAGS.contains(&tag) {
        return None;
    }
    Some((tag, n.parse().ok()?))
}

fn locked_marker_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"data-edit\s*=\s*["']?((?:h1|h2|h3|p|img|button|a)-\d+)"#).ok()
    })
    .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_dom::{parse_document, serialize_document};

    #[test]
    fn test_markers_per_tag() {
        let dom = parse_document("<body><h1>T</h1><p>a</p><p>b</p><a href=\"#\"><img src=\"x\"></a><span>s</span></body>");
        assert_eq!(add_edit_markers(&dom, &[]), 5);
        let html = serialize_document(&dom);
        assert!(html.contains("<h1 data-edit=\"h1-1\">T</h1>"));
        assert!(html.contains("<p data-edit=\"p-1\">a</p><p data-edit=\"p-2\">b</p>"));
        assert!(html.contains("<a href=\"#\" data-edit=\"a-1\"><img src=\"x\" data-edit=\"img-1\"></a>"));
        assert!(html.contains("<span>s</span>"));
    }

    #[test]
    fn test_existing_markers_kept_and_skipped() {
        let dom = parse_document("<body><p>a</p><p data-edit=\"p-1\">b</p><p data-edit=\"custom\">c</p></body>");
        assert_eq!(add_edit_markers(&dom, &[]), 1);
        let html = serialize_document(&dom);
        assert!(html.contains("<p data-edit=\"p-2\">a</p><p data-edit=\"p-1\">b</p><p data-edit=\"custom\">c</p>"));
    }

    #[test]
    fn test_locked_markers_reserved() {
        let dom = parse_document("<body><h2>New</h2></body>");
        let locks = vec![LockedRegion::new("L1", "Old", "<section><h2 data-edit=\"h2-1\">Old</h2></section>")];
        add_edit_markers(&dom, &locks);
        assert!(serialize_document(&dom).contains("<h2 data-edit=\"h2-2\">New</h2>"));
    }

    #[test]
    fn test_second_pass_is_noop() {
        let dom = parse_document("<body><h1>T</h1><p>a</p></body>");
        add_edit_markers(&dom, &[]);
        let first = serialize_document(&dom);
        assert_eq!(add_edit_markers(&dom, &[]), 0);
        assert_eq!(serialize_document(&dom), first);
    }

    #[test]
    fn test_nav_layer_skipped() {
        let dom = parse_document("<body><div id=\"ps-mobile-layer\"><a href=\"#\">x</a></div><a href=\"#y\">y</a></body>");
        assert_eq!(add_edit_markers(&dom, &[]), 1);
        assert!(serialize_document(&dom).contains("<a href=\"#y\" data-edit=\"a-1\">y</a>"));
    }

    #[test]
    fn test_locked_marker_pattern_compiles() {
        assert!(locked_marker_regex().is_some());
    }

    #[test]
    fn test_parse_marker() {
        assert_eq!(parse_marker("h2-12"), Some(("h2", 12)));
        assert_eq!(parse_marker("section-1"), None);
        assert_eq!(parse_marker("p-x"), None);
    }
}
