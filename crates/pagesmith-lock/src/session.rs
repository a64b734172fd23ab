//! Lock toggling over a rendered document.

use crate::label::region_label;
use pagesmith_core::{LockError, LockedRegion, EDIT_MARKER_ATTR, LOCK_ATTR};
use pagesmith_dom::{
    attr, closest, descendants, find_all, find_first, has_attr, is_element, outer_html, parse_document,
    remove_attr, serialize_document, set_attr, tag, Handle, RcDom,
};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Structural tags a block lock climbs to.
pub const BLOCK_TAGS: [&str; 8] = ["section", "article", "header", "footer", "main", "aside", "nav", "div"];

/// Which node a toggle locks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockGranularity {
    /// The nearest enclosing structural block (falls back to the node itself).
    #[default]
    Block,
    /// Exactly the toggled element.
    Exact,
}

/// State of a region after a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LockState {
    Locked { id: String },
    Unlocked { id: String },
}

/// An editable document with lock annotations.
///
/// Locks live on the tree as `data-lock="L<n>"` attributes on region roots,
/// so they survive serialization and come back locked after regeneration.
pub struct LockSession {
    dom: RcDom,
    granularity: LockGranularity,
}

impl LockSession {
    pub fn new(html: &str) -> Self {
        Self {
            dom: parse_document(html),
            granularity: LockGranularity::default(),
        }
    }

    pub fn with_granularity(mut self, granularity: LockGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn granularity(&self) -> LockGranularity {
        self.granularity
    }

    pub fn set_granularity(&mut self, granularity: LockGranularity) {
        self.granularity = granularity;
    }

    /// Toggle the lock on the region holding the element addressed by an
    /// editable marker (`h2-1`) or an element id.
    pub fn toggle(&mut self, marker: &str) -> Result<LockState, LockError> {
        let target = self.find_target(marker).ok_or_else(|| LockError::UnknownTarget {
            marker: marker.to_string(),
        })?;
        Ok(self.toggle_node(&target))
    }

    /// Toggle the lock on the region holding `node`.
    ///
    /// A node already inside a locked region unlocks that region. Otherwise
    /// the region root is picked by the session's granularity and any locks
    /// nested under it are folded into the new one.
    pub fn toggle_node(&mut self, node: &Handle) -> LockState {
        if let Some(locked) = closest(node, |n| has_attr(n, LOCK_ATTR)) {
            let id = attr(&locked, LOCK_ATTR).unwrap_or_default();
            remove_attr(&locked, LOCK_ATTR);
            tracing::debug!(id = %id, "unlocked region");
            return LockState::Unlocked { id };
        }

        let root = self.region_root(node);
        for nested in find_all(&root, |n| has_attr(n, LOCK_ATTR)) {
            remove_attr(&nested, LOCK_ATTR);
        }

        let id = format!("L{}", self.next_lock_number());
        set_attr(&root, LOCK_ATTR, &id);
        tracing::debug!(id = %id, tag = tag(&root).unwrap_or_default(), "locked region");
        LockState::Locked { id }
    }

    /// Whether the element addressed by `marker` sits in a locked region.
    pub fn is_locked(&self, marker: &str) -> bool {
        self.find_target(marker)
            .is_some_and(|n| closest(&n, |a| has_attr(a, LOCK_ATTR)).is_some())
    }

    /// Remove every lock. Returns how many were removed.
    pub fn unlock_all(&mut self) -> usize {
        let locked = find_all(&self.dom.document, |n| has_attr(n, LOCK_ATTR));
        for node in &locked {
            remove_attr(node, LOCK_ATTR);
        }
        locked.len()
    }

    /// Locked regions in document order, ready to send with a regeneration.
    ///
    /// A locked root nested inside another locked root is already part of the
    /// outer region's markup and is not listed separately.
    pub fn locked_regions(&self) -> Vec<LockedRegion> {
        let roots: Vec<Handle> = descendants(&self.dom.document)
            .into_iter()
            .filter(|n| has_attr(n, LOCK_ATTR))
            .collect();

        let outermost = roots.iter().filter(|&node| {
            !roots
                .iter()
                .any(|other| !Rc::ptr_eq(other, node) && closest(node, |a| Rc::ptr_eq(a, other)).is_some())
        });

        outermost
            .enumerate()
            .map(|(i, node)| {
                let id = attr(node, LOCK_ATTR)
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| format!("L{}", i + 1));
                LockedRegion::new(id, region_label(node, i + 1), outer_html(node))
            })
            .collect()
    }

    /// The current document, lock annotations included.
    pub fn html(&self) -> String {
        serialize_document(&self.dom)
    }

    fn find_target(&self, marker: &str) -> Option<Handle> {
        let marker = marker.trim();
        if marker.is_empty() {
            return None;
        }
        find_first(&self.dom.document, |n| attr(n, EDIT_MARKER_ATTR).as_deref() == Some(marker))
            .or_else(|| find_first(&self.dom.document, |n| attr(n, "id").as_deref() == Some(marker)))
    }

    fn region_root(&self, node: &Handle) -> Handle {
        match self.granularity {
            LockGranularity::Exact => node.clone(),
            LockGranularity::Block => closest(node, |n| BLOCK_TAGS.iter().any(|t| is_element(n, t)))
                .unwrap_or_else(|| node.clone()),
        }
    }

    fn next_lock_number(&self) -> u32 {
        find_all(&self.dom.document, |n| has_attr(n, LOCK_ATTR))
            .iter()
            .filter_map(|n| attr(n, LOCK_ATTR))
            .filter_map(|id| id.strip_prefix('L').and_then(|n| n.parse::<u32>().ok()))
            .max()
            .unwrap_or(0)
            + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<!DOCTYPE html><html><head></head><body>\
        <header id=\"top\"><h1 data-edit=\"h1-1\">Cafe</h1></header>\
        <section id=\"menu\"><h2 data-edit=\"h2-1\">Menu</h2><p data-edit=\"p-1\">Coffee</p></section>\
        <section id=\"hours\"><h2 data-edit=\"h2-2\">Hours</h2><p data-edit=\"p-2\">9-5</p></section>\
        </body></html>";

    #[test]
    fn test_block_lock_climbs_to_section() {
        let mut session = LockSession::new(PAGE);
        let state = session.toggle("p-1").unwrap();
        assert_eq!(state, LockState::Locked { id: "L1".into() });

        let regions = session.locked_regions();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].label, "Menu");
        assert!(regions[0].html.starts_with("<section id=\"menu\" data-lock=\"L1\">"));
    }

    #[test]
    fn test_exact_lock() {
        let mut session = LockSession::new(PAGE).with_granularity(LockGranularity::Exact);
        session.toggle("p-1").unwrap();
        let regions = session.locked_regions();
        assert_eq!(regions[0].html, "<p data-edit=\"p-1\" data-lock=\"L1\">Coffee</p>");
        assert_eq!(regions[0].label, "Coffee");
    }

    #[test]
    fn test_toggle_twice_unlocks() {
        let mut session = LockSession::new(PAGE);
        session.toggle("h2-2").unwrap();
        let state = session.toggle("p-2").unwrap();
        assert_eq!(state, LockState::Unlocked { id: "L1".into() });
        assert!(session.locked_regions().is_empty());
        assert!(!session.html().contains("data-lock"));
    }

    #[test]
    fn test_regions_in_document_order() {
        let mut session = LockSession::new(PAGE);
        session.toggle("hours").unwrap();
        session.toggle("h1-1").unwrap();
        let regions = session.locked_regions();
        let ids: Vec<_> = regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["L2", "L1"]);
        assert_eq!(regions[0].label, "Cafe");
        assert_eq!(regions[1].label, "Hours");
    }

    #[test]
    fn test_ids_continue_from_existing_locks() {
        let html = "<body><section data-lock=\"L4\"><p>a</p></section><section id=\"b\"><p>b</p></section></body>";
        let mut session = LockSession::new(html);
        assert_eq!(session.toggle("b").unwrap(), LockState::Locked { id: "L5".into() });
    }

    #[test]
    fn test_outer_lock_folds_nested() {
        let html = "<body><main id=\"m\"><p id=\"x\">x</p></main></body>";
        let mut session = LockSession::new(html).with_granularity(LockGranularity::Exact);
        session.toggle("x").unwrap();
        let body = find_first(&session.dom.document, |n| is_element(n, "body")).unwrap();
        session.toggle_node(&body);
        let regions = session.locked_regions();
        assert_eq!(regions.len(), 1);
        assert!(regions[0].html.starts_with("<body data-lock=\"L1\">"));
        assert!(!regions[0].html.contains("data-lock=\"L1\"><p"));
    }

    #[test]
    fn test_nested_roots_listed_once() {
        let html = "<body><section data-lock=\"L1\"><div data-lock=\"L2\"><p>x</p></div></section></body>";
        let session = LockSession::new(html);
        let regions = session.locked_regions();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].id, "L1");
    }

    #[test]
    fn test_unknown_target() {
        let mut session = LockSession::new(PAGE);
        let err = session.toggle("h3-9").unwrap_err();
        assert!(matches!(err, LockError::UnknownTarget { marker } if marker == "h3-9"));
    }

    #[test]
    fn test_unlock_all() {
        let mut session = LockSession::new(PAGE);
        session.toggle("menu").unwrap();
        session.toggle("top").unwrap();
        assert!(session.is_locked("h2-1"));
        assert_eq!(session.unlock_all(), 2);
        assert!(!session.is_locked("h2-1"));
    }
}
