//! Read-only tree queries.

use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::rc::{Rc, Weak};

/// Local tag name of an element node.
pub fn tag(node: &Handle) -> Option<&str> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn is_element(node: &Handle, tag_name: &str) -> bool {
    tag(node) == Some(tag_name)
}

pub fn is_any_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

/// Value of an attribute, if present.
pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub fn has_attr(node: &Handle, name: &str) -> bool {
    match node.data {
        NodeData::Element { ref attrs, .. } => {
            attrs.borrow().iter().any(|a| &*a.name.local == name)
        }
        _ => false,
    }
}

/// Whitespace-separated class tokens.
pub fn classes(node: &Handle) -> Vec<String> {
    attr(node, "class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(Weak::upgrade);
    node.parent.set(weak);
    parent
}

pub fn children(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

/// Element children, skipping text and comments.
pub fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|c| is_any_element(c))
        .cloned()
        .collect()
}

/// Position of `node` within its parent's child list.
pub fn index_in_parent(node: &Handle) -> Option<usize> {
    let parent = parent(node)?;
    let index = parent
        .children
        .borrow()
        .iter()
        .position(|c| Rc::ptr_eq(c, node));
    index
}

/// All descendants in document order, excluding `root` itself.
pub fn descendants(root: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        stack.extend(node.children.borrow().iter().rev().cloned());
        out.push(node);
    }
    out
}

pub fn find_first<F>(root: &Handle, predicate: F) -> Option<Handle>
where
    F: Fn(&Handle) -> bool,
{
    descendants(root).into_iter().find(|n| predicate(n))
}

pub fn find_all<F>(root: &Handle, predicate: F) -> Vec<Handle>
where
    F: Fn(&Handle) -> bool,
{
    descendants(root).into_iter().filter(|n| predicate(n)).collect()
}

pub fn find_first_element(root: &Handle, tag_name: &str) -> Option<Handle> {
    find_first(root, |n| is_element(n, tag_name))
}

/// First element with the given `id` attribute.
pub fn find_by_id(root: &Handle, id: &str) -> Option<Handle> {
    find_first(root, |n| attr(n, "id").as_deref() == Some(id))
}

/// Nearest inclusive ancestor matching `predicate`.
pub fn closest<F>(node: &Handle, predicate: F) -> Option<Handle>
where
    F: Fn(&Handle) -> bool,
{
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if predicate(&n) {
            return Some(n);
        }
        current = parent(&n);
    }
    None
}

/// Whether `node` sits inside (or is) an element matching `predicate`.
pub fn is_within<F>(node: &Handle, predicate: F) -> bool
where
    F: Fn(&Handle) -> bool,
{
    closest(node, predicate).is_some()
}

/// Concatenated text of all descendant text nodes.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    if let NodeData::Text { ref contents } = node.data {
        text.push_str(&contents.borrow());
    }
    for n in descendants(node) {
        if let NodeData::Text { ref contents } = n.data {
            text.push_str(&contents.borrow());
        }
    }
    text
}

/// Text content with runs of whitespace collapsed to single spaces.
pub fn collapsed_text(node: &Handle) -> String {
    text_content(node).split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn comment_text(node: &Handle) -> Option<&str> {
    match node.data {
        NodeData::Comment { ref contents } => Some(&**contents),
        _ => None,
    }
}

pub fn has_doctype(dom: &RcDom) -> bool {
    dom.document
        .children
        .borrow()
        .iter()
        .any(|c| matches!(c.data, NodeData::Doctype { .. }))
}

pub fn html_element(dom: &RcDom) -> Option<Handle> {
    element_children(&dom.document)
        .into_iter()
        .find(|n| is_element(n, "html"))
}

pub fn head(dom: &RcDom) -> Option<Handle> {
    element_children(&html_element(dom)?)
        .into_iter()
        .find(|n| is_element(n, "head"))
}

pub fn body(dom: &RcDom) -> Option<Handle> {
    element_children(&html_element(dom)?)
        .into_iter()
        .find(|n| is_element(n, "body"))
}
