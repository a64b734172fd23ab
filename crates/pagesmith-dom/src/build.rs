//! Node construction and tree mutation.

use crate::query::{index_in_parent, parent};
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};
use std::cell::RefCell;
use std::rc::Rc;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

fn element_name(tag_name: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag_name))
}

fn attribute_name(name: &str) -> QualName {
    QualName::new(None, Namespace::from(""), LocalName::from(name))
}

/// Create a detached HTML element.
pub fn create_element(tag_name: &str, attrs: &[(&str, &str)]) -> Handle {
    let attrs = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: attribute_name(name),
            value: StrTendril::from(*value),
        })
        .collect();

    Node::new(NodeData::Element {
        name: element_name(tag_name),
        attrs: RefCell::new(attrs),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

pub fn create_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(text)),
    })
}

pub fn create_comment(text: &str) -> Handle {
    Node::new(NodeData::Comment {
        contents: StrTendril::from(text),
    })
}

/// Element with a single text child.
pub fn create_text_element(tag_name: &str, attrs: &[(&str, &str)], text: &str) -> Handle {
    let element = create_element(tag_name, attrs);
    append_child(&element, create_text(text));
    element
}

/// Detach `node` from its parent, if any.
pub fn detach(node: &Handle) {
    if let Some(parent) = parent(node) {
        parent.children.borrow_mut().retain(|c| !Rc::ptr_eq(c, node));
    }
    node.parent.set(None);
}

/// Insert `child` at `index` in `parent`'s children (clamped to the end).
pub fn insert_child(parent: &Handle, index: usize, child: Handle) {
    detach(&child);
    child.parent.set(Some(Rc::downgrade(parent)));
    let mut children = parent.children.borrow_mut();
    let index = index.min(children.len());
    children.insert(index, child);
}

pub fn append_child(parent: &Handle, child: Handle) {
    let len = parent.children.borrow().len();
    insert_child(parent, len, child);
}

pub fn prepend_child(parent: &Handle, child: Handle) {
    insert_child(parent, 0, child);
}

/// Put `replacement` where `node` is and detach `node`.
pub fn replace_node(node: &Handle, replacement: Handle) {
    let (Some(parent), Some(index)) = (parent(node), index_in_parent(node)) else {
        return;
    };
    detach(node);
    insert_child(&parent, index, replacement);
}

/// Replace all children with a single text node.
pub fn set_text_content(node: &Handle, text: &str) {
    for child in node.children.borrow_mut().drain(..) {
        child.parent.set(None);
    }
    append_child(node, create_text(text));
}

/// Set an attribute, replacing an existing value.
pub fn set_attr(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { ref attrs, .. } = node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|a| &*a.name.local == name) {
            Some(existing) => existing.value = StrTendril::from(value),
            None => attrs.push(Attribute {
                name: attribute_name(name),
                value: StrTendril::from(value),
            }),
        }
    }
}

/// Remove an attribute; returns whether it was present.
pub fn remove_attr(node: &Handle, name: &str) -> bool {
    remove_attrs_where(node, |attr_name, _| attr_name == name) > 0
}

/// Remove every attribute for which `predicate(name, value)` holds.
pub fn remove_attrs_where<F>(node: &Handle, predicate: F) -> usize
where
    F: Fn(&str, &str) -> bool,
{
    match node.data {
        NodeData::Element { ref attrs, .. } => {
            let mut attrs = attrs.borrow_mut();
            let before = attrs.len();
            attrs.retain(|a| !predicate(&a.name.local, &a.value));
            before - attrs.len()
        }
        _ => 0,
    }
}

/// Add a `<!DOCTYPE html>` node at the top of the document if there is none.
pub fn ensure_doctype(dom: &RcDom) {
    if crate::query::has_doctype(dom) {
        return;
    }
    let doctype = Node::new(NodeData::Doctype {
        name: StrTendril::from("html"),
        public_id: StrTendril::new(),
        system_id: StrTendril::new(),
    });
    prepend_child(&dom.document, doctype);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::*;
    use crate::{outer_html, parse_document, serialize_document};

    #[test]
    fn test_build_and_serialize() {
        let nav = create_element("nav", &[("id", "menu"), ("aria-label", "Mobile")]);
        append_child(&nav, create_text_element("a", &[("href", "#about")], "About & more"));
        assert_eq!(
            outer_html(&nav),
            "<nav id=\"menu\" aria-label=\"Mobile\"><a href=\"#about\">About &amp; more</a></nav>"
        );
    }

    #[test]
    fn test_attr_mutation() {
        let img = create_element("img", &[("src", "a.png")]);
        set_attr(&img, "src", "b.png");
        set_attr(&img, "alt", "B");
        assert_eq!(attr(&img, "src").as_deref(), Some("b.png"));
        assert!(remove_attr(&img, "alt"));
        assert!(!remove_attr(&img, "alt"));
        assert_eq!(outer_html(&img), "<img src=\"b.png\">");
    }

    #[test]
    fn test_detach_and_replace() {
        let dom = parse_document("<body><p>a</p><!--x--><p>b</p></body>");
        let body = body(&dom).unwrap();
        let comment = find_first(&body, |n| comment_text(n).is_some()).unwrap();
        replace_node(&comment, create_text_element("span", &[], "y"));
        assert_eq!(
            crate::inner_html(&body),
            "<p>a</p><span>y</span><p>b</p>"
        );

        let first = find_first_element(&body, "p").unwrap();
        detach(&first);
        assert!(parent(&first).is_none());
        assert_eq!(crate::inner_html(&body), "<span>y</span><p>b</p>");
    }

    #[test]
    fn test_ensure_doctype_once() {
        let dom = parse_document("<p>x</p>");
        ensure_doctype(&dom);
        ensure_doctype(&dom);
        let html = serialize_document(&dom);
        assert!(html.starts_with("<!DOCTYPE html><html>"));
        assert_eq!(html.matches("<!DOCTYPE").count(), 1);
    }
}
