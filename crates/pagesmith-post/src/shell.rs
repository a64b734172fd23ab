//! Document shell.

use pagesmith_dom::{
    append_child, attr, create_element, create_text_element, ensure_doctype, find_first, has_attr,
    has_doctype, head, html_element, index_in_parent, insert_child, is_element, prepend_child,
    set_attr, Handle, RcDom,
};

pub const VIEWPORT_CONTENT: &str = "width=device-width, initial-scale=1";

/// Ensure a doctype, `lang`, charset, viewport and title.
///
/// Input that arrived without a doctype is treated as a fragment and gets
/// the full minimal shell. A document that declared its own doctype only
/// gets a viewport meta if it lacks one. Returns whether a shell was built.
pub fn ensure_shell(dom: &RcDom, lang: &str, fallback_title: &str) -> bool {
    let fragment = !has_doctype(dom);
    ensure_doctype(dom);

    let (Some(root), Some(head)) = (html_element(dom), head(dom)) else {
        return fragment;
    };

    if fragment {
        if !has_attr(&root, "lang") {
            set_attr(&root, "lang", lang);
        }
        if find_first(&dom.document, is_charset_meta).is_none() {
            prepend_child(&head, create_element("meta", &[("charset", "utf-8")]));
        }
    }

    if find_first(&dom.document, is_viewport_meta).is_none() {
        let viewport = create_element("meta", &[("name", "viewport"), ("content", VIEWPORT_CONTENT)]);
        match find_first(&head, is_charset_meta).and_then(|m| index_in_parent(&m)) {
            Some(index) => insert_child(&head, index + 1, viewport),
            None => prepend_child(&head, viewport),
        }
    }

    if fragment && find_first(&dom.document, |n| is_element(n, "title")).is_none() {
        append_child(&head, create_text_element("title", &[], fallback_title));
    }

    if fragment {
        tracing::debug!("wrapped fragment in a document shell");
    }
    fragment
}

fn is_charset_meta(node: &Handle) -> bool {
    is_element(node, "meta") && has_attr(node, "charset")
}

fn is_viewport_meta(node: &Handle) -> bool {
    is_element(node, "meta")
        && attr(node, "name").is_some_and(|name| name.trim().eq_ignore_ascii_case("viewport"))
}
