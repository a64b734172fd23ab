//! Lock-token resubstitution.
//!
//! Placeholders are normalized on the tree, then swapped for the stored
//! markup on the serialized text. Working on text for the swap means a
//! region comes back exactly as it was stored, whatever the parser would
//! have made of it.

use pagesmith_core::{parse_placeholder_body, LockedRegion, LOCK_TOKEN_PREFIX};
use pagesmith_dom::{
    append_child, body, comment_text, create_comment, descendants, detach, insert_child, is_within, replace_node,
    RcDom,
};
use std::collections::HashSet;
use std::rc::Rc;

/// Outcome of [`resubstitute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resubstitution {
    /// Regions put back in place of their placeholder.
    pub substituted: usize,
    /// Regions whose placeholder was missing and were appended to the body.
    pub appended: usize,
}

/// Rewrite placeholder comments into their exact `LOCK:<id>` form.
///
/// Placeholders for ids not in `regions` are dropped. Placeholders that
/// landed outside `<body>` (before `<html>`, in `<head>`, after `</body>`)
/// are moved into it, keeping their relative order. A region with no
/// placeholder at all gets one appended as the last child of `<body>`, in
/// region order; the return value counts those.
pub fn normalize_placeholders(dom: &RcDom, regions: &[LockedRegion]) -> usize {
    let Some(body) = body(dom) else { return 0 };
    let mut present = HashSet::new();

    let mut before_body = Vec::new();
    let mut after_body = Vec::new();
    let mut seen_body = false;

    for node in descendants(&dom.document) {
        if Rc::ptr_eq(&node, &body) {
            seen_body = true;
            continue;
        }
        let Some(id) = comment_text(&node).and_then(parse_placeholder_body).map(str::to_string) else {
            continue;
        };

        if !regions.iter().any(|r| r.id == id) {
            tracing::debug!(id = %id, "dropping placeholder for unknown lock");
            detach(&node);
            continue;
        }

        let exact = create_comment(&format!("{}{}", LOCK_TOKEN_PREFIX, id));
        present.insert(id);
        let inside = is_within(&node, |n| Rc::ptr_eq(n, &body));
        if inside {
            replace_node(&node, exact);
        } else {
            detach(&node);
            if seen_body {
                after_body.push(exact);
            } else {
                before_body.push(exact);
            }
        }
    }

    for (i, comment) in before_body.into_iter().enumerate() {
        insert_child(&body, i, comment);
    }
    for comment in after_body {
        append_child(&body, comment);
    }

    let mut appended = 0;
    for region in regions {
        if present.contains(&region.id) {
            continue;
        }
        tracing::warn!(id = %region.id, "lock placeholder missing; appending region at the end of <body>");
        append_child(&body, create_comment(&format!("{}{}", LOCK_TOKEN_PREFIX, region.id)));
        present.insert(region.id.clone());
        appended += 1;
    }
    appended
}

/// Replace each region's placeholder with its stored markup.
///
/// The first occurrence of a placeholder is replaced; any further copies are
/// dropped. A region whose placeholder is missing is inserted right before
/// the last closing body tag, in region order. Text serialized from a tree
/// that went through [`normalize_placeholders`] always holds every token.
pub fn resubstitute(html: &str, regions: &[LockedRegion]) -> (String, Resubstitution) {
    let mut out = html.to_string();
    let mut outcome = Resubstitution::default();

    for region in regions {
        let token = region.placeholder();
        match out.find(&token) {
            Some(at) => {
                out.replace_range(at..at + token.len(), &region.html);
                let rest_from = at + region.html.len();
                let duplicates = out[rest_from..].matches(&token).count();
                if duplicates > 0 {
                    let rest = out[rest_from..].replace(&token, "");
                    out.truncate(rest_from);
                    out.push_str(&rest);
                    tracing::warn!(id = %region.id, duplicates, "dropped duplicated lock placeholder");
                }
                outcome.substituted += 1;
            }
            None => {
                tracing::warn!(id = %region.id, "lock placeholder missing; appending region before </body>");
                let at = closing_body_position(&out).unwrap_or(out.len());
                out.insert_str(at, &region.html);
                outcome.appended += 1;
            }
        }
    }

    (out, outcome)
}

fn closing_body_position(html: &str) -> Option<usize> {
    html.to_ascii_lowercase().rfind("</body>")
}
