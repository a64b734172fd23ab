use pagesmith_dom::{collapsed_text, find_first, is_element, Handle};

pub const MAX_LABEL_CHARS: usize = 40;

/// Human-readable label for a locked region.
///
/// Uses the first `h1`/`h2`/`h3` inside the region, else the region's own
/// text, truncated to [`MAX_LABEL_CHARS`]. Regions without text are labelled
/// `Section <position>` (one-based).
pub fn region_label(root: &Handle, position: usize) -> String {
    let is_heading = |n: &Handle| ["h1", "h2", "h3"].iter().any(|t| is_element(n, t));

    let heading = if is_heading(root) {
        Some(root.clone())
    } else {
        find_first(root, is_heading)
    };

    let text = heading
        .map(|h| collapsed_text(&h))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| collapsed_text(root));

    if text.is_empty() {
        return format!("Section {}", position);
    }
    truncate(&text)
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_LABEL_CHARS {
        return text.to_string();
    }
    text.chars()
        .take(MAX_LABEL_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}
