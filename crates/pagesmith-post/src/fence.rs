//! Fence and commentary stripping.

const FENCE: &str = "```";

/// Strip code fences and any prose around the markup, then trim.
///
/// An opening fence only counts when it comes before the first `<`, and a
/// closing fence only when it comes after the last `>`; fences inside the
/// markup itself (a `<pre>` sample, say) are left alone.
pub fn strip_fences(raw: &str) -> String {
    let mut text = raw;

    let first_markup = text.find('<').unwrap_or(text.len());
    if let Some(open) = text[..first_markup].find(FENCE) {
        let after = &text[open + FENCE.len()..];
        let lang_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(after.len());
        text = &after[lang_len..];
    }

    let last_markup = text.rfind('>').map_or(0, |i| i + 1);
    if let Some(close) = text[last_markup..].find(FENCE) {
        text = &text[..last_markup + close];
    }

    if let Some(start) = text.find('<') {
        text = &text[start..];
    }
    if let Some(end) = text.to_ascii_lowercase().rfind("</html>") {
        text = &text[..end + "</html>".len()];
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_document() {
        let raw = "```html\n<html><body><h1>Hi</h1></body></html>\n```";
        assert_eq!(strip_fences(raw), "<html><body><h1>Hi</h1></body></html>");
    }

    #[test]
    fn test_commentary_around_fences() {
        let raw = "Sure! Here is your page:\n\n```HTML\n<!doctype html>\n<html></html>\n```\n\nLet me know if you want changes.";
        assert_eq!(strip_fences(raw), "<!doctype html>\n<html></html>");
    }

    #[test]
    fn test_unfenced_preamble() {
        let raw = "Here you go:\n<!DOCTYPE html><html><body></body></html> Enjoy";
        assert_eq!(strip_fences(raw), "<!DOCTYPE html><html><body></body></html>");
    }

    #[test]
    fn test_inner_fences_untouched() {
        let raw = "<!DOCTYPE html><html><body><pre>```rust\nfn main() {}\n```</pre></body></html>";
        assert_eq!(strip_fences(raw), raw);
    }

    #[test]
    fn test_plain_and_empty() {
        assert_eq!(strip_fences("  <p>x</p>\n"), "<p>x</p>");
        assert_eq!(strip_fences(""), "");
        assert_eq!(strip_fences("```\n```"), "");
    }

    #[test]
    fn test_idempotent() {
        let raw = "```html\n<div>a</div>\n```";
        let once = strip_fences(raw);
        assert_eq!(strip_fences(&once), once);
    }
}
