//! Mobile navigation synthesis.
//!
//! Below the phone breakpoint the page's own navigation is hidden and a
//! slide-in drawer takes its place. The drawer is driven by a checkbox and
//! `:checked` selectors, so it works without scripts.

use pagesmith_core::Color;
use pagesmith_dom::{
    append_child, attr, body, classes, collapsed_text, create_element, create_text,
    create_text_element, find_all, find_by_id, find_first, find_first_element, head, is_element,
    prepend_child, tag, text_content, Handle, RcDom,
};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub const LAYER_ID: &str = "ps-mobile-layer";
pub const NAV_STYLE_ID: &str = "ps-mobile-nav-css";

/// Widths at or below this get the drawer.
pub const PHONE_BREAKPOINT_PX: u32 = 767;

pub const FALLBACK_BRAND: &str = "Brand";
pub const FALLBACK_BRAND_COLOR: &str = "#111111";

/// A link shown in the drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub text: String,
    pub href: String,
}

impl NavLink {
    fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Insert the navigation layer unless one is already present.
///
/// Returns whether a layer was added.
pub fn ensure_mobile_nav(dom: &RcDom) -> bool {
    if find_by_id(&dom.document, LAYER_ID).is_some() {
        tracing::debug!("mobile navigation already present; skipping");
        return false;
    }
    let (Some(head), Some(body)) = (head(dom), body(dom)) else {
        return false;
    };

    let brand = detect_brand(dom);
    let links = detect_links(dom);
    let brand_color = detect_brand_color(dom);
    let foreground = foreground_for(&brand_color);

    tracing::debug!(brand = %brand, links = links.len(), color = %brand_color, "synthesizing mobile navigation");

    prepend_child(&body, build_layer(&brand, &links));
    append_child(
        &head,
        create_text_element("style", &[("id", NAV_STYLE_ID)], &nav_css(&brand_color, &foreground)),
    );
    true
}

/// Application-name meta, then the title, then a brand/logo-classed element.
pub fn detect_brand(dom: &RcDom) -> String {
    let meta = find_first(&dom.document, |n| meta_named(n, "application-name"))
        .and_then(|n| attr(&n, "content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if let Some(name) = meta {
        return name;
    }

    let title = find_first_element(&dom.document, "title")
        .map(|n| collapsed_text(&n))
        .filter(|t| !t.is_empty());
    if let Some(title) = title {
        return title;
    }

    let branded = find_all(&dom.document, |n| {
        classes(n).iter().any(|c| {
            let c = c.to_ascii_lowercase();
            c.contains("brand") || c.contains("logo")
        })
    });
    branded
        .iter()
        .map(collapsed_text)
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| FALLBACK_BRAND.to_string())
}

/// Anchors of the first `<nav>`, else headings with ids, else a fixed trio.
///
/// Deduplicated case-insensitively by visible text.
pub fn detect_links(dom: &RcDom) -> Vec<NavLink> {
    if let Some(nav) = find_first_element(&dom.document, "nav") {
        let links: Vec<NavLink> = find_all(&nav, |n| is_element(n, "a"))
            .iter()
            .filter_map(|a| {
                let href = attr(a, "href")?.trim().to_string();
                let text = collapsed_text(a);
                (!href.is_empty() && !text.is_empty()).then(|| NavLink::new(text, href))
            })
            .collect();
        if !links.is_empty() {
            return dedupe_by_text(links);
        }
    }

    let headings: Vec<NavLink> = find_all(&dom.document, |n| {
        matches!(tag(n), Some("h1" | "h2" | "h3"))
    })
    .iter()
    .filter_map(|h| {
        let id = attr(h, "id")?.trim().to_string();
        let text = collapsed_text(h);
        (!id.is_empty() && !text.is_empty()).then(|| NavLink::new(text, format!("#{}", id)))
    })
    .collect();
    if !headings.is_empty() {
        return dedupe_by_text(headings);
    }

    vec![
        NavLink::new("Home", "#home"),
        NavLink::new("About", "#about"),
        NavLink::new("Contact", "#contact"),
    ]
}

/// Theme-color meta, then `--brand`/`--primary`, then the first hex literal in
/// the page's styles or color-bearing attributes. Link fragments never count.
pub fn detect_brand_color(dom: &RcDom) -> String {
    let meta = find_first(&dom.document, |n| meta_named(n, "theme-color"))
        .and_then(|n| attr(&n, "content"))
        .map(|c| clean_color(&c))
        .filter(|c| !c.is_empty());
    if let Some(color) = meta {
        return color;
    }

    let styles = page_styles(dom);

    if let Some(re) = custom_property_regex() {
        let found = styles
            .iter()
            .find_map(|css| re.captures(css).and_then(|c| c.get(1)).map(|m| clean_color(m.as_str())))
            .filter(|c| !c.is_empty());
        if let Some(color) = found {
            return color;
        }
    }

    if let Some(re) = hex_regex() {
        if let Some(hex) = styles.iter().find_map(|css| re.find(css)) {
            return hex.as_str().to_string();
        }
    }

    FALLBACK_BRAND_COLOR.to_string()
}

/// Near-black on light brand colors, near-white otherwise.
pub fn foreground_for(brand_color: &str) -> String {
    Color::from_hex(brand_color)
        .map(|c| c.contrasting_foreground())
        .unwrap_or(Color::NEAR_WHITE)
        .to_hex()
}

/// Presentational attributes that carry a color value.
const COLOR_ATTRS: [&str; 5] = ["style", "fill", "stroke", "color", "bgcolor"];

/// Text of every authored style block and color-bearing attribute, in
/// document order.
fn page_styles(dom: &RcDom) -> Vec<String> {
    let own = [crate::responsive::BASELINE_STYLE_ID, NAV_STYLE_ID];
    let mut styles = Vec::new();
    for node in find_all(&dom.document, |n| tag(n).is_some()) {
        if is_element(&node, "style") {
            let id = attr(&node, "id");
            if id.as_deref().is_some_and(|id| own.contains(&id)) {
                continue;
            }
            styles.push(text_content(&node));
        } else {
            styles.extend(COLOR_ATTRS.iter().filter_map(|name| attr(&node, name)));
        }
    }
    styles
}

fn meta_named(node: &Handle, name: &str) -> bool {
    is_element(node, "meta")
        && attr(node, "name").is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
}

fn dedupe_by_text(links: Vec<NavLink>) -> Vec<NavLink> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.text.to_lowercase()))
        .collect()
}

/// Strip quotes and anything that could escape a CSS declaration.
fn clean_color(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '"' | '\'' | ';' | '{' | '}' | '<' | '>'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn custom_property_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|[^A-Za-z0-9_-])--(?:brand|primary)\s*:\s*([^;}]+)").ok())
        .as_ref()
}

fn hex_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#(?:[0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{3,4})\b").ok())
        .as_ref()
}

fn build_layer(brand: &str, links: &[NavLink]) -> Handle {
    let layer = create_element("div", &[("id", LAYER_ID)]);
    let wrap = create_element("div", &[("id", "ps-mobile-wrap")]);

    let bar = create_element("nav", &[("id", "ps-mobile-bar"), ("aria-label", "Mobile")]);
    append_child(&bar, create_text_element("a", &[("class", "ps-brand"), ("href", "#")], brand));
    let burger = create_element(
        "label",
        &[("class", "ps-burger"), ("for", "ps-nav-toggle"), ("aria-label", "Open menu")],
    );
    for _ in 0..3 {
        append_child(&burger, create_element("span", &[]));
    }
    append_child(&bar, burger);
    append_child(&wrap, bar);

    append_child(
        &wrap,
        create_element("input", &[("type", "checkbox"), ("id", "ps-nav-toggle"), ("aria-hidden", "true")]),
    );
    append_child(
        &wrap,
        create_element("label", &[("id", "ps-scrim"), ("for", "ps-nav-toggle"), ("aria-hidden", "true")]),
    );

    let drawer = create_element("aside", &[("id", "ps-drawer"), ("aria-label", "Menu")]);
    let close = create_element(
        "label",
        &[("class", "ps-close"), ("for", "ps-nav-toggle"), ("aria-label", "Close menu")],
    );
    append_child(&close, create_text("\u{00D7}"));
    append_child(&drawer, close);
    for link in links {
        append_child(&drawer, create_text_element("a", &[("href", link.href.as_str())], &link.text));
    }
    append_child(&wrap, drawer);

    append_child(&layer, wrap);
    layer
}

fn nav_css(brand_color: &str, foreground: &str) -> String {
    format!(
        r#"
:root {{
  --ps-brand: {brand};
  --ps-brand-fg: {fg};
  --ps-scrim: rgba(0, 0, 0, .32);
}}
#ps-mobile-layer {{ display: none; }}
#ps-mobile-bar {{
  position: sticky; top: 0; z-index: 2147483000;
  display: flex; align-items: center; gap: 10px; padding: 12px 14px;
  background: rgba(255, 255, 255, .94); border-bottom: 1px solid rgba(0, 0, 0, .06);
}}
#ps-mobile-bar .ps-brand {{ font-weight: 800; color: #111; text-decoration: none; }}
#ps-mobile-bar .ps-burger {{
  margin-left: auto; width: 40px; height: 40px; border-radius: 10px;
  background: var(--ps-brand); display: grid; place-content: center; gap: 4px; cursor: pointer;
}}
#ps-mobile-bar .ps-burger span {{ display: block; width: 18px; height: 2px; background: var(--ps-brand-fg); border-radius: 2px; }}
#ps-nav-toggle {{ position: absolute; opacity: 0; pointer-events: none; }}
#ps-scrim {{
  position: fixed; inset: 0; background: var(--ps-scrim); opacity: 0; pointer-events: none;
  transition: opacity .25s ease; z-index: 2147483001;
}}
#ps-drawer {{
  position: fixed; top: 0; bottom: 0; right: 0; width: min(82vw, 320px);
  transform: translateX(100%); transition: transform .28s ease; z-index: 2147483002;
  display: flex; flex-direction: column; gap: 6px; padding: 16px 14px;
  background: var(--ps-brand); color: var(--ps-brand-fg); box-shadow: -12px 0 32px rgba(0, 0, 0, .28);
}}
#ps-drawer a {{ display: block; padding: 12px 10px; border-radius: 10px; color: var(--ps-brand-fg); text-decoration: none; }}
#ps-drawer .ps-close {{ margin-left: auto; padding: 4px 8px; font-size: 28px; cursor: pointer; color: var(--ps-brand-fg); }}
#ps-nav-toggle:checked ~ #ps-scrim {{ opacity: 1; pointer-events: auto; }}
#ps-nav-toggle:checked ~ #ps-drawer {{ transform: translateX(0); }}
@media (max-width: {breakpoint}px) {{
  #ps-mobile-layer {{ display: block; }}
  header nav, nav:not(#ps-mobile-bar) {{ display: none !important; }}
}}
"#,
        brand = brand_color,
        fg = foreground,
        breakpoint = PHONE_BREAKPOINT_PX,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_dom::{parse_document, serialize_document};

    #[test]
    fn test_brand_priority() {
        let dom = parse_document(
            "<head><meta name=\"application-name\" content=\" Acme \"><title>Acme Home</title></head>",
        );
        assert_eq!(detect_brand(&dom), "Acme");

        let dom = parse_document("<head><title> Acme  Home </title></head>");
        assert_eq!(detect_brand(&dom), "Acme Home");

        let dom = parse_document("<body><div class=\"site-logo\"><span>Blue</span> Bottle</div></body>");
        assert_eq!(detect_brand(&dom), "Blue Bottle");

        let dom = parse_document("<body><p>nothing</p></body>");
        assert_eq!(detect_brand(&dom), "Brand");
    }

    #[test]
    fn test_links_from_nav_deduplicated() {
        let dom = parse_document(
            "<body><nav><a href=\"#menu\">Menu</a><a href=\"/menu\">MENU</a><a href=\"#visit\"> Visit <b>us</b></a><a>Nowhere</a></nav></body>",
        );
        assert_eq!(
            detect_links(&dom),
            vec![NavLink::new("Menu", "#menu"), NavLink::new("Visit us", "#visit")]
        );
    }

    #[test]
    fn test_links_from_headings_then_fallback() {
        let dom = parse_document("<body><h2 id=\"story\">Our story</h2><h2>No id</h2><h3 id=\"team\">Team</h3></body>");
        assert_eq!(
            detect_links(&dom),
            vec![NavLink::new("Our story", "#story"), NavLink::new("Team", "#team")]
        );

        let dom = parse_document("<body><p>plain</p></body>");
        let texts: Vec<_> = detect_links(&dom).into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["Home", "About", "Contact"]);
    }

    #[test]
    fn test_brand_color_priority() {
        let dom = parse_document("<head><meta name=\"theme-color\" content=\"#0EA5E9\"><style>:root{--primary: #ff0000;}</style></head>");
        assert_eq!(detect_brand_color(&dom), "#0EA5E9");

        let dom = parse_document("<head><style>a { color: #333; } :root { --brand: 'tomato'; }</style></head>");
        assert_eq!(detect_brand_color(&dom), "tomato");

        let dom = parse_document("<head><style>:root { --color-primary: #222; } h1 { color: #0f0 }</style></head>");
        assert_eq!(detect_brand_color(&dom), "#222");

        let dom = parse_document("<body><div style=\"background:#abcdef\">x</div></body>");
        assert_eq!(detect_brand_color(&dom), "#abcdef");

        let dom = parse_document("<body><a href=\"#fff\">x</a></body>");
        assert_eq!(detect_brand_color(&dom), "#111111");
    }

    #[test]
    fn test_brand_color_from_markup_attributes() {
        let dom = parse_document(
            "<body><a href=\"#abc\">x</a><svg><rect fill=\"#0ea5e9\"/></svg><font color=\"#ff0000\">a</font></body>",
        );
        assert_eq!(detect_brand_color(&dom), "#0ea5e9");

        let dom = parse_document("<body><table bgcolor=\"#336699\"><tr><td>x</td></tr></table></body>");
        assert_eq!(detect_brand_color(&dom), "#336699");
    }

    #[test]
    fn test_color_patterns_compile() {
        assert!(custom_property_regex().is_some());
        assert!(hex_regex().is_some());
    }

    #[test]
    fn test_foreground_contrast() {
        assert_eq!(foreground_for("#FFFFFF"), "#111111");
        assert_eq!(foreground_for("#111111"), "#FAFAFA");
        assert_eq!(foreground_for("tomato"), "#FAFAFA");
    }

    #[test]
    fn test_layer_injected_once() {
        let dom = parse_document("<html><head><title>Cafe</title></head><body><nav><a href=\"#m\">Menu</a></nav></body></html>");
        assert!(ensure_mobile_nav(&dom));
        assert!(!ensure_mobile_nav(&dom));

        let html = serialize_document(&dom);
        assert_eq!(html.matches("id=\"ps-mobile-layer\"").count(), 1);
        assert_eq!(html.matches("id=\"ps-mobile-nav-css\"").count(), 1);
        assert!(html.contains("<body><div id=\"ps-mobile-layer\">"));
        assert!(html.contains("<a class=\"ps-brand\" href=\"#\">Cafe</a>"));
        assert!(html.contains("<a href=\"#m\">Menu</a></aside>"));
        assert!(html.contains("--ps-brand: #111111;"));
        assert!(!html.contains("<script"));
    }
}
