//! Prompt construction for prompt-driven generation.

use crate::collaborators::GenerationRequest;
use pagesmith_core::LockedRegion;
use pagesmith_lock::contract::{placeholder_listing, system_clause};
use pagesmith_post::AssetMap;

/// Longest brief sent upstream, in characters.
pub const MAX_BRIEF_CHARS: usize = 8000;

const SYSTEM_RULES: &str = "You generate ONE complete responsive HTML document (no JS required).

Hard rules:
- Always return a full HTML document (<!doctype html> ...).
- DO NOT wrap your answer in markdown fences.
- Respect 100% of the user's requested business type, style, layout, theme, colors, fonts, icons, and vibe.
- Mobile-first: it must look great at 375px wide. Avoid fixed widths. Stack gracefully on smaller screens.
- Keep it semantic and accessible (use <header>, <main>, <section>, <footer>, .container, .grid).
- No external CDNs, frameworks, or <script> tags. Inline all CSS in <style>.
- If assets are provided, reference them exactly by filename in <img src=\"...\"> (they will be inlined later).
- Ensure forms and buttons are large/tappable on mobile.
- Do not invent extra sections beyond what the user described.";

const OUTPUT_RULES: &str = "Output: HTML only. Include basic brandable CSS in a <style> block in <head>. \
Make sure content stacks gracefully on mobile and forms/buttons are large enough to tap.";

/// Cut a brief to [`MAX_BRIEF_CHARS`] characters.
pub fn truncate_brief(brief: &str) -> &str {
    match brief.char_indices().nth(MAX_BRIEF_CHARS) {
        Some((at, _)) => &brief[..at],
        None => brief,
    }
}

/// The system instruction: hard rules, then the lock contract if any.
pub fn system_instruction(locks: &[LockedRegion]) -> String {
    let clause = system_clause(locks);
    if clause.is_empty() {
        format!("{}\n", SYSTEM_RULES)
    } else {
        format!("{}\n\n{}\n", SYSTEM_RULES, clause)
    }
}

/// List of asset filenames the model may reference.
pub fn assets_manifest(assets: &AssetMap) -> String {
    if assets.is_empty() {
        return "No assets provided.".to_string();
    }
    let lines = assets
        .keys()
        .map(|name| format!("- {}", name))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Assets you may use (reference by filename in <img src=\"...\">):\n{}\n\nUse these filenames exactly; do not invent new ones.",
        lines
    )
}

/// User content: brief, asset manifest, output rules, placeholder listing.
pub fn user_content(brief: &str, assets: &AssetMap, locks: &[LockedRegion]) -> String {
    let brief = truncate_brief(brief.trim());
    let brief = if brief.is_empty() { "(no brief provided)" } else { brief };

    let mut text = format!("Brief:\n{}\n\n{}\n\n{}\n", brief, assets_manifest(assets), OUTPUT_RULES);
    let listing = placeholder_listing(locks);
    if !listing.is_empty() {
        text.push('\n');
        text.push_str(&listing);
    }
    text
}

/// Assemble the full backend request. Images are the optional reference
/// image followed by every asset payload, in map order.
pub fn build_request(
    brief: &str,
    assets: &AssetMap,
    locks: &[LockedRegion],
    reference: Option<&str>,
) -> GenerationRequest {
    let images = reference
        .map(str::to_string)
        .into_iter()
        .chain(assets.values().cloned())
        .collect();

    GenerationRequest {
        system: system_instruction(locks),
        user: user_content(brief, assets, locks),
        images,
    }
}
