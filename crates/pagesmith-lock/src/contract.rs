//! The textual contract sent upstream with a regeneration request.
//!
//! The backend is told which regions are locked and must echo one
//! placeholder comment per region, in order. Placeholders are always built
//! with [`LockedRegion::placeholder`], the same form the post-processor
//! substitutes.

use pagesmith_core::{LockError, LockedRegion};

/// The LOCKS listing and placeholder requirement for the system instruction.
/// Empty when nothing is locked.
pub fn system_clause(regions: &[LockedRegion]) -> String {
    if regions.is_empty() {
        return String::new();
    }

    let listing = regions
        .iter()
        .map(|r| format!("- id:{} • label:{}", r.id, r.label))
        .collect::<Vec<_>>()
        .join("\n");
    let tokens = regions
        .iter()
        .map(LockedRegion::placeholder)
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "LOCKS:\n{}\n\nREQUIREMENT: Your output MUST include the exact placeholder tokens, in order: {}.\n\
         Insert each token where its section belongs based on the label. Do NOT modify these tokens.",
        listing, tokens
    )
}

/// The placeholder listing for the user content. Empty when nothing is locked.
pub fn placeholder_listing(regions: &[LockedRegion]) -> String {
    if regions.is_empty() {
        return String::new();
    }

    let mut out = String::from("Insert these placeholders verbatim:\n");
    for region in regions {
        out.push_str(&format!("  {}  ({})\n", region.placeholder(), region.label));
    }
    out
}

/// Ordered region list as JSON.
pub fn to_json(regions: &[LockedRegion]) -> Result<String, LockError> {
    Ok(serde_json::to_string(regions)?)
}

/// Decode an ordered region list. An empty or blank input is an empty list.
pub fn from_json(json: &str) -> Result<Vec<LockedRegion>, LockError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(json)?)
}
