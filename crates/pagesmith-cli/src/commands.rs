//! Subcommand implementations. Each returns the text to emit.

use anyhow::{Context, Result};
use pagesmith_core::{DesignExport, LockedRegion};
use pagesmith_lock::{contract, LockGranularity, LockSession};
use pagesmith_pipeline::{build_asset_map, AssetStore, DesignImporter, DirectoryAssetStore};
use pagesmith_post::{AssetMap, PostProcessOptions, PostProcessor};
use std::io::Read;
use std::path::Path;

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_export(path: &Path) -> Result<DesignExport> {
    let text = read_input(path)?;
    DesignExport::from_json(&text).with_context(|| format!("Invalid design export {}", path.display()))
}

fn read_locks(path: &Path) -> Result<Vec<LockedRegion>> {
    let text = read_input(path)?;
    contract::from_json(&text).with_context(|| format!("Invalid lock list {}", path.display()))
}

pub fn analyze(export: &Path) -> Result<String> {
    let design = DesignImporter::default().analyze(&read_export(export)?);
    Ok(serde_json::to_string_pretty(&design)?)
}

/// Render an export. `title` always wins; `fallback_title` only applies when
/// the export carries no title of its own.
pub fn import(export: &Path, title: Option<&str>, fallback_title: Option<&str>) -> Result<String> {
    let export = read_export(export)?;
    let title = title.or_else(|| fallback_title.filter(|_| export.design_title.trim().is_empty()));
    let doc = DesignImporter::default().import(&export, title);
    Ok(doc.into_string())
}

pub fn postprocess(
    raw: &Path,
    assets: Option<&Path>,
    locks: Option<&Path>,
    options: PostProcessOptions,
) -> Result<String> {
    let raw = read_input(raw)?;

    let assets = match assets {
        Some(dir) => {
            let store = DirectoryAssetStore::new(dir);
            let uploads = store
                .keys()
                .and_then(|keys| store.resolve(&keys))
                .with_context(|| format!("Failed to read assets from {}", dir.display()))?;
            build_asset_map(&uploads)
        }
        None => AssetMap::new(),
    };
    let locks = match locks {
        Some(path) => read_locks(path)?,
        None => Vec::new(),
    };

    let (doc, report) = PostProcessor::new(options).process_with_report(&raw, &assets, &locks);
    tracing::info!(report = %serde_json::to_string(&report)?, "post-processing report");
    Ok(doc.into_string())
}

pub fn lock(doc: &Path, markers: &[String], granularity: LockGranularity) -> Result<String> {
    let html = read_input(doc)?;
    let mut session = LockSession::new(&html).with_granularity(granularity);
    for marker in markers {
        let state = session.toggle(marker)?;
        tracing::debug!(marker = %marker, ?state, "toggled");
    }
    Ok(contract::to_json(&session.locked_regions())?)
}

pub fn contract_text(locks: &Path) -> Result<String> {
    let locks = read_locks(locks)?;
    if locks.is_empty() {
        return Ok(String::new());
    }
    Ok(format!(
        "{}\n\n{}",
        contract::system_clause(&locks),
        contract::placeholder_listing(&locks)
    ))
}
