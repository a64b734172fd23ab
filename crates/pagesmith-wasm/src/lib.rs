//! WebAssembly bindings for pagesmith.
//!
//! ## Example
//!
//! ```js
//! import { importDesign, postProcess, LockEditor } from 'pagesmith';
//!
//! // Path A: design export to document
//! const page = importDesign(exportJson, 'My Cafe');
//!
//! // Lock a section before regenerating
//! const editor = new LockEditor(page);
//! editor.toggle('h2-1');
//! const locks = editor.lockedRegions();
//!
//! // Path B: normalize the backend's response, putting locked sections back
//! const next = postProcess(rawResponse, { 'logo.png': logoDataUrl }, locks);
//! ```

use pagesmith_core::{DesignExport, LockedRegion};
use pagesmith_lock::{contract, LockGranularity, LockSession, LockState};
use pagesmith_pipeline::DesignImporter;
use pagesmith_post::{AssetMap, PostProcessOptions, PostProcessor};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Render a design export (JSON text) as an editable document.
#[wasm_bindgen(js_name = importDesign)]
pub fn import_design(json: &str, title: Option<String>) -> Result<String, JsError> {
    let export = DesignExport::from_json(json).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(DesignImporter::default().import(&export, title.as_deref()).into_string())
}

/// Parse a design export and return sections, tokens and metadata.
#[wasm_bindgen(js_name = analyzeDesign)]
pub fn analyze_design(json: &str) -> Result<JsValue, JsError> {
    let export = DesignExport::from_json(json).map_err(|e| JsError::new(&e.to_string()))?;
    let design = DesignImporter::default().analyze(&export);
    serde_wasm_bindgen::to_value(&design).map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Normalize raw generated markup.
///
/// `assets` is an object of filename to `data:` URL; `locks` is an array of
/// `{id, label, html}`. Either may be `null`/`undefined`. `options` may set
/// `lang`, `fallback_title` and `mobile_nav`.
#[wasm_bindgen(js_name = postProcess)]
pub fn post_process(raw: &str, assets: JsValue, locks: JsValue, options: JsValue) -> Result<String, JsError> {
    let assets: AssetMap = decode_or_default(assets, "assets")?;
    let locks: Vec<LockedRegion> = decode_or_default(locks, "locks")?;
    let options: PostProcessOptions = decode_or_default(options, "options")?;
    Ok(PostProcessor::new(options).process(raw, &assets, &locks).into_string())
}

/// System-instruction clause and placeholder listing for a lock list.
#[wasm_bindgen(js_name = lockContract)]
pub fn lock_contract(locks: JsValue) -> Result<JsValue, JsError> {
    let locks: Vec<LockedRegion> = decode_or_default(locks, "locks")?;
    let pair = (contract::system_clause(&locks), contract::placeholder_listing(&locks));
    serde_wasm_bindgen::to_value(&pair).map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn decode_or_default<T>(value: JsValue, what: &str) -> Result<T, JsError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&format!("Invalid {}: {}", what, e)))
}

/// Lock editing over a rendered document.
#[wasm_bindgen]
pub struct LockEditor {
    session: LockSession,
}

#[wasm_bindgen]
impl LockEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(html: &str) -> Self {
        Self {
            session: LockSession::new(html),
        }
    }

    /// Lock exactly the addressed element instead of its enclosing block.
    #[wasm_bindgen(js_name = setExact)]
    pub fn set_exact(&mut self, exact: bool) {
        let granularity = if exact { LockGranularity::Exact } else { LockGranularity::Block };
        self.session.set_granularity(granularity);
    }

    /// Toggle the lock for an editable marker or element id. Returns whether
    /// the region is now locked.
    pub fn toggle(&mut self, marker: &str) -> Result<bool, JsError> {
        match self.session.toggle(marker) {
            Ok(LockState::Locked { .. }) => Ok(true),
            Ok(LockState::Unlocked { .. }) => Ok(false),
            Err(e) => Err(JsError::new(&e.to_string())),
        }
    }

    #[wasm_bindgen(js_name = isLocked)]
    pub fn is_locked(&self, marker: &str) -> bool {
        self.session.is_locked(marker)
    }

    #[wasm_bindgen(js_name = unlockAll)]
    pub fn unlock_all(&mut self) -> u32 {
        self.session.unlock_all() as u32
    }

    /// Locked regions in document order, as `{id, label, html}` objects.
    #[wasm_bindgen(js_name = lockedRegions)]
    pub fn locked_regions(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.session.locked_regions())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// The current document, lock annotations included.
    pub fn html(&self) -> String {
        self.session.html()
    }
}
