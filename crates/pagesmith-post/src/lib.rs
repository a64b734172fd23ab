//! Post-processing of generated markup.
//!
//! Raw text from a generative backend goes through an ordered chain of
//! steps, each a no-op when it has nothing to do and each idempotent:
//!
//! 1. [`fence`]: strip code fences and surrounding commentary
//! 2. [`sanitize`]: remove scripts, inline handlers and `javascript:` URLs
//! 3. [`shell`]: ensure a document shell with charset and viewport
//! 4. [`responsive`]: inject the baseline stylesheet and tag image galleries
//! 5. [`nav`]: synthesize a script-free mobile navigation layer
//! 6. [`assets`]: inline uploaded assets referenced by filename
//! 7. [`markers`]: attach editable markers
//! 8. [`locks`]: put locked regions back in place of their placeholders
//!
//! Steps 2 through 7 run on a parsed tree; the lock step runs on the
//! serialized text so locked markup comes back byte-for-byte.

pub mod assets;
pub mod fence;
pub mod locks;
pub mod markers;
pub mod nav;
pub mod processor;
pub mod responsive;
pub mod sanitize;
pub mod shell;

pub use assets::AssetMap;
pub use processor::{PostProcessOptions, PostProcessReport, PostProcessor};
