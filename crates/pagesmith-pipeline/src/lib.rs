//! Producer pipelines for pagesmith.
//!
//! Two paths converge on one [`GeneratedDocument`]:
//! - Path A, design import: [`DesignImporter`] parses a design export and
//!   renders it with the markup generator
//! - Path B, prompt-driven: [`Generator`] authorizes the request, builds
//!   the prompt and lock contract, calls the generative backend and runs the
//!   post-processor over whatever comes back
//!
//! Credit checks, the backend and asset storage are collaborators behind the
//! traits in [`collaborators`].

pub mod assets;
pub mod collaborators;
pub mod generate;
pub mod import;
pub mod prompt;

pub use assets::{build_asset_map, data_url, sanitize_asset_name, DirectoryAssetStore};
pub use collaborators::{
    AllowAll, AssetStore, Authorization, BackendError, CreditGate, GenerationRequest, GenerativeBackend,
    StoreError, UploadedAsset,
};
pub use generate::{Generation, Generator, PromptInput};
pub use import::{import_design, import_design_json, DesignImporter};
pub use pagesmith_core::GeneratedDocument;
pub use prompt::{build_request, MAX_BRIEF_CHARS};
