//! Path B: prompt-driven generation.

use crate::assets::{build_asset_map, data_url};
use crate::collaborators::{AssetStore, BackendError, CreditGate, GenerativeBackend, StoreError};
use crate::prompt::build_request;
use pagesmith_core::{GeneratedDocument, GenerationError, LockedRegion};
use pagesmith_post::{PostProcessOptions, PostProcessReport, PostProcessor};

/// Credits one generation costs unless configured otherwise.
pub const DEFAULT_COST: u32 = 1;

const DEFAULT_DENIAL: &str = "Insufficient credits";

impl From<BackendError> for GenerationError {
    fn from(err: BackendError) -> Self {
        GenerationError::Backend {
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for GenerationError {
    fn from(err: StoreError) -> Self {
        GenerationError::Assets {
            message: err.to_string(),
        }
    }
}

/// What the caller asks for in one generation.
#[derive(Debug, Clone, Default)]
pub struct PromptInput {
    pub account: String,
    pub brief: String,
    /// Asset-store keys of uploads to inline.
    pub assets: Vec<String>,
    /// Asset-store key of a reference image shown to the model only.
    pub reference: Option<String>,
    /// Currently locked regions, in document order.
    pub locks: Vec<LockedRegion>,
}

impl PromptInput {
    pub fn new(account: impl Into<String>, brief: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            brief: brief.into(),
            ..Default::default()
        }
    }

    pub fn with_assets(mut self, keys: Vec<String>) -> Self {
        self.assets = keys;
        self
    }

    pub fn with_reference(mut self, key: impl Into<String>) -> Self {
        self.reference = Some(key.into());
        self
    }

    pub fn with_locks(mut self, locks: Vec<LockedRegion>) -> Self {
        self.locks = locks;
        self
    }
}

/// A finished generation.
#[derive(Debug, Clone)]
pub struct Generation {
    pub document: GeneratedDocument,
    pub report: PostProcessReport,
}

/// Runs prompt-driven generation against its collaborators.
pub struct Generator<C, B, S> {
    gate: C,
    backend: B,
    store: S,
    processor: PostProcessor,
    cost: u32,
}

impl<C, B, S> Generator<C, B, S>
where
    C: CreditGate,
    B: GenerativeBackend,
    S: AssetStore,
{
    pub fn new(gate: C, backend: B, store: S) -> Self {
        Self {
            gate,
            backend,
            store,
            processor: PostProcessor::default(),
            cost: DEFAULT_COST,
        }
    }

    pub fn with_options(mut self, options: PostProcessOptions) -> Self {
        self.processor = PostProcessor::new(options);
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Generate a document. Fails only when authorization is denied or the
    /// round trip to the backend produced nothing usable.
    pub fn generate(&self, input: &PromptInput) -> Result<GeneratedDocument, GenerationError> {
        self.generate_with_report(input).map(|g| g.document)
    }

    pub fn generate_with_report(&self, input: &PromptInput) -> Result<Generation, GenerationError> {
        let auth = self.gate.authorize(&input.account, self.cost);
        if !auth.allowed {
            let reason = auth.reason.unwrap_or_else(|| DEFAULT_DENIAL.to_string());
            tracing::debug!(account = %input.account, reason = %reason, "generation denied");
            return Err(GenerationError::Denied { reason });
        }

        let uploads = self.store.resolve(&input.assets)?;
        let assets = build_asset_map(&uploads);
        let reference = match &input.reference {
            Some(key) => self
                .store
                .resolve(std::slice::from_ref(key))?
                .into_iter()
                .next()
                .map(|upload| data_url(upload.mime.as_deref(), &upload.bytes)),
            None => None,
        };

        let request = build_request(&input.brief, &assets, &input.locks, reference.as_deref());
        tracing::info!(
            assets = assets.len(),
            locks = input.locks.len(),
            images = request.images.len(),
            "requesting generation"
        );

        let raw = self.backend.complete(&request)?;
        if raw.trim().is_empty() {
            tracing::warn!("generative backend returned an empty response");
            return Err(GenerationError::EmptyResponse);
        }

        let (document, report) = self.processor.process_with_report(&raw, &assets, &input.locks);
        Ok(Generation { document, report })
    }
}
