//! Contracts for the services generation depends on.
//!
//! All three are synchronous request/response calls. Retry, timeout and
//! cancellation policy belong to the implementor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a credit/authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub allowed: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Authorization {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Decides whether an account may spend `cost` credits on a generation.
pub trait CreditGate {
    fn authorize(&self, account: &str, cost: u32) -> Authorization;
}

/// A gate that permits everything. Used by the CLI and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl CreditGate for AllowAll {
    fn authorize(&self, _account: &str, _cost: u32) -> Authorization {
        Authorization::allow()
    }
}

/// One request to the generative backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System instruction: hard rules plus the lock contract.
    pub system: String,
    /// User content: brief, asset manifest, placeholder listing.
    pub user: String,
    /// Attached images as `data:` URLs, reference image first.
    pub images: Vec<String>,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,
}

/// The external model that turns a request into raw markup text.
pub trait GenerativeBackend {
    fn complete(&self, request: &GenerationRequest) -> Result<String, BackendError>;
}

/// An uploaded file as returned by the asset store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedAsset {
    pub fn new(name: impl Into<String>, mime: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.map(str::to_string),
            bytes,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolves uploaded-file keys to their content.
pub trait AssetStore {
    fn resolve(&self, keys: &[String]) -> Result<Vec<UploadedAsset>, StoreError>;
}

impl<T: CreditGate + ?Sized> CreditGate for &T {
    fn authorize(&self, account: &str, cost: u32) -> Authorization {
        (**self).authorize(account, cost)
    }
}

impl<T: GenerativeBackend + ?Sized> GenerativeBackend for &T {
    fn complete(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        (**self).complete(request)
    }
}

impl<T: AssetStore + ?Sized> AssetStore for &T {
    fn resolve(&self, keys: &[String]) -> Result<Vec<UploadedAsset>, StoreError> {
        (**self).resolve(keys)
    }
}
