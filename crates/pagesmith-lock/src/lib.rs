//! Locked regions across regenerations.
//!
//! A lock is a user directive that a subtree of the current document must
//! come back unchanged from the next generation. This crate provides:
//! - [`LockSession`]: toggles locks on a rendered document and collects the
//!   locked regions in document order
//! - [`contract`]: the text that tells the generative backend where to echo
//!   placeholder tokens, and the JSON form of the region list
//! - [`audit`]: checks that a generated document carries every region once
//!
//! Putting the regions back is the last step of `pagesmith-post`.

pub mod audit;
pub mod contract;
mod label;
pub mod session;

pub use audit::{audit, LockAudit, RegionAudit};
pub use label::{region_label, MAX_LABEL_CHARS};
pub use session::{LockGranularity, LockSession, LockState, BLOCK_TAGS};
