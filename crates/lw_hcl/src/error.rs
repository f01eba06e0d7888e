//! Error types for HCL construction.

use thiserror::Error;

/// Result type alias for HCL construction.
pub type HclResult<T> = Result<T, HclError>;

/// Errors that can occur while turning values and builders into blocks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HclError {
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Invalid traversal: {0}")]
    InvalidTraversal(String),

    #[error("Block `{ident}` expects {expected} label(s), got {found}")]
    InvalidLabels {
        ident: String,
        expected: usize,
        found: usize,
    },
}
