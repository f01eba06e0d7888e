//! Error types for Terraform generation.

use lw_hcl::HclError;
use thiserror::Error;

/// Result type alias for generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that can occur while generating Terraform.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The arguments describe a contradictory or incomplete integration.
    #[error("Invalid inputs: {0}")]
    InvalidInputs(String),

    /// Block construction failed after validation passed.
    #[error("Generation failed: {0}")]
    GenerationFailed(#[from] HclError),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenerateError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInputs(message.into())
    }

    pub fn is_invalid_inputs(&self) -> bool {
        matches!(self, Self::InvalidInputs(_))
    }
}
