//! Error type for classification.

use thiserror::Error;

use muhurta_core::CoreError;

/// Errors from day classification.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ClassifyError {
    /// Error from the core position contract.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// Personal classification requested without the required birth data.
    #[error("missing birth data: {0}")]
    MissingBirthData(&'static str),
}
