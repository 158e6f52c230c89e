//! Error type for transit scanning.

use chrono::NaiveDateTime;
use thiserror::Error;

use muhurta_core::CoreError;

/// Errors from micro-transit scans.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TransitError {
    /// Error from the core position contract.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// Scan range where `end` is not after `start`.
    #[error("empty scan range: {start} .. {end}")]
    EmptyRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Scanner name not present in the static registry.
    #[error("unknown scanner {0:?}")]
    UnknownScanner(String),
}
