//! Error type for calendar generation and record import.

use thiserror::Error;

/// Errors from calendar assembly and snapshot import.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// Snapshot JSON did not parse.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    /// Snapshot parsed but matched no known shape.
    #[error("unrecognized snapshot shape: {0}")]
    UnrecognizedShape(&'static str),
    /// A record field failed validation.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
