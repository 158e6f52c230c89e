//! Error taxonomy shared by every downstream crate.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::body::Body;

/// Errors from the core position contract.
///
/// An `Ephemeris` failure affects only the instant it was raised for;
/// calendar generation must surface it per-date rather than abort a range.
/// `InvalidInput` fails fast at the classifier boundary and is never
/// converted into a fabricated classification.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// The position provider could not compute a body position.
    #[error("ephemeris failure for {body} at {instant}: {reason}")]
    Ephemeris {
        body: Body,
        instant: NaiveDateTime,
        reason: String,
    },
    /// Malformed caller input: bad date string, out-of-range coordinate,
    /// missing required birth data.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn ephemeris_error_names_body_and_instant() {
        let instant = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let err = CoreError::Ephemeris {
            body: Body::Pluto,
            instant,
            reason: "kernel gap".into(),
        };
        let text = err.to_string();
        assert!(text.contains("Pluto"));
        assert!(text.contains("2025-03-01"));
        assert!(text.contains("kernel gap"));
    }
}
