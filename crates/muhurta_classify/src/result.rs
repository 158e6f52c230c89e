//! The common per-day classification record and the classifier trait.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClassifyError;

/// One classifier's verdict for one date.
///
/// Immutable once produced; regenerating a range overwrites rather than
/// merges. `details` carries classifier-specific evidence (deal-breaker
/// reasons, matched layer, factor breakdowns) for diagnostics and the
/// exported snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult<L> {
    pub date: NaiveDate,
    pub classification: L,
    pub score: f64,
    pub reason: String,
    pub details: BTreeMap<String, Value>,
}

impl<L> ClassificationResult<L> {
    pub fn new(date: NaiveDate, classification: L, score: f64, reason: impl Into<String>) -> Self {
        Self {
            date,
            classification,
            score,
            reason: reason.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }
}

/// A state-free day classifier.
///
/// Implementations must be pure: classifying the same date twice yields
/// identical results, and no state carries between dates.
pub trait DayClassifier {
    type Label: Copy + Eq + Display + Serialize;

    /// Short system name used in logs and exported records.
    fn system_name(&self) -> &'static str;

    fn classify(&self, date: NaiveDate) -> Result<ClassificationResult<Self::Label>, ClassifyError>;
}
