//! Flat snapshot records for the export layers.
//!
//! Downstream feeds consume one flat record per day: ISO date string,
//! display label, score, reason. The canonical snapshot shape keys the
//! record list under `timing_data`; older exports used `results`. The
//! importer accepts both and logs which shape it read so a mixed
//! archive stays diagnosable.

use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use muhurta_classify::ClassificationResult;

use crate::error::CalendarError;

/// Canonical snapshot key for the record list.
pub const SNAPSHOT_KEY: &str = "timing_data";

/// Legacy snapshot key, accepted on import only.
const LEGACY_SNAPSHOT_KEY: &str = "results";

/// One exported day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// ISO-8601 calendar date.
    pub date: String,
    /// Display label of the classification.
    pub classification: String,
    pub score: f64,
    pub reason: String,
}

impl DayRecord {
    pub fn from_result<L: Display>(result: &ClassificationResult<L>) -> Self {
        Self {
            date: result.date.format("%Y-%m-%d").to_string(),
            classification: result.classification.to_string(),
            score: result.score,
            reason: result.reason.clone(),
        }
    }

    /// Parsed date, failing on anything that is not ISO-8601.
    pub fn parsed_date(&self) -> Result<NaiveDate, CalendarError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| CalendarError::InvalidRecord(format!("date {:?}: {e}", self.date)))
    }
}

/// Export a generated sequence as snapshot JSON under the canonical key.
pub fn snapshot<L: Display>(results: &[ClassificationResult<L>]) -> Value {
    let records: Vec<DayRecord> = results.iter().map(DayRecord::from_result).collect();
    serde_json::json!({ SNAPSHOT_KEY: records })
}

/// Import records from snapshot JSON, accepting the canonical shape,
/// the legacy `results` shape, or a bare record array.
pub fn records_from_snapshot(value: &Value) -> Result<Vec<DayRecord>, CalendarError> {
    let list = if let Some(list) = value.get(SNAPSHOT_KEY) {
        list
    } else if let Some(list) = value.get(LEGACY_SNAPSHOT_KEY) {
        log::warn!("snapshot keyed under legacy {LEGACY_SNAPSHOT_KEY:?}, reading it anyway");
        list
    } else if value.is_array() {
        log::warn!("snapshot is a bare record array, reading it anyway");
        value
    } else {
        return Err(CalendarError::UnrecognizedShape(
            "expected timing_data, results, or a record array",
        ));
    };
    Ok(serde_json::from_value(list.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use muhurta_classify::PtiClass;

    fn result() -> ClassificationResult<PtiClass> {
        ClassificationResult::new(
            NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
            PtiClass::Go,
            4.25,
            "clean positive day",
        )
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let record = DayRecord::from_result(&result());
        let json = serde_json::to_string(&record).unwrap();
        let back: DayRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
        assert_eq!(back.date, "2025-09-03");
        assert_eq!(back.classification, "PTI Go");
        assert_eq!(back.score, 4.25);
        assert_eq!(back.reason, "clean positive day");
        assert_eq!(
            back.parsed_date().unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()
        );
    }

    #[test]
    fn import_accepts_canonical_and_legacy_shapes() {
        let value = snapshot(&[result()]);
        let canonical = records_from_snapshot(&value).unwrap();
        assert_eq!(canonical.len(), 1);

        let legacy = serde_json::json!({ "results": value[SNAPSHOT_KEY] });
        assert_eq!(records_from_snapshot(&legacy).unwrap(), canonical);

        let bare = value[SNAPSHOT_KEY].clone();
        assert_eq!(records_from_snapshot(&bare).unwrap(), canonical);
    }

    #[test]
    fn unknown_shape_is_an_error_not_a_default() {
        let err = records_from_snapshot(&serde_json::json!({ "days": [] }));
        assert!(matches!(err, Err(CalendarError::UnrecognizedShape(_))));
    }

    #[test]
    fn malformed_date_fails_on_parse() {
        let record = DayRecord {
            date: "03/09/2025".into(),
            classification: "PTI Go".into(),
            score: 0.0,
            reason: String::new(),
        };
        assert!(record.parsed_date().is_err());
    }
}
