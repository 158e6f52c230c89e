//! Date-range calendar generation over any day classifier.
//!
//! Generation is pure and restartable: the same (classifier, start,
//! num_days) always yields the same sequence, and no state carries
//! between calls. A date whose classification fails becomes an explicit
//! error entry; it is never replaced by a fabricated label, and the
//! rest of the range is unaffected.

use chrono::{Days, NaiveDate};

use muhurta_classify::{ClassificationResult, DayClassifier};

/// One generated day: a verdict or an explicit failure.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome<L> {
    Ok(ClassificationResult<L>),
    Error { date: NaiveDate, message: String },
}

impl<L> DayOutcome<L> {
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Ok(result) => result.date,
            Self::Error { date, .. } => *date,
        }
    }

    pub fn as_result(&self) -> Option<&ClassificationResult<L>> {
        match self {
            Self::Ok(result) => Some(result),
            Self::Error { .. } => None,
        }
    }
}

/// Classify `num_days` consecutive dates starting at `start`.
pub fn generate<C: DayClassifier>(
    classifier: &C,
    start: NaiveDate,
    num_days: u32,
) -> Vec<DayOutcome<C::Label>> {
    let mut outcomes = Vec::with_capacity(num_days as usize);
    for offset in 0..num_days {
        let Some(date) = start.checked_add_days(Days::new(offset as u64)) else {
            log::warn!(
                "{}: date overflow at offset {offset} from {start}, truncating range",
                classifier.system_name()
            );
            break;
        };
        match classifier.classify(date) {
            Ok(result) => outcomes.push(DayOutcome::Ok(result)),
            Err(err) => {
                log::warn!("{}: {date}: {err}", classifier.system_name());
                outcomes.push(DayOutcome::Error {
                    date,
                    message: err.to_string(),
                });
            }
        }
    }
    outcomes
}

/// Collapse a generated range to a date-indexed label map, dropping
/// error entries. CombinedAnalyzer treats the dropped dates as neutral.
pub fn label_map<L: Copy>(
    outcomes: &[DayOutcome<L>],
) -> std::collections::BTreeMap<NaiveDate, L> {
    outcomes
        .iter()
        .filter_map(|o| o.as_result())
        .map(|r| (r.date, r.classification))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use muhurta_classify::{ClassifyError, PtiClass};
    use muhurta_core::CoreError;

    /// Fixture classifier: even days Go, day 3 errors, rest Normal.
    struct Scripted;

    impl DayClassifier for Scripted {
        type Label = PtiClass;

        fn system_name(&self) -> &'static str {
            "scripted"
        }

        fn classify(
            &self,
            date: NaiveDate,
        ) -> Result<ClassificationResult<PtiClass>, ClassifyError> {
            use chrono::Datelike;
            if date.day() == 3 {
                return Err(ClassifyError::Core(CoreError::Ephemeris {
                    body: muhurta_core::Body::Moon,
                    instant: NaiveDateTime::default(),
                    reason: "no data".into(),
                }));
            }
            let label = if date.day() % 2 == 0 {
                PtiClass::Go
            } else {
                PtiClass::Normal
            };
            Ok(ClassificationResult::new(date, label, 0.0, "scripted"))
        }
    }

    #[test]
    fn failed_dates_stay_explicit_and_do_not_abort_the_range() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let outcomes = generate(&Scripted, start, 5);
        assert_eq!(outcomes.len(), 5);
        assert!(matches!(outcomes[2], DayOutcome::Error { .. }));
        assert_eq!(outcomes[2].date(), NaiveDate::from_ymd_opt(2025, 9, 3).unwrap());
        assert!(outcomes[3].as_result().is_some());
    }

    #[test]
    fn generation_is_deterministic_and_restartable() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(generate(&Scripted, start, 7), generate(&Scripted, start, 7));
    }

    #[test]
    fn label_map_skips_error_entries() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let map = label_map(&generate(&Scripted, start, 5));
        assert_eq!(map.len(), 4);
        assert!(!map.contains_key(&NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()));
        assert_eq!(map[&NaiveDate::from_ymd_opt(2025, 9, 2).unwrap()], PtiClass::Go);
    }
}
