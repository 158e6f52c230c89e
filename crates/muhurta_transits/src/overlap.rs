//! Overlap detection between bird periods and micro-transit events.
//!
//! An automation moment is a bird period with at least one transit
//! window inside it. Intervals are half-open and overlap strictly:
//! `a.start < b.end && b.start < a.end`, so touching intervals never
//! match. Only events on the period's calendar date are considered;
//! a period running past midnight also accepts events dated the next
//! day.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use muhurta_classify::BirdPeriod;

use crate::scan::MicroTransitEvent;

/// One favorable window where a bird period and transit events line up.
///
/// Exists only as a query result over its sources; it is never stored
/// independently of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationMoment {
    pub date: NaiveDate,
    pub period: BirdPeriod,
    /// max of the overlapping starts.
    pub window_start: NaiveDateTime,
    /// min of the overlapping ends.
    pub window_end: NaiveDateTime,
    pub transits: Vec<MicroTransitEvent>,
}

fn overlaps(a_start: NaiveDateTime, a_end: NaiveDateTime, b: &MicroTransitEvent) -> bool {
    a_start < b.end && b.start < a_end
}

/// Same-date gate: the event must fall on the period's date, or on the
/// next date when the period crosses midnight.
fn same_calendar_date(period: &BirdPeriod, event: &MicroTransitEvent) -> bool {
    let event_date = event.start.date();
    event_date == period.date
        || (period.end.date() > period.date && event_date == period.end.date())
}

/// Intersect bird periods with transit events, one moment per period
/// with at least one overlap. Output is chronological.
pub fn detect(periods: &[BirdPeriod], events: &[MicroTransitEvent]) -> Vec<AutomationMoment> {
    let mut moments: Vec<AutomationMoment> = periods
        .iter()
        .filter_map(|period| {
            let matched: Vec<MicroTransitEvent> = events
                .iter()
                .filter(|e| same_calendar_date(period, e) && overlaps(period.start, period.end, e))
                .cloned()
                .collect();
            if matched.is_empty() {
                return None;
            }
            let window_start = matched
                .iter()
                .map(|e| e.start)
                .max()
                .map(|s| s.max(period.start))?;
            let window_end = matched
                .iter()
                .map(|e| e.end)
                .min()
                .map(|e| e.min(period.end))?;
            Some(AutomationMoment {
                date: period.date,
                period: period.clone(),
                window_start,
                window_end,
                transits: matched,
            })
        })
        .collect();
    moments.sort_by_key(|m| (m.date, m.window_start));
    moments
}
