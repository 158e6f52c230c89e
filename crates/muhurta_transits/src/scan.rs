//! Minute-resolution micro-transit scanning.
//!
//! A scan walks the range one step at a time, comparing a moving body's
//! longitude to each fixed target angle. Entering orb opens an event;
//! leaving orb closes it, keeping the minimum orb seen as the event's
//! exactness. Events still open at the end of the range are force
//! closed there. Orbs are always reduced angular distance, never raw
//! difference.
//!
//! Each scan is a pure function of (start, end, targets, ephemeris);
//! partial results for elapsed minutes stay valid if a caller abandons
//! a scan early.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use muhurta_core::{Body, EphemerisPort, GeoLocation, angular_distance};

use crate::error::TransitError;

/// One fixed angle watched by a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitTarget {
    /// Registry or caller-assigned name, e.g. "yogi_point".
    pub name: String,
    /// Moving body compared against the angle.
    pub body: Body,
    /// Fixed ecliptic longitude of the target.
    pub angle_deg: f64,
    /// Orb within which the target is active.
    pub orb_deg: f64,
}

/// One contiguous in-orb window for one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroTransitEvent {
    pub target: String,
    pub body: Body,
    pub start: NaiveDateTime,
    /// Exclusive. Equal to the scan end when force-closed.
    pub end: NaiveDateTime,
    /// Minimum orb observed inside the window.
    pub exactness_deg: f64,
    /// Instant of the minimum orb.
    pub peak: NaiveDateTime,
    /// True when the window was still open at the end of the range.
    pub force_closed: bool,
}

/// Scan stepping. The default one-minute step matches the resolution
/// the overlap layer expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub step: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            step: Duration::minutes(1),
        }
    }
}

struct OpenWindow {
    start: NaiveDateTime,
    exactness_deg: f64,
    peak: NaiveDateTime,
}

/// Scan `[start, end)` for in-orb windows of every target.
///
/// Output is ordered by (target index, start). A position failure
/// aborts the scan; per-date tolerance is the calendar layer's job,
/// minute scans need a contiguous range.
pub fn scan<P: EphemerisPort>(
    port: &P,
    location: &GeoLocation,
    start: NaiveDateTime,
    end: NaiveDateTime,
    targets: &[TransitTarget],
    config: &ScanConfig,
) -> Result<Vec<MicroTransitEvent>, TransitError> {
    if end <= start {
        return Err(TransitError::EmptyRange { start, end });
    }

    let mut open: Vec<Option<OpenWindow>> = targets.iter().map(|_| None).collect();
    let mut events: Vec<Vec<MicroTransitEvent>> = targets.iter().map(|_| Vec::new()).collect();

    let mut instant = start;
    while instant < end {
        let positions = port.positions(instant, location)?;
        for (i, target) in targets.iter().enumerate() {
            let position = positions.require(target.body, instant)?;
            let orb = angular_distance(position.longitude_deg, target.angle_deg);
            if orb <= target.orb_deg {
                match &mut open[i] {
                    Some(window) => {
                        if orb < window.exactness_deg {
                            window.exactness_deg = orb;
                            window.peak = instant;
                        }
                    }
                    None => {
                        open[i] = Some(OpenWindow {
                            start: instant,
                            exactness_deg: orb,
                            peak: instant,
                        });
                    }
                }
            } else if let Some(window) = open[i].take() {
                events[i].push(close(window, instant, target, false));
            }
        }
        instant += config.step;
    }

    for (i, slot) in open.into_iter().enumerate() {
        if let Some(window) = slot {
            events[i].push(close(window, end, &targets[i], true));
        }
    }

    let events: Vec<MicroTransitEvent> = events.into_iter().flatten().collect();
    log::debug!(
        "scanned {} targets over {start} .. {end}: {} events",
        targets.len(),
        events.len()
    );
    Ok(events)
}

fn close(
    window: OpenWindow,
    end: NaiveDateTime,
    target: &TransitTarget,
    force_closed: bool,
) -> MicroTransitEvent {
    MicroTransitEvent {
        target: target.name.clone(),
        body: target.body,
        start: window.start,
        end,
        exactness_deg: window.exactness_deg,
        peak: window.peak,
        force_closed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use muhurta_core::{EphemerisConfig, FixedEphemeris, Position};

    fn epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    // Moon at 100° moving 13.18°/day crosses 103° around 05:28.
    fn port() -> FixedEphemeris {
        FixedEphemeris::new(EphemerisConfig::default(), epoch())
            .with_body(Body::Moon, Position::new(100.0, 5.0, 13.18))
    }

    fn target(angle: f64, orb: f64) -> TransitTarget {
        TransitTarget {
            name: "natal_point".into(),
            body: Body::Moon,
            angle_deg: angle,
            orb_deg: orb,
        }
    }

    #[test]
    fn crossing_opens_peaks_and_closes() {
        let location = GeoLocation::new(0.0, 0.0).unwrap();
        let events = scan(
            &port(),
            &location,
            epoch(),
            epoch() + Duration::hours(12),
            &[target(103.0, 1.0)],
            &ScanConfig::default(),
        )
        .unwrap();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert!(!event.force_closed);
        // 2° of travel at 13.18°/day is about 3.6 hours in orb.
        let span = event.end - event.start;
        assert!(span > Duration::hours(3) && span < Duration::hours(4));
        // Exactness lands within one minute-step of zero orb.
        assert!(event.exactness_deg < 0.01);
        assert!(event.start < event.peak && event.peak < event.end);
    }

    #[test]
    fn open_window_at_range_end_is_force_closed() {
        let location = GeoLocation::new(0.0, 0.0).unwrap();
        let end = epoch() + Duration::hours(6);
        let events = scan(
            &port(),
            &location,
            epoch(),
            end,
            &[target(103.5, 1.0)], // enters orb ~04:33, still in orb at 06:00
            &ScanConfig::default(),
        )
        .unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].force_closed);
        assert_eq!(events[0].end, end);
    }

    #[test]
    fn orb_uses_reduced_distance_across_the_wrap() {
        let location = GeoLocation::new(0.0, 0.0).unwrap();
        let port = FixedEphemeris::new(EphemerisConfig::default(), epoch())
            .with_body(Body::Moon, Position::new(359.5, 0.0, 13.18));
        // Target at 0.2°: reduced distance is 0.7°, raw difference 359.3°.
        let events = scan(
            &port,
            &location,
            epoch(),
            epoch() + Duration::hours(2),
            &[target(0.2, 1.0)],
            &ScanConfig::default(),
        )
        .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, epoch());
        assert_relative_eq!(events[0].exactness_deg, 0.0, epsilon = 0.01);
    }

    #[test]
    fn never_in_orb_yields_no_events() {
        let location = GeoLocation::new(0.0, 0.0).unwrap();
        let events = scan(
            &port(),
            &location,
            epoch(),
            epoch() + Duration::hours(1),
            &[target(250.0, 1.5)],
            &ScanConfig::default(),
        )
        .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn empty_range_is_rejected() {
        let location = GeoLocation::new(0.0, 0.0).unwrap();
        let err = scan(
            &port(),
            &location,
            epoch(),
            epoch(),
            &[target(103.0, 1.0)],
            &ScanConfig::default(),
        );
        assert!(matches!(err, Err(TransitError::EmptyRange { .. })));
    }
}
