//! Static micro-transit scanner registry.
//!
//! Every scanner is enumerated here at compile time; there is no
//! runtime discovery. A scanner names a natal-derived target angle and
//! contributes a [`TransitTarget`] for the transiting Moon.

use muhurta_core::Body;
use muhurta_vedic::BirthChart;

use crate::error::TransitError;
use crate::scan::TransitTarget;

/// One registered scanner: natal angle extraction plus default orb.
#[derive(Debug, Clone, Copy)]
pub struct Scanner {
    pub name: &'static str,
    pub moving_body: Body,
    pub default_orb_deg: f64,
    angle_of: fn(&BirthChart) -> f64,
}

impl Scanner {
    /// Build this scanner's target for one birth chart.
    pub fn target(&self, chart: &BirthChart, orb_deg: Option<f64>) -> TransitTarget {
        TransitTarget {
            name: self.name.to_string(),
            body: self.moving_body,
            angle_deg: (self.angle_of)(chart),
            orb_deg: orb_deg.unwrap_or(self.default_orb_deg),
        }
    }
}

/// The full scanner set. Order is presentation order.
pub const SCANNERS: [Scanner; 4] = [
    Scanner {
        name: "natal_point",
        moving_body: Body::Moon,
        default_orb_deg: 2.5,
        angle_of: |chart| chart.moon_longitude_deg,
    },
    Scanner {
        name: "yogi_point",
        moving_body: Body::Moon,
        default_orb_deg: 1.5,
        angle_of: |chart| chart.yogi_point_deg,
    },
    Scanner {
        name: "avayogi_point",
        moving_body: Body::Moon,
        default_orb_deg: 1.5,
        angle_of: |chart| chart.avayogi_point_deg,
    },
    Scanner {
        name: "part_of_fortune",
        moving_body: Body::Moon,
        default_orb_deg: 1.0,
        angle_of: |chart| chart.part_of_fortune_deg,
    },
];

/// Look up a scanner by name.
pub fn scanner(name: &str) -> Result<&'static Scanner, TransitError> {
    SCANNERS
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| TransitError::UnknownScanner(name.to_string()))
}

/// Targets for every registered scanner at default orbs.
pub fn all_targets(chart: &BirthChart) -> Vec<TransitTarget> {
    SCANNERS.iter().map(|s| s.target(chart, None)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use muhurta_core::{BodyPositions, Position};
    use muhurta_vedic::compute_birth_chart;

    fn chart() -> BirthChart {
        let positions: BodyPositions = [
            (Body::Sun, Position::new(200.0, 0.0, 0.9856)),
            (Body::Moon, Position::new(95.0, 0.0, 13.18)),
        ]
        .into_iter()
        .collect();
        let instant = NaiveDate::from_ymd_opt(1990, 7, 15)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap();
        compute_birth_chart(&positions, 10.0, instant).unwrap()
    }

    #[test]
    fn registry_is_fixed_and_lookup_matches() {
        assert_eq!(SCANNERS.len(), 4);
        for s in &SCANNERS {
            assert_eq!(scanner(s.name).unwrap().name, s.name);
        }
        assert!(matches!(
            scanner("ascendant_ruler"),
            Err(TransitError::UnknownScanner(_))
        ));
    }

    #[test]
    fn targets_carry_natal_angles() {
        let chart = chart();
        let targets = all_targets(&chart);
        assert_eq!(targets.len(), 4);
        assert_relative_eq!(targets[0].angle_deg, chart.moon_longitude_deg);
        assert_relative_eq!(targets[1].angle_deg, chart.yogi_point_deg);
        assert_relative_eq!(targets[2].angle_deg, chart.avayogi_point_deg);
        assert_relative_eq!(targets[3].angle_deg, chart.part_of_fortune_deg);
    }

    #[test]
    fn orb_override_applies() {
        let target = scanner("yogi_point").unwrap().target(&chart(), Some(0.5));
        assert_relative_eq!(target.orb_deg, 0.5);
    }
}
