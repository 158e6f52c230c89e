//! The day scorer: fold a day's aspect set into one number.
//!
//! Each aspect contributes a signed weight determined by the pair's
//! benefic/malefic membership, the aspect's harmonious/tense nature, its
//! strength tier, and its duration class. Moon aspects are damped (the
//! Moon is too fast to be a reliable daily signal) and applying aspects
//! are boosted over separating ones. The total feeds classification
//! thresholds and is never reinterpreted outside its source classifier.

use serde::{Deserialize, Serialize};

use muhurta_core::Body;

use crate::aspect_types::{AspectInfo, DurationClass};

/// Benefic set for pair classification.
pub const BENEFIC_SET: [Body; 4] = [Body::Sun, Body::Moon, Body::Venus, Body::Jupiter];

/// Malefic set for pair classification.
pub const MALEFIC_SET: [Body; 5] = [
    Body::Mars,
    Body::Saturn,
    Body::Pluto,
    Body::Rahu,
    Body::Ketu,
];

/// Damping applied to any Moon-involved contribution.
const MOON_DAMPING: f64 = 0.3;

/// Boost applied to applying aspects over separating ones.
const APPLYING_BOOST: f64 = 1.15;

/// Flat duration multipliers for non-short aspects.
const MEDIUM_TERM_WEIGHT: f64 = 0.75;
const LONG_TERM_WEIGHT: f64 = 0.1;

/// One labelled contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub label: String,
    pub contribution: f64,
}

/// The scored day: total plus ordered factor list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayScore {
    pub score: f64,
    pub factors: Vec<ScoreFactor>,
}

fn is_benefic(body: Body) -> bool {
    BENEFIC_SET.contains(&body)
}

fn is_malefic(body: Body) -> bool {
    MALEFIC_SET.contains(&body)
}

/// Base magnitude before duration/damping/applying adjustments.
///
/// Benefic pairs on harmonious aspects and malefic-involved tense aspects
/// carry full weight; everything else gets roughly half. Malefic tension
/// hits harder when a personal planet is on the receiving end.
fn base_contribution(aspect: &AspectInfo) -> f64 {
    let benefic_pair = is_benefic(aspect.body_a) && is_benefic(aspect.body_b);
    let malefic_involved = is_malefic(aspect.body_a) || is_malefic(aspect.body_b);

    if aspect.aspect_type.is_harmonious() {
        if benefic_pair { 2.0 } else { 1.0 }
    } else if malefic_involved {
        if aspect.involves_personal() { -3.0 } else { -2.0 }
    } else {
        -1.0
    }
}

fn duration_multiplier(aspect: &AspectInfo) -> f64 {
    match aspect.duration_class() {
        DurationClass::ShortTerm => aspect.strength_tier.weight() / 3.0,
        DurationClass::MediumTerm => MEDIUM_TERM_WEIGHT,
        DurationClass::LongTerm => LONG_TERM_WEIGHT,
    }
}

/// Contribution of one aspect, fully adjusted.
fn contribution(aspect: &AspectInfo) -> f64 {
    let mut value = base_contribution(aspect) * duration_multiplier(aspect);
    if aspect.involves(Body::Moon) {
        value *= MOON_DAMPING;
    }
    if aspect.is_applying {
        value *= APPLYING_BOOST;
    }
    value
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score a day's aspect set.
///
/// Deterministic and replayable: factors appear in the order of the input
/// aspect set, each rounded to 2 decimals, as is the total.
pub fn score_day(aspects: &[AspectInfo]) -> DayScore {
    let mut total = 0.0;
    let mut factors = Vec::with_capacity(aspects.len());
    for aspect in aspects {
        let value = contribution(aspect);
        total += value;
        factors.push(ScoreFactor {
            label: aspect.to_string(),
            contribution: round2(value),
        });
    }
    DayScore {
        score: round2(total),
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect_types::{AspectType, CoordinateType, StrengthTier};
    use approx::assert_relative_eq;

    fn aspect(
        a: Body,
        b: Body,
        aspect_type: AspectType,
        orb: f64,
        applying: bool,
    ) -> AspectInfo {
        AspectInfo {
            body_a: a,
            body_b: b,
            aspect_type,
            orb_deg: orb,
            is_applying: applying,
            strength_tier: StrengthTier::from_orb(orb),
            coordinate_type: if matches!(
                aspect_type,
                AspectType::Parallel | AspectType::Contraparallel
            ) {
                CoordinateType::Declination
            } else {
                CoordinateType::Longitude
            },
            days_to_peak: None,
        }
    }

    #[test]
    fn benefic_short_term_tight_applying() {
        // Venus trine Jupiter, tight, applying, short-term:
        // 2.0 * (3.0/3) * 1.15 = 2.3
        let score = score_day(&[aspect(
            Body::Venus,
            Body::Jupiter,
            AspectType::Trine,
            0.2,
            true,
        )]);
        assert_relative_eq!(score.score, 2.3, epsilon = 1e-9);
        assert_eq!(score.factors.len(), 1);
    }

    #[test]
    fn malefic_personal_tension_mirrors_sign() {
        // Saturn square Sun, tight, separating, short-term (Sun fast):
        // -3.0 * (3.0/3) = -3.0
        let score = score_day(&[aspect(
            Body::Saturn,
            Body::Sun,
            AspectType::Square,
            0.1,
            false,
        )]);
        assert_relative_eq!(score.score, -3.0, epsilon = 1e-9);
    }

    #[test]
    fn long_term_background_is_nearly_flat() {
        // Saturn trine Neptune, long-term: 1.0 * 0.1 = 0.1
        let score = score_day(&[aspect(
            Body::Saturn,
            Body::Neptune,
            AspectType::Trine,
            0.2,
            false,
        )]);
        assert_relative_eq!(score.score, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn medium_term_uses_flat_weight() {
        // Mars square Saturn, medium-term malefic personal:
        // -3.0 * 0.75 = -2.25
        let score = score_day(&[aspect(
            Body::Mars,
            Body::Saturn,
            AspectType::Square,
            0.3,
            false,
        )]);
        assert_relative_eq!(score.score, -2.25, epsilon = 1e-9);
    }

    #[test]
    fn moon_contributions_are_damped() {
        // Moon trine Jupiter, tight, separating: 2.0 * 1.0 * 0.3 = 0.6
        let score = score_day(&[aspect(
            Body::Moon,
            Body::Jupiter,
            AspectType::Trine,
            0.2,
            false,
        )]);
        assert_relative_eq!(score.score, 0.6, epsilon = 1e-9);
    }

    #[test]
    fn totals_sum_and_round() {
        let aspects = [
            aspect(Body::Venus, Body::Jupiter, AspectType::Trine, 0.2, true),
            aspect(Body::Saturn, Body::Sun, AspectType::Square, 0.1, false),
        ];
        let score = score_day(&aspects);
        assert_relative_eq!(score.score, 2.3 - 3.0, epsilon = 1e-9);
        assert_eq!(score.factors.len(), 2);
    }

    #[test]
    fn scoring_is_deterministic() {
        let aspects = [
            aspect(Body::Venus, Body::Jupiter, AspectType::Trine, 0.2, true),
            aspect(Body::Mars, Body::Saturn, AspectType::Square, 1.2, true),
            aspect(Body::Moon, Body::Pluto, AspectType::Opposition, 0.8, false),
        ];
        assert_eq!(score_day(&aspects), score_day(&aspects));
    }
}
