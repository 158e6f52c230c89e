//! Hard-stop clash rules.
//!
//! A deal-breaker vetoes the day outright: classification short-circuits
//! to the worst label and the score path never runs. Only applying
//! clashes count — a separating clash already peaked.

use muhurta_core::Body;

use crate::aspect_types::AspectInfo;

/// Pluto clashes with Sun/Venus use a stricter orb than the tier bound.
const PLUTO_CLASH_MAX_ORB: f64 = 0.3;

/// The outcome of the deal-breaker check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DealBreakerFinding {
    pub has_deal_breaker: bool,
    pub reasons: Vec<String>,
}

/// Scan a day's aspect set for veto conditions.
///
/// Triggers:
/// - Saturn square/opposition a personal planet at tight/close tier
/// - Saturn–Jupiter or Saturn–Chiron clash at tight/close tier
///   ("nuclear"/"heartbreak" label, same veto)
/// - Mars–Uranus clash at tight/close tier ("chaos risk")
/// - Pluto–Sun or Pluto–Venus clash at tight tier with orb ≤ 0.3°
///
/// Saturn combinations with Neptune or Uranus never trigger; slow
/// mutual background is excluded by rule.
pub fn check_deal_breakers(aspects: &[AspectInfo]) -> DealBreakerFinding {
    let mut finding = DealBreakerFinding::default();

    for aspect in aspects {
        if !aspect.is_applying || !aspect.aspect_type.is_clash() {
            continue;
        }
        let tight_or_close = aspect.strength_tier.is_tight_or_close();

        if aspect.involves(Body::Saturn) && tight_or_close {
            let other = other_body(aspect, Body::Saturn);
            if matches!(other, Body::Neptune | Body::Uranus) {
                continue;
            }
            if other.is_personal() {
                finding.push(format!(
                    "Saturn {} {} at {:.2}° applying",
                    aspect.aspect_type, other, aspect.orb_deg
                ));
                continue;
            }
            if other == Body::Jupiter {
                finding.push(format!(
                    "nuclear clash: Saturn {} Jupiter at {:.2}° applying",
                    aspect.aspect_type, aspect.orb_deg
                ));
                continue;
            }
            if other == Body::Chiron {
                finding.push(format!(
                    "heartbreak clash: Saturn {} Chiron at {:.2}° applying",
                    aspect.aspect_type, aspect.orb_deg
                ));
                continue;
            }
        }

        if aspect.is_pair(Body::Mars, Body::Uranus) && tight_or_close {
            finding.push(format!(
                "chaos risk: Mars {} Uranus at {:.2}° applying",
                aspect.aspect_type, aspect.orb_deg
            ));
            continue;
        }

        if aspect.involves(Body::Pluto) && aspect.orb_deg <= PLUTO_CLASH_MAX_ORB {
            let other = other_body(aspect, Body::Pluto);
            if matches!(other, Body::Sun | Body::Venus) {
                finding.push(format!(
                    "Pluto {} {} at {:.2}° applying",
                    aspect.aspect_type, other, aspect.orb_deg
                ));
            }
        }
    }

    finding
}

fn other_body(aspect: &AspectInfo, body: Body) -> Body {
    if aspect.body_a == body {
        aspect.body_b
    } else {
        aspect.body_a
    }
}

impl DealBreakerFinding {
    fn push(&mut self, reason: String) {
        self.has_deal_breaker = true;
        self.reasons.push(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect_types::{AspectType, CoordinateType, StrengthTier};

    fn clash(a: Body, b: Body, aspect_type: AspectType, orb: f64, applying: bool) -> AspectInfo {
        AspectInfo {
            body_a: a,
            body_b: b,
            aspect_type,
            orb_deg: orb,
            is_applying: applying,
            strength_tier: StrengthTier::from_orb(orb),
            coordinate_type: CoordinateType::Longitude,
            days_to_peak: applying.then_some(1.0),
        }
    }

    #[test]
    fn saturn_square_personal_planet_vetoes() {
        let finding = check_deal_breakers(&[clash(
            Body::Saturn,
            Body::Venus,
            AspectType::Square,
            0.4,
            true,
        )]);
        assert!(finding.has_deal_breaker);
        assert!(finding.reasons[0].contains("Venus"));
    }

    #[test]
    fn separating_clash_is_ignored() {
        let finding = check_deal_breakers(&[clash(
            Body::Saturn,
            Body::Venus,
            AspectType::Square,
            0.4,
            false,
        )]);
        assert!(!finding.has_deal_breaker);
    }

    #[test]
    fn saturn_jupiter_is_nuclear() {
        let finding = check_deal_breakers(&[clash(
            Body::Saturn,
            Body::Jupiter,
            AspectType::Opposition,
            0.8,
            true,
        )]);
        assert!(finding.has_deal_breaker);
        assert!(finding.reasons[0].contains("nuclear"));
    }

    #[test]
    fn saturn_neptune_is_background_noise() {
        let finding = check_deal_breakers(&[
            clash(Body::Saturn, Body::Neptune, AspectType::Square, 0.1, true),
            clash(Body::Saturn, Body::Uranus, AspectType::Opposition, 0.2, true),
        ]);
        assert!(!finding.has_deal_breaker);
    }

    #[test]
    fn mars_uranus_chaos() {
        let finding = check_deal_breakers(&[clash(
            Body::Mars,
            Body::Uranus,
            AspectType::Square,
            0.9,
            true,
        )]);
        assert!(finding.has_deal_breaker);
        assert!(finding.reasons[0].contains("chaos"));
    }

    #[test]
    fn pluto_needs_the_stricter_orb() {
        // 0.4° is tight-tier but beyond the 0.3° Pluto bound.
        let wide = check_deal_breakers(&[clash(
            Body::Pluto,
            Body::Sun,
            AspectType::Square,
            0.4,
            true,
        )]);
        assert!(!wide.has_deal_breaker);

        let tight = check_deal_breakers(&[clash(
            Body::Pluto,
            Body::Venus,
            AspectType::Opposition,
            0.25,
            true,
        )]);
        assert!(tight.has_deal_breaker);
    }

    #[test]
    fn moderate_tier_saturn_clash_does_not_veto() {
        let finding = check_deal_breakers(&[clash(
            Body::Saturn,
            Body::Mars,
            AspectType::Square,
            1.5,
            true,
        )]);
        assert!(!finding.has_deal_breaker);
    }

    #[test]
    fn trine_never_vetoes() {
        let finding = check_deal_breakers(&[clash(
            Body::Saturn,
            Body::Sun,
            AspectType::Trine,
            0.1,
            true,
        )]);
        assert!(!finding.has_deal_breaker);
    }
}
