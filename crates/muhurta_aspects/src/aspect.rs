//! Aspect detection over a day's position snapshot.
//!
//! For every unordered body pair, checks the six standard longitude angles
//! plus declination parallel/contraparallel within configurable orb
//! ceilings. Applying/separating is decided by comparing today's orb with
//! tomorrow's: shrinking orb = applying. When explicit next-day positions
//! are not supplied, positions are extrapolated 0.1 day forward from the
//! bodies' own speeds.

use muhurta_core::{BodyPositions, angular_distance};

use crate::aspect_types::{
    AspectInfo, AspectType, CoordinateType, LONGITUDE_ASPECTS, StrengthTier,
};

/// Orb ceilings and the applying-detection step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectConfig {
    /// Longitude aspects are emitted only with orb at or below this.
    pub max_longitude_orb_deg: f64,
    /// Declination parallels use a tighter ceiling by convention.
    pub max_declination_orb_deg: f64,
    /// Extrapolation step in days when no next-day snapshot is supplied.
    pub applying_step_days: f64,
    /// Relative speeds below this (deg/day) make time-to-peak undefined.
    pub min_relative_speed: f64,
}

impl Default for AspectConfig {
    fn default() -> Self {
        Self {
            max_longitude_orb_deg: 3.0,
            max_declination_orb_deg: 1.2,
            applying_step_days: 0.1,
            min_relative_speed: 1e-4,
        }
    }
}

/// Detect every aspect in a day's snapshot.
///
/// `tomorrow` supplies explicit next-day positions for applying
/// detection; pass `None` to extrapolate from today's speeds instead.
/// Output order is deterministic: pair order follows [`muhurta_core::Body`]
/// declaration order, aspect angles in ascending order.
pub fn find_aspects(
    today: &BodyPositions,
    tomorrow: Option<&BodyPositions>,
    config: &AspectConfig,
) -> Vec<AspectInfo> {
    let bodies: Vec<_> = today.bodies().collect();
    let mut aspects = Vec::new();

    for (i, &body_a) in bodies.iter().enumerate() {
        for &body_b in &bodies[i + 1..] {
            let pos_a = match today.get(body_a) {
                Some(p) => *p,
                None => continue,
            };
            let pos_b = match today.get(body_b) {
                Some(p) => *p,
                None => continue,
            };

            // Next positions: explicit snapshot when present, linear
            // extrapolation otherwise.
            let step = config.applying_step_days;
            let (next_lon_a, next_lon_b, next_dec_a, next_dec_b, step_days) = match tomorrow {
                Some(next) => match (next.get(body_a), next.get(body_b)) {
                    (Some(na), Some(nb)) => (
                        na.longitude_deg,
                        nb.longitude_deg,
                        na.declination_deg,
                        nb.declination_deg,
                        1.0,
                    ),
                    _ => (
                        pos_a.longitude_deg + pos_a.speed_deg_per_day * step,
                        pos_b.longitude_deg + pos_b.speed_deg_per_day * step,
                        pos_a.declination_deg,
                        pos_b.declination_deg,
                        step,
                    ),
                },
                None => (
                    pos_a.longitude_deg + pos_a.speed_deg_per_day * step,
                    pos_b.longitude_deg + pos_b.speed_deg_per_day * step,
                    pos_a.declination_deg,
                    pos_b.declination_deg,
                    step,
                ),
            };

            let separation = angular_distance(pos_a.longitude_deg, pos_b.longitude_deg);
            let next_separation = angular_distance(next_lon_a, next_lon_b);

            for (aspect_type, angle) in LONGITUDE_ASPECTS {
                let orb = (separation - angle).abs();
                if orb > config.max_longitude_orb_deg {
                    continue;
                }
                let next_orb = (next_separation - angle).abs();
                let is_applying = next_orb < orb;
                let days_to_peak = if is_applying {
                    // Peak ETA from the observed orb closure rate over the
                    // step, expressed in days.
                    let closure_per_day = (orb - next_orb) / step_days;
                    if closure_per_day.abs() < config.min_relative_speed {
                        None
                    } else {
                        Some(orb / closure_per_day)
                    }
                } else {
                    None
                };
                aspects.push(AspectInfo {
                    body_a,
                    body_b,
                    aspect_type,
                    orb_deg: orb,
                    is_applying,
                    strength_tier: StrengthTier::from_orb(orb),
                    coordinate_type: CoordinateType::Longitude,
                    days_to_peak,
                });
            }

            // Declination: parallel for same-sign pairs, contraparallel for
            // opposite-sign pairs. Zero declination counts as same-sign.
            let dec_a = pos_a.declination_deg;
            let dec_b = pos_b.declination_deg;
            let same_sign = dec_a * dec_b >= 0.0;
            let (dec_type, orb) = if same_sign {
                (AspectType::Parallel, (dec_a - dec_b).abs())
            } else {
                (AspectType::Contraparallel, (dec_a + dec_b).abs())
            };
            if orb <= config.max_declination_orb_deg {
                let next_orb = if same_sign {
                    (next_dec_a - next_dec_b).abs()
                } else {
                    (next_dec_a + next_dec_b).abs()
                };
                let is_applying = next_orb < orb;
                aspects.push(AspectInfo {
                    body_a,
                    body_b,
                    aspect_type: dec_type,
                    orb_deg: orb,
                    is_applying,
                    strength_tier: StrengthTier::from_orb(orb),
                    coordinate_type: CoordinateType::Declination,
                    days_to_peak: None,
                });
            }
        }
    }

    aspects
}
