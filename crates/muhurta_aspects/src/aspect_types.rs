//! Aspect vocabulary: types, strength tiers, duration classes, and the
//! per-pair [`AspectInfo`] record.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use muhurta_core::Body;

/// The six standard longitude aspects plus the two declination aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Quincunx,
    Opposition,
    Parallel,
    Contraparallel,
}

/// The longitude aspect angles checked per pair, in degrees.
pub const LONGITUDE_ASPECTS: [(AspectType, f64); 6] = [
    (AspectType::Conjunction, 0.0),
    (AspectType::Sextile, 60.0),
    (AspectType::Square, 90.0),
    (AspectType::Trine, 120.0),
    (AspectType::Quincunx, 150.0),
    (AspectType::Opposition, 180.0),
];

impl AspectType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Sextile => "sextile",
            Self::Square => "square",
            Self::Trine => "trine",
            Self::Quincunx => "quincunx",
            Self::Opposition => "opposition",
            Self::Parallel => "parallel",
            Self::Contraparallel => "contraparallel",
        }
    }

    /// Harmonious types contribute positively in scoring.
    pub const fn is_harmonious(self) -> bool {
        matches!(
            self,
            Self::Conjunction | Self::Sextile | Self::Trine | Self::Parallel
        )
    }

    /// Tense types contribute negatively and drive the clash rules.
    pub const fn is_tense(self) -> bool {
        matches!(
            self,
            Self::Square | Self::Opposition | Self::Quincunx | Self::Contraparallel
        )
    }

    /// Square or opposition: the clash shapes the deal-breaker rules watch.
    pub const fn is_clash(self) -> bool {
        matches!(self, Self::Square | Self::Opposition)
    }
}

impl Display for AspectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strength tier by orb magnitude; shared by every classifier.
///
/// Boundaries: tight < 0.5°, close < 1.0°, moderate < 2.0°, wide < 3.0°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrengthTier {
    Tight,
    Close,
    Moderate,
    Wide,
}

/// Tier boundary table (upper bounds, degrees).
pub const TIER_TIGHT_MAX: f64 = 0.5;
pub const TIER_CLOSE_MAX: f64 = 1.0;
pub const TIER_MODERATE_MAX: f64 = 2.0;
pub const TIER_WIDE_MAX: f64 = 3.0;

impl StrengthTier {
    /// Tier for an absolute orb. Orbs at or beyond the wide bound still
    /// map to `Wide`; whether they were in aspect at all is the
    /// detector's orb-ceiling decision, not the tier's.
    pub fn from_orb(orb_deg: f64) -> Self {
        let orb = orb_deg.abs();
        if orb < TIER_TIGHT_MAX {
            Self::Tight
        } else if orb < TIER_CLOSE_MAX {
            Self::Close
        } else if orb < TIER_MODERATE_MAX {
            Self::Moderate
        } else {
            Self::Wide
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Tight => "tight",
            Self::Close => "close",
            Self::Moderate => "moderate",
            Self::Wide => "wide",
        }
    }

    /// Tight or close: the band most rules key on.
    pub const fn is_tight_or_close(self) -> bool {
        matches!(self, Self::Tight | Self::Close)
    }

    /// Numeric weight used by the day scorer (tight strongest).
    pub const fn weight(self) -> f64 {
        match self {
            Self::Tight => 3.0,
            Self::Close => 2.0,
            Self::Moderate => 1.0,
            Self::Wide => 0.5,
        }
    }
}

/// Which coordinate the aspect was measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateType {
    Longitude,
    Declination,
}

/// Duration class by the movers involved: both slow = long-term
/// background, any fast = short-term, else medium-term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationClass {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl DurationClass {
    pub fn of_pair(a: Body, b: Body) -> Self {
        if a.is_slow_mover() && b.is_slow_mover() {
            Self::LongTerm
        } else if a.is_fast_mover() || b.is_fast_mover() {
            Self::ShortTerm
        } else {
            Self::MediumTerm
        }
    }
}

/// One detected aspect between an unordered body pair on one day.
///
/// `orb_deg` is the absolute deviation from the exact aspect angle on the
/// reduced circle, never a raw difference. `days_to_peak` is only present
/// for applying aspects with measurable relative speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectInfo {
    pub body_a: Body,
    pub body_b: Body,
    pub aspect_type: AspectType,
    pub orb_deg: f64,
    pub is_applying: bool,
    pub strength_tier: StrengthTier,
    pub coordinate_type: CoordinateType,
    pub days_to_peak: Option<f64>,
}

impl AspectInfo {
    /// Whether the pair involves the given body.
    pub fn involves(&self, body: Body) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// Whether the pair is exactly {a, b}, in either order.
    pub fn is_pair(&self, a: Body, b: Body) -> bool {
        (self.body_a == a && self.body_b == b) || (self.body_a == b && self.body_b == a)
    }

    /// Whether either body is a personal planet.
    pub fn involves_personal(&self) -> bool {
        self.body_a.is_personal() || self.body_b.is_personal()
    }

    pub fn duration_class(&self) -> DurationClass {
        DurationClass::of_pair(self.body_a, self.body_b)
    }
}

impl Display for AspectInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} ({:.2}° {}, {})",
            self.body_a,
            self.aspect_type,
            self.body_b,
            self.orb_deg,
            self.strength_tier.name(),
            if self.is_applying { "applying" } else { "separating" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_is_monotonic_in_orb() {
        let mut orb = 0.0;
        let mut last = StrengthTier::Tight;
        while orb <= 3.0 {
            let tier = StrengthTier::from_orb(orb);
            assert!(tier >= last, "tier regressed at orb {orb}");
            last = tier;
            orb += 0.01;
        }
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(StrengthTier::from_orb(0.49), StrengthTier::Tight);
        assert_eq!(StrengthTier::from_orb(0.5), StrengthTier::Close);
        assert_eq!(StrengthTier::from_orb(0.99), StrengthTier::Close);
        assert_eq!(StrengthTier::from_orb(1.0), StrengthTier::Moderate);
        assert_eq!(StrengthTier::from_orb(2.0), StrengthTier::Wide);
        assert_eq!(StrengthTier::from_orb(-0.3), StrengthTier::Tight);
    }

    #[test]
    fn duration_class_of_pairs() {
        assert_eq!(
            DurationClass::of_pair(Body::Saturn, Body::Pluto),
            DurationClass::LongTerm
        );
        assert_eq!(
            DurationClass::of_pair(Body::Moon, Body::Pluto),
            DurationClass::ShortTerm
        );
        assert_eq!(
            DurationClass::of_pair(Body::Mars, Body::Saturn),
            DurationClass::MediumTerm
        );
    }

    #[test]
    fn harmonious_and_tense_partition_all_types() {
        let all = [
            AspectType::Conjunction,
            AspectType::Sextile,
            AspectType::Square,
            AspectType::Trine,
            AspectType::Quincunx,
            AspectType::Opposition,
            AspectType::Parallel,
            AspectType::Contraparallel,
        ];
        for t in all {
            assert!(t.is_harmonious() != t.is_tense(), "{t} is ambiguous");
        }
    }
}
