//! Geometric pattern detection over a day's aspect set.
//!
//! Patterns are triangles assembled from already-detected longitude
//! aspects: grand trine (three mutual trines), T-square (opposition with a
//! double-square apex), and yod (sextile base with a double-quincunx
//! apex). Detection never re-measures positions; if a leg fell outside
//! the detector's orb ceiling, the pattern does not exist that day.

use serde::{Deserialize, Serialize};

use muhurta_core::Body;

use crate::aspect_types::{AspectInfo, AspectType, CoordinateType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    GrandTrine,
    TSquare,
    Yod,
}

impl PatternKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::GrandTrine => "grand trine",
            Self::TSquare => "T-square",
            Self::Yod => "yod",
        }
    }
}

/// One detected triangle.
///
/// `apex` is the focal body for T-squares and yods; grand trines have
/// none. `tight_or_close_legs` counts legs at tight/close tier — the PTI
/// ladder requires two such legs before a grand trine counts as a Best
/// signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryPattern {
    pub kind: PatternKind,
    pub bodies: [Body; 3],
    pub apex: Option<Body>,
    pub tight_or_close_legs: usize,
}

/// Find the longitude aspect of a given type between a pair, if any.
fn leg<'a>(
    aspects: &'a [AspectInfo],
    a: Body,
    b: Body,
    aspect_type: AspectType,
) -> Option<&'a AspectInfo> {
    aspects.iter().find(|asp| {
        asp.coordinate_type == CoordinateType::Longitude
            && asp.aspect_type == aspect_type
            && asp.is_pair(a, b)
    })
}

fn count_tight(legs: &[&AspectInfo]) -> usize {
    legs.iter()
        .filter(|l| l.strength_tier.is_tight_or_close())
        .count()
}

/// Detect all grand trines, T-squares, and yods in a day's aspect set.
///
/// Output is deterministic: triples are enumerated in body order, and for
/// a given triple the patterns are emitted grand-trine first.
pub fn detect_patterns(aspects: &[AspectInfo]) -> Vec<GeometryPattern> {
    let mut bodies: Vec<Body> = Vec::new();
    for aspect in aspects {
        if aspect.coordinate_type != CoordinateType::Longitude {
            continue;
        }
        for b in [aspect.body_a, aspect.body_b] {
            if !bodies.contains(&b) {
                bodies.push(b);
            }
        }
    }
    bodies.sort_by_key(|b| b.index());

    let mut patterns = Vec::new();
    for (i, &a) in bodies.iter().enumerate() {
        for (j, &b) in bodies.iter().enumerate().skip(i + 1) {
            for &c in bodies.iter().skip(j + 1) {
                // Grand trine: all three pairwise trines.
                if let (Some(l1), Some(l2), Some(l3)) = (
                    leg(aspects, a, b, AspectType::Trine),
                    leg(aspects, b, c, AspectType::Trine),
                    leg(aspects, a, c, AspectType::Trine),
                ) {
                    patterns.push(GeometryPattern {
                        kind: PatternKind::GrandTrine,
                        bodies: [a, b, c],
                        apex: None,
                        tight_or_close_legs: count_tight(&[l1, l2, l3]),
                    });
                }

                // T-square: one opposition, the remaining body squares both
                // ends. Each of the three bodies is tried as apex.
                for (apex, base_a, base_b) in [(a, b, c), (b, a, c), (c, a, b)] {
                    if let (Some(opp), Some(s1), Some(s2)) = (
                        leg(aspects, base_a, base_b, AspectType::Opposition),
                        leg(aspects, apex, base_a, AspectType::Square),
                        leg(aspects, apex, base_b, AspectType::Square),
                    ) {
                        patterns.push(GeometryPattern {
                            kind: PatternKind::TSquare,
                            bodies: [a, b, c],
                            apex: Some(apex),
                            tight_or_close_legs: count_tight(&[opp, s1, s2]),
                        });
                    }

                    // Yod: sextile base, apex quincunx to both ends.
                    if let (Some(sx), Some(q1), Some(q2)) = (
                        leg(aspects, base_a, base_b, AspectType::Sextile),
                        leg(aspects, apex, base_a, AspectType::Quincunx),
                        leg(aspects, apex, base_b, AspectType::Quincunx),
                    ) {
                        patterns.push(GeometryPattern {
                            kind: PatternKind::Yod,
                            bodies: [a, b, c],
                            apex: Some(apex),
                            tight_or_close_legs: count_tight(&[sx, q1, q2]),
                        });
                    }
                }
            }
        }
    }
    patterns
}
