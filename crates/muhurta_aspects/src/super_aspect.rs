//! Curated signal tables: super aspects, Cinderella aspects, super
//! parallels, and transcendent links.
//!
//! These are named body-pair patterns treated as "Best"-grade evidence by
//! the PTI ladder. The pair tables are fixed; membership is checked in
//! either body order.

use muhurta_core::Body;

use crate::aspect_types::{AspectInfo, AspectType, CoordinateType, DurationClass};

/// Pairs whose harmonious longitude aspects rank as super aspects.
pub const SUPER_ASPECT_PAIRS: [(Body, Body); 7] = [
    (Body::Jupiter, Body::Uranus),
    (Body::Jupiter, Body::Neptune),
    (Body::Jupiter, Body::Pluto),
    (Body::Venus, Body::Jupiter),
    (Body::Sun, Body::Jupiter),
    (Body::Venus, Body::Neptune),
    (Body::Venus, Body::Pluto),
];

/// Chiron-to-benefic pairs: the Cinderella set.
pub const CINDERELLA_PAIRS: [(Body, Body); 3] = [
    (Body::Venus, Body::Chiron),
    (Body::Jupiter, Body::Chiron),
    (Body::Neptune, Body::Chiron),
];

/// The core-and-periphery benefic set for transcendent links.
pub const TRANSCENDENT_BODIES: [Body; 7] = [
    Body::Sun,
    Body::Moon,
    Body::Venus,
    Body::Jupiter,
    Body::Uranus,
    Body::Neptune,
    Body::Chiron,
];

fn in_pair_table(aspect: &AspectInfo, table: &[(Body, Body)]) -> bool {
    table.iter().any(|&(a, b)| aspect.is_pair(a, b))
}

fn is_harmonious_longitude(aspect: &AspectInfo) -> bool {
    aspect.coordinate_type == CoordinateType::Longitude
        && matches!(
            aspect.aspect_type,
            AspectType::Conjunction | AspectType::Trine | AspectType::Sextile
        )
}

/// Harmonious longitude aspects between super-aspect pairs.
pub fn find_super_aspects<'a>(aspects: &'a [AspectInfo]) -> Vec<&'a AspectInfo> {
    aspects
        .iter()
        .filter(|a| is_harmonious_longitude(a) && in_pair_table(a, &SUPER_ASPECT_PAIRS))
        .collect()
}

/// Harmonious longitude aspects between Cinderella pairs.
pub fn find_cinderella_aspects<'a>(aspects: &'a [AspectInfo]) -> Vec<&'a AspectInfo> {
    aspects
        .iter()
        .filter(|a| is_harmonious_longitude(a) && in_pair_table(a, &CINDERELLA_PAIRS))
        .collect()
}

/// Declination parallels between super-aspect pairs at tight/close tier.
pub fn find_super_parallels<'a>(aspects: &'a [AspectInfo]) -> Vec<&'a AspectInfo> {
    aspects
        .iter()
        .filter(|a| {
            a.aspect_type == AspectType::Parallel
                && a.strength_tier.is_tight_or_close()
                && in_pair_table(a, &SUPER_ASPECT_PAIRS)
        })
        .collect()
}

/// Transcendent links: harmonious aspects between two transcendent-set
/// bodies at tight/close tier and short-term duration.
pub fn find_transcendent_links<'a>(aspects: &'a [AspectInfo]) -> Vec<&'a AspectInfo> {
    aspects
        .iter()
        .filter(|a| {
            a.aspect_type.is_harmonious()
                && a.strength_tier.is_tight_or_close()
                && a.duration_class() == DurationClass::ShortTerm
                && TRANSCENDENT_BODIES.contains(&a.body_a)
                && TRANSCENDENT_BODIES.contains(&a.body_b)
        })
        .collect()
}

/// Enhancement: any harmonious aspect, except long-term parallels.
///
/// A slow-pair parallel holds for months; counting it daily would
/// double-book the same background signal, so it is excluded here.
pub fn is_enhancement(aspect: &AspectInfo) -> bool {
    if !aspect.aspect_type.is_harmonious() {
        return false;
    }
    !(aspect.coordinate_type == CoordinateType::Declination
        && aspect.duration_class() == DurationClass::LongTerm)
}
