//! Aspect detection and day scoring: the shared building blocks under
//! every classifier.
//!
//! This crate provides:
//! - [`find_aspects`]: orb matching over all unordered body pairs in
//!   longitude and declination, with applying/separating detection,
//!   strength tiers, and time-to-peak
//! - [`check_deal_breakers`]: the hard-stop malefic clash rules
//! - Curated signal tables: super aspects, Cinderella aspects, super
//!   parallels, transcendent links
//! - [`detect_patterns`]: grand trine / yod / T-square geometry over a
//!   day's aspect set
//! - [`score_day`]: the weighted, duration-classified fold into one number
//!
//! Everything here is a pure function of a day's aspect set; classifiers
//! must share these tier boundaries and tables for comparability.

pub mod aspect;
pub mod aspect_types;
pub mod deal_breaker;
pub mod geometry;
pub mod scorer;
pub mod super_aspect;

pub use aspect::{AspectConfig, find_aspects};
pub use aspect_types::{
    AspectInfo, AspectType, CoordinateType, DurationClass, StrengthTier,
};
pub use deal_breaker::{DealBreakerFinding, check_deal_breakers};
pub use geometry::{GeometryPattern, PatternKind, detect_patterns};
pub use scorer::{DayScore, ScoreFactor, score_day};
pub use super_aspect::{
    find_cinderella_aspects, find_super_aspects, find_super_parallels, find_transcendent_links,
    is_enhancement,
};
