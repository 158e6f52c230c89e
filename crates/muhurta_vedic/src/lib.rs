//! Sidereal base tables and birth-chart derivation.
//!
//! This crate provides:
//! - [`Rashi`]: the twelve signs with lords and Moon dignity
//! - [`Nakshatra`]: the 27 lunar mansions, their guna buckets, and the
//!   nine-fold tara position used in personal transit scoring
//! - Tithi determination from Moon-Sun elongation, with the five-fold
//!   tithi category
//! - Lunar illumination (cos-based phase percentage)
//! - [`BirthChart`]: the per-person natal snapshot (lagna, Moon sign and
//!   nakshatra, Yogi/Avayogi points, Part of Fortune), computed once per
//!   birth data and cached by callers

pub mod birth_chart;
pub mod lunar;
pub mod nakshatra;
pub mod rashi;
pub mod tithi;

pub use birth_chart::{BirthChart, compute_birth_chart};
pub use lunar::{illumination_percent, moon_sun_elongation};
pub use nakshatra::{
    ALL_NAKSHATRAS, NAKSHATRA_SPAN_DEG, Nakshatra, NakshatraGuna, Tara, nakshatra_from_longitude,
    tara_position,
};
pub use rashi::{RASHI_SPAN_DEG, MoonDignity, Rashi, rashi_from_longitude};
pub use tithi::{TITHI_SEGMENT_DEG, Paksha, TithiCategory, TithiPosition, tithi_from_elongation};
