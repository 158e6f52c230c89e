//! Core vocabulary for the muhurta timing engine: bodies, positions,
//! reduced-circle angle math, and the ephemeris port.
//!
//! This crate provides:
//! - The [`Body`] enum covering the ten classical bodies, the lunar nodes,
//!   and Chiron
//! - [`Position`] and [`BodyPositions`], the per-instant snapshot every
//!   downstream classifier consumes
//! - The [`EphemerisPort`] trait: position computation is an external
//!   service, configured by an explicit [`EphemerisConfig`] value (never
//!   process-global state)
//! - [`FixedEphemeris`], a deterministic linear-motion fixture for tests
//!   and demos

pub mod angles;
pub mod body;
pub mod ephemeris;
pub mod error;
pub mod position;

pub use angles::{angular_distance, normalize_deg, normalize_to_pm180};
pub use body::{ALL_BODIES, Body};
pub use ephemeris::{EphemerisConfig, EphemerisPort, FixedEphemeris, GeoLocation, ZodiacFrame};
pub use error::CoreError;
pub use position::{BodyPositions, Position};
