//! Micro-transit scanning and overlap detection.
//!
//! This crate provides:
//! - [`scan`]: minute-resolution in-orb window detection for a moving
//!   body against fixed target angles
//! - The static scanner registry: natal point, Yogi point, Avayogi
//!   point, Part of Fortune
//! - [`detect`]: automation moments where favorable bird periods and
//!   transit windows intersect

pub mod error;
pub mod overlap;
pub mod registry;
pub mod scan;

pub use error::TransitError;
pub use overlap::{AutomationMoment, detect};
pub use registry::{SCANNERS, Scanner, all_targets, scanner};
pub use scan::{MicroTransitEvent, ScanConfig, TransitTarget, scan};
