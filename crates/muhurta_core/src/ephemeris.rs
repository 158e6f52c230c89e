//! The ephemeris port: position computation as an external service.
//!
//! Orbital mechanics is out of scope. The engine consumes positions
//! through [`EphemerisPort`] and treats the provider as a black box.
//! Configuration is an explicit [`EphemerisConfig`] value passed at
//! construction — classifier logic never mutates process-global
//! ephemeris state.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::CoreError;
use crate::position::{BodyPositions, Position};

/// Zodiac reference frame for longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZodiacFrame {
    Tropical,
    /// Sidereal, Lahiri ayanamsa.
    #[default]
    SiderealLahiri,
}

impl ZodiacFrame {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tropical => "tropical",
            Self::SiderealLahiri => "sidereal (Lahiri)",
        }
    }
}

/// Observer location on Earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, CoreError> {
        let location = Self {
            latitude_deg,
            longitude_deg,
        };
        location.validate()?;
        Ok(location)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(CoreError::InvalidLocation(
                "latitude must be within [-90, 90]",
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(CoreError::InvalidLocation(
                "longitude must be within [-180, 180]",
            ));
        }
        Ok(())
    }
}

/// Provider configuration fixed at construction time.
///
/// `require_chiron` makes a missing Chiron position a hard error instead
/// of a silently thinner snapshot; the PTI rule set wants it, the Vedic
/// one does not care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EphemerisConfig {
    pub frame: ZodiacFrame,
    pub require_chiron: bool,
}

/// The external position service.
///
/// Implementations must be pure: the same (instant, location) pair always
/// yields the same snapshot. Frame is fixed by the provider's config, not
/// per call, so two classifiers sharing a port see consistent longitudes.
pub trait EphemerisPort {
    /// Provider configuration, fixed at construction.
    fn config(&self) -> &EphemerisConfig;

    /// Position snapshot for all available bodies at one instant.
    fn positions(
        &self,
        instant: NaiveDateTime,
        location: &GeoLocation,
    ) -> Result<BodyPositions, CoreError>;
}

/// Deterministic linear-motion provider for tests and demos.
///
/// Each body advances from its epoch longitude at a constant rate;
/// declination is held fixed. Not an ephemeris: correctness of the real
/// sky is explicitly not claimed.
#[derive(Debug, Clone)]
pub struct FixedEphemeris {
    config: EphemerisConfig,
    epoch: NaiveDateTime,
    base: BodyPositions,
}

impl FixedEphemeris {
    pub fn new(config: EphemerisConfig, epoch: NaiveDateTime) -> Self {
        Self {
            config,
            epoch,
            base: BodyPositions::new(),
        }
    }

    /// Insert a body's epoch state. Builder-style.
    pub fn with_body(mut self, body: Body, position: Position) -> Self {
        self.base.insert(body, position);
        self
    }

    /// A thirteen-body snapshot with approximate mean daily motions,
    /// spread around the zodiac. Good enough to exercise every rule path.
    pub fn demo(epoch: NaiveDateTime) -> Self {
        let rates: [(Body, f64, f64, f64); 13] = [
            (Body::Sun, 280.0, -23.0, 0.9856),
            (Body::Moon, 95.0, 18.0, 13.1764),
            (Body::Mercury, 271.0, -24.0, 1.383),
            (Body::Venus, 325.0, -15.0, 1.2),
            (Body::Mars, 140.0, 20.0, 0.524),
            (Body::Jupiter, 65.0, 22.0, 0.083),
            (Body::Saturn, 345.0, -9.0, 0.034),
            (Body::Uranus, 53.0, 18.0, 0.012),
            (Body::Neptune, 357.0, -2.0, 0.006),
            (Body::Pluto, 301.0, -23.0, 0.004),
            (Body::Rahu, 5.0, 0.0, -0.053),
            (Body::Ketu, 185.0, 0.0, -0.053),
            (Body::Chiron, 19.0, 5.0, 0.018),
        ];
        let mut eph = Self::new(EphemerisConfig::default(), epoch);
        for (body, lon, dec, speed) in rates {
            eph.base.insert(body, Position::new(lon, dec, speed));
        }
        eph
    }
}

impl EphemerisPort for FixedEphemeris {
    fn config(&self) -> &EphemerisConfig {
        &self.config
    }

    fn positions(
        &self,
        instant: NaiveDateTime,
        location: &GeoLocation,
    ) -> Result<BodyPositions, CoreError> {
        location.validate()?;
        if self.config.require_chiron && !self.base.contains(Body::Chiron) {
            return Err(CoreError::Ephemeris {
                body: Body::Chiron,
                instant,
                reason: "provider configured to require Chiron but none loaded".into(),
            });
        }
        let days = (instant - self.epoch).num_seconds() as f64 / 86_400.0;
        Ok(self
            .base
            .iter()
            .map(|(body, p)| {
                let lon = (p.longitude_deg + p.speed_deg_per_day * days).rem_euclid(360.0);
                (body, Position::new(lon, p.declination_deg, p.speed_deg_per_day))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn greenwich() -> GeoLocation {
        GeoLocation::new(51.48, 0.0).unwrap()
    }

    #[test]
    fn location_validation_rejects_out_of_range() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
        assert!(GeoLocation::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn linear_motion_advances_longitude() {
        let eph = FixedEphemeris::demo(epoch());
        let later = epoch() + chrono::Duration::days(10);
        let now = eph.positions(epoch(), &greenwich()).unwrap();
        let then = eph.positions(later, &greenwich()).unwrap();
        let sun0 = now.get(Body::Sun).unwrap().longitude_deg;
        let sun1 = then.get(Body::Sun).unwrap().longitude_deg;
        assert_relative_eq!(
            (sun1 - sun0).rem_euclid(360.0),
            0.9856 * 10.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn positions_are_deterministic() {
        let eph = FixedEphemeris::demo(epoch());
        let instant = epoch() + chrono::Duration::hours(37);
        let a = eph.positions(instant, &greenwich()).unwrap();
        let b = eph.positions(instant, &greenwich()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn require_chiron_fails_without_chiron() {
        let config = EphemerisConfig {
            require_chiron: true,
            ..EphemerisConfig::default()
        };
        let eph = FixedEphemeris::new(config, epoch())
            .with_body(Body::Sun, Position::new(0.0, 0.0, 1.0));
        assert!(eph.positions(epoch(), &greenwich()).is_err());
    }
}
