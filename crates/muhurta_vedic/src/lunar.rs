//! Lunar phase arithmetic: elongation and illumination.

use chrono::NaiveDateTime;

use muhurta_core::{Body, BodyPositions, CoreError, normalize_deg};

/// Moon-Sun elongation in degrees [0, 360).
pub fn moon_sun_elongation(
    positions: &BodyPositions,
    instant: NaiveDateTime,
) -> Result<f64, CoreError> {
    let moon = positions.require(Body::Moon, instant)?;
    let sun = positions.require(Body::Sun, instant)?;
    Ok(normalize_deg(moon.longitude_deg - sun.longitude_deg))
}

/// Illuminated fraction of the lunar disc as a percentage.
///
/// Cos-based phase model: 0% at new moon, 100% at full.
pub fn illumination_percent(elongation_deg: f64) -> f64 {
    (1.0 - elongation_deg.to_radians().cos()) / 2.0 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn illumination_extremes() {
        assert_relative_eq!(illumination_percent(0.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(illumination_percent(180.0), 100.0, epsilon = 1e-9);
        assert_relative_eq!(illumination_percent(90.0), 50.0, epsilon = 1e-9);
        assert_relative_eq!(illumination_percent(270.0), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn illumination_is_symmetric_about_full() {
        assert_relative_eq!(
            illumination_percent(120.0),
            illumination_percent(240.0),
            epsilon = 1e-9
        );
    }
}
