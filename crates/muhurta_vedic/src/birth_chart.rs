//! Birth-chart derivation: the per-person natal snapshot.
//!
//! Computed once per (birth date/time/location) from a position snapshot
//! plus the ascendant longitude, which the external ephemeris layer
//! supplies alongside positions. Cached by callers; invalidated only by
//! explicit recomputation.

use serde::{Deserialize, Serialize};

use chrono::NaiveDateTime;
use muhurta_core::{Body, BodyPositions, CoreError, normalize_deg};

use crate::lunar::moon_sun_elongation;
use crate::nakshatra::{Nakshatra, nakshatra_from_longitude};
use crate::rashi::{Rashi, rashi_from_longitude};
use crate::tithi::{TithiPosition, tithi_from_elongation};

/// Yogi point offset from Sun + Moon: 93°20'.
const YOGI_CONSTANT_DEG: f64 = 93.0 + 20.0 / 60.0;

/// Avayogi point offset from the Yogi point: 186°40'.
const AVAYOGI_OFFSET_DEG: f64 = 186.0 + 40.0 / 60.0;

/// The natal snapshot consumed by the personal classifier and the
/// micro-transit scanners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthChart {
    pub ascendant_deg: f64,
    pub lagna_sign: Rashi,
    pub moon_longitude_deg: f64,
    pub moon_sign: Rashi,
    pub moon_nakshatra: Nakshatra,
    pub birth_tithi: TithiPosition,
    pub yogi_point_deg: f64,
    pub yogi_nakshatra: Nakshatra,
    pub avayogi_point_deg: f64,
    pub avayogi_nakshatra: Nakshatra,
    pub part_of_fortune_deg: f64,
    /// Day birth: Sun above the horizon, decided from Sun vs ascendant.
    pub is_day_birth: bool,
}

/// Derive a birth chart from a natal position snapshot.
///
/// `ascendant_deg` comes from the same provider that produced the
/// positions (same frame). Part of Fortune uses the day formula
/// (Asc + Moon − Sun) for day births, the night formula (Asc + Sun −
/// Moon) otherwise; a birth is a day birth when the Sun sits in the
/// upper hemisphere, i.e. in longitude houses 7-12 from the ascendant.
pub fn compute_birth_chart(
    positions: &BodyPositions,
    ascendant_deg: f64,
    birth_instant: NaiveDateTime,
) -> Result<BirthChart, CoreError> {
    if !ascendant_deg.is_finite() {
        return Err(CoreError::InvalidInput(
            "ascendant longitude must be finite".into(),
        ));
    }
    let asc = normalize_deg(ascendant_deg);
    let sun = positions.require(Body::Sun, birth_instant)?.longitude_deg;
    let moon = positions.require(Body::Moon, birth_instant)?.longitude_deg;

    let elongation = moon_sun_elongation(positions, birth_instant)?;
    let yogi_point = normalize_deg(sun + moon + YOGI_CONSTANT_DEG);
    let avayogi_point = normalize_deg(yogi_point + AVAYOGI_OFFSET_DEG);

    // Sun 180°..360° ahead of the ascendant is above the horizon.
    let is_day_birth = normalize_deg(sun - asc) >= 180.0;
    let part_of_fortune = if is_day_birth {
        normalize_deg(asc + moon - sun)
    } else {
        normalize_deg(asc + sun - moon)
    };

    Ok(BirthChart {
        ascendant_deg: asc,
        lagna_sign: rashi_from_longitude(asc),
        moon_longitude_deg: moon,
        moon_sign: rashi_from_longitude(moon),
        moon_nakshatra: nakshatra_from_longitude(moon),
        birth_tithi: tithi_from_elongation(elongation),
        yogi_point_deg: yogi_point,
        yogi_nakshatra: nakshatra_from_longitude(yogi_point),
        avayogi_point_deg: avayogi_point,
        avayogi_nakshatra: nakshatra_from_longitude(avayogi_point),
        part_of_fortune_deg: part_of_fortune,
        is_day_birth,
    })
}

impl BirthChart {
    /// House of a transit longitude counted from the lagna, 1..=12,
    /// whole-sign system.
    pub fn house_of(&self, longitude_deg: f64) -> u8 {
        let transit_sign = rashi_from_longitude(longitude_deg).index();
        let lagna_sign = self.lagna_sign.index();
        ((12 + transit_sign - lagna_sign) % 12) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use muhurta_core::Position;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1990, 7, 15)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap()
    }

    fn natal(sun_lon: f64, moon_lon: f64) -> BodyPositions {
        [
            (Body::Sun, Position::new(sun_lon, 21.0, 0.9856)),
            (Body::Moon, Position::new(moon_lon, -5.0, 13.18)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn yogi_and_avayogi_points() {
        let chart = compute_birth_chart(&natal(80.0, 200.0), 10.0, instant()).unwrap();
        // Sun + Moon + 93°20' = 373.333 → 13.333
        assert_relative_eq!(chart.yogi_point_deg, 13.0 + 20.0 / 60.0, epsilon = 1e-9);
        assert_eq!(chart.yogi_nakshatra, Nakshatra::Ashwini);
        // + 186°40' = 200.0
        assert_relative_eq!(chart.avayogi_point_deg, 200.0, epsilon = 1e-9);
        assert_eq!(chart.avayogi_nakshatra, Nakshatra::Vishakha);
    }

    #[test]
    fn part_of_fortune_day_vs_night() {
        // Asc 10°, Sun 200°: Sun is 190° ahead → above horizon, day birth.
        let day = compute_birth_chart(&natal(200.0, 80.0), 10.0, instant()).unwrap();
        assert!(day.is_day_birth);
        assert_relative_eq!(
            day.part_of_fortune_deg,
            normalize_deg(10.0 + 80.0 - 200.0),
            epsilon = 1e-9
        );

        // Asc 10°, Sun 80°: Sun 70° ahead → below horizon, night birth.
        let night = compute_birth_chart(&natal(80.0, 200.0), 10.0, instant()).unwrap();
        assert!(!night.is_day_birth);
        assert_relative_eq!(
            night.part_of_fortune_deg,
            normalize_deg(10.0 + 80.0 - 200.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn house_counting_from_lagna() {
        let chart = compute_birth_chart(&natal(80.0, 200.0), 305.0, instant()).unwrap();
        assert_eq!(chart.lagna_sign, Rashi::Kumbha);
        // Transit in the lagna sign is house 1.
        assert_eq!(chart.house_of(310.0), 1);
        // Next sign is house 2, previous sign house 12.
        assert_eq!(chart.house_of(335.0), 2);
        assert_eq!(chart.house_of(295.0), 12);
    }

    #[test]
    fn missing_moon_is_an_ephemeris_error() {
        let thin: BodyPositions = [(Body::Sun, Position::new(80.0, 21.0, 0.98))]
            .into_iter()
            .collect();
        let err = compute_birth_chart(&thin, 10.0, instant()).unwrap_err();
        assert!(matches!(err, CoreError::Ephemeris { body: Body::Moon, .. }));
    }
}
