//! Personal transit scoring: the day's sky measured against one natal
//! chart.
//!
//! Contributions are summed from fixed tables (Moon house from lagna,
//! Yogi/Avayogi nakshatra hits, tithi category, tara position, Moon
//! dignity) plus two binary-threshold malefic penalties (transiting
//! Saturn and Mars against the natal Moon). The quality mapping forces
//! houses 6 and 12 to "aware"; the 8th house is not forced and falls
//! through the score thresholds, which lands it on "avoid" for typical
//! scores.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use muhurta_aspects::ScoreFactor;
use muhurta_core::{Body, BodyPositions, EphemerisPort, GeoLocation, angular_distance, normalize_deg};
use muhurta_vedic::{
    BirthChart, MoonDignity, Tara, TithiCategory, moon_sun_elongation, nakshatra_from_longitude,
    rashi_from_longitude, tara_position, tithi_from_elongation,
};

use crate::error::ClassifyError;
use crate::result::{ClassificationResult, DayClassifier};

/// Moon-house weights, index = house − 1.
const HOUSE_SCORES: [f64; 12] = [
    1.0, 1.5, 2.0, 1.0, 2.5, -2.0, 1.5, -2.5, 3.0, 2.0, 3.0, -2.0,
];

/// Houses whose quality is pinned regardless of score.
const AWARE_HOUSES: [u8; 2] = [6, 12];

const YOGI_BONUS: f64 = 1.0;
const AVAYOGI_PENALTY: f64 = -1.0;

const POWER_THRESHOLD: f64 = 6.0;
const SUPPORTIVE_THRESHOLD: f64 = 2.0;
const NEUTRAL_FLOOR: f64 = -1.0;

/// Clash angles checked for the malefic penalties.
const CLASH_ANGLES: [f64; 3] = [0.0, 90.0, 180.0];

const TIGHT_MALEFIC_ORB: f64 = 1.0;
const WIDE_MALEFIC_ORB: f64 = 3.0;

/// Quality buckets for a personal day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalQuality {
    Power,
    Supportive,
    Neutral,
    Aware,
    Avoid,
}

impl PersonalQuality {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Supportive => "supportive",
            Self::Neutral => "neutral",
            Self::Aware => "aware",
            Self::Avoid => "avoid",
        }
    }
}

impl Display for PersonalQuality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const fn tithi_category_score(category: TithiCategory) -> f64 {
    match category {
        TithiCategory::Poorna => 3.0,
        TithiCategory::Nanda => 2.0,
        TithiCategory::Bhadra => 1.5,
        TithiCategory::Jaya => 1.0,
        TithiCategory::Rikta => -2.0,
        TithiCategory::Amavasya => -3.0,
    }
}

/// Tara contribution: natal return +3, excellent +2, good +1,
/// challenging −3.
const fn tara_score(tara: Tara) -> f64 {
    match tara {
        Tara::Janma => 3.0,
        Tara::Sampat | Tara::Kshema | Tara::Sadhana => 2.0,
        Tara::Mitra | Tara::ParamaMitra => 1.0,
        Tara::Vipat | Tara::Pratyak | Tara::Naidhana => -3.0,
    }
}

const fn dignity_score(dignity: MoonDignity) -> f64 {
    match dignity {
        MoonDignity::Exalted => 0.5,
        MoonDignity::OwnSign => 0.3,
        MoonDignity::Debilitated => -0.5,
        MoonDignity::Ordinary => 0.0,
    }
}

/// Closest orb of `separation` to any clash angle.
fn clash_orb(separation_deg: f64) -> f64 {
    CLASH_ANGLES
        .iter()
        .map(|&angle| (separation_deg - angle).abs())
        .fold(f64::INFINITY, f64::min)
}

fn malefic_penalty(orb: f64, tight: f64, wide: f64) -> f64 {
    if orb <= TIGHT_MALEFIC_ORB {
        tight
    } else if orb <= WIDE_MALEFIC_ORB {
        wide
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One day scored against a natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalDayScore {
    pub score: f64,
    pub quality: PersonalQuality,
    pub moon_house: u8,
    pub factors: Vec<ScoreFactor>,
}

/// Sum the personal transit contributions for one day's positions.
pub fn score_personal_day(
    chart: &BirthChart,
    transits: &BodyPositions,
    instant: chrono::NaiveDateTime,
) -> Result<PersonalDayScore, ClassifyError> {
    let moon = transits.require(Body::Moon, instant)?;
    let saturn = transits.require(Body::Saturn, instant)?;
    let mars = transits.require(Body::Mars, instant)?;

    let mut factors: Vec<ScoreFactor> = Vec::new();
    let mut push = |label: String, contribution: f64| {
        if contribution != 0.0 {
            factors.push(ScoreFactor {
                label,
                contribution,
            });
        }
    };

    let moon_house = chart.house_of(moon.longitude_deg);
    push(
        format!("Moon in house {moon_house}"),
        HOUSE_SCORES[(moon_house - 1) as usize],
    );

    let transit_nakshatra = nakshatra_from_longitude(moon.longitude_deg);
    if transit_nakshatra == chart.yogi_nakshatra {
        push(
            format!("Moon on Yogi nakshatra {}", transit_nakshatra.name()),
            YOGI_BONUS,
        );
    }
    if transit_nakshatra == chart.avayogi_nakshatra {
        push(
            format!("Moon on Avayogi nakshatra {}", transit_nakshatra.name()),
            AVAYOGI_PENALTY,
        );
    }

    let tithi = tithi_from_elongation(moon_sun_elongation(transits, instant)?);
    push(
        format!("{} tithi {}", tithi.category.name(), tithi.number),
        tithi_category_score(tithi.category),
    );

    let tara = tara_position(chart.moon_nakshatra, transit_nakshatra);
    push(
        format!("{} is {tara:?} tara", transit_nakshatra.name()),
        tara_score(tara),
    );

    let dignity = MoonDignity::of_moon_in(rashi_from_longitude(moon.longitude_deg));
    push(format!("Moon dignity {dignity:?}"), dignity_score(dignity));

    let natal_moon = normalize_deg(chart.moon_longitude_deg);
    let saturn_orb = clash_orb(angular_distance(saturn.longitude_deg, natal_moon));
    push(
        format!("Saturn clash to natal Moon, orb {saturn_orb:.2}"),
        malefic_penalty(saturn_orb, -2.0, -1.0),
    );
    let mars_orb = clash_orb(angular_distance(mars.longitude_deg, natal_moon));
    push(
        format!("Mars clash to natal Moon, orb {mars_orb:.2}"),
        malefic_penalty(mars_orb, -1.5, -0.75),
    );

    let score = round2(factors.iter().map(|f| f.contribution).sum());

    let quality = if AWARE_HOUSES.contains(&moon_house) {
        PersonalQuality::Aware
    } else if score >= POWER_THRESHOLD {
        PersonalQuality::Power
    } else if score >= SUPPORTIVE_THRESHOLD {
        PersonalQuality::Supportive
    } else if score > NEUTRAL_FLOOR {
        PersonalQuality::Neutral
    } else {
        PersonalQuality::Avoid
    };

    Ok(PersonalDayScore {
        score,
        quality,
        moon_house,
        factors,
    })
}

/// Per-user configuration: the cached natal chart.
#[derive(Debug, Clone)]
pub struct PersonalConfig {
    pub chart: BirthChart,
}

/// Date-driven personal classification against an ephemeris port.
pub struct PersonalClassifier<'a, P: EphemerisPort> {
    port: &'a P,
    location: GeoLocation,
    config: PersonalConfig,
}

impl<'a, P: EphemerisPort> PersonalClassifier<'a, P> {
    pub fn new(port: &'a P, location: GeoLocation, config: PersonalConfig) -> Self {
        Self {
            port,
            location,
            config,
        }
    }
}

impl<P: EphemerisPort> DayClassifier for PersonalClassifier<'_, P> {
    type Label = PersonalQuality;

    fn system_name(&self) -> &'static str {
        "personal"
    }

    fn classify(
        &self,
        date: NaiveDate,
    ) -> Result<ClassificationResult<PersonalQuality>, ClassifyError> {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| muhurta_core::CoreError::InvalidInput("invalid date".into()))?;
        let transits = self.port.positions(noon, &self.location)?;
        let day = score_personal_day(&self.config.chart, &transits, noon)?;
        let reason = day
            .factors
            .iter()
            .max_by(|a, b| a.contribution.abs().total_cmp(&b.contribution.abs()))
            .map(|f| f.label.clone())
            .unwrap_or_else(|| "no active factors".to_string());
        Ok(
            ClassificationResult::new(date, day.quality, day.score, reason)
                .with_detail("moon_house", json!(day.moon_house))
                .with_detail("factors", serde_json::to_value(&day.factors).unwrap_or_default()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime};
    use muhurta_core::Position;
    use muhurta_vedic::{Nakshatra, compute_birth_chart};

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn natal_positions(sun: f64, moon: f64) -> BodyPositions {
        [
            (Body::Sun, Position::new(sun, 0.0, 0.9856)),
            (Body::Moon, Position::new(moon, 0.0, 13.18)),
        ]
        .into_iter()
        .collect()
    }

    // Lagna Mesha (asc 10°), natal Moon 95° (Karka, Pushya).
    fn chart() -> BirthChart {
        compute_birth_chart(&natal_positions(200.0, 95.0), 10.0, instant()).unwrap()
    }

    fn transits(moon: f64, sun: f64, saturn: f64, mars: f64) -> BodyPositions {
        [
            (Body::Sun, Position::new(sun, 0.0, 0.9856)),
            (Body::Moon, Position::new(moon, 0.0, 13.18)),
            (Body::Saturn, Position::new(saturn, 0.0, 0.03)),
            (Body::Mars, Position::new(mars, 0.0, 0.5)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn house_tara_and_tithi_contributions_sum_to_supportive() {
        // Moon 99° from Mesha lagna: Karka, house 4 (+1.0), own sign
        // (+0.3), Pushya return so Janma tara (+3.0). Sun 309° gives
        // elongation 150°, tithi 13, Jaya (+1.0). Saturn 200° and Mars
        // 10° are both well outside clash orb of natal Moon 95°.
        let day = score_personal_day(&chart(), &transits(99.0, 309.0, 200.0, 10.0), instant())
            .unwrap();
        assert_relative_eq!(day.score, 5.3, epsilon = 1e-9);
        assert_eq!(day.quality, PersonalQuality::Supportive);
        assert_eq!(day.moon_house, 4);
    }

    #[test]
    fn sixth_house_forces_aware_even_with_good_score() {
        // Moon 160° = Kanya = house 6 from Mesha lagna.
        let day = score_personal_day(&chart(), &transits(160.0, 20.0, 250.0, 300.0), instant())
            .unwrap();
        assert_eq!(day.moon_house, 6);
        assert_eq!(day.quality, PersonalQuality::Aware);
    }

    #[test]
    fn eighth_house_falls_through_to_avoid() {
        // Moon 220° = Vrischika = house 8 (−2.5), debilitated (−0.5),
        // in Anuradha: tara offset 9 wraps to Janma (+3.0) and Anuradha
        // is this chart's Avayogi nakshatra (−1.0). Sun 320° gives
        // elongation 260°, tithi 22, Bhadra (+1.5). Net +0.5 without
        // malefics.
        let day = score_personal_day(&chart(), &transits(220.0, 320.0, 10.0, 10.0), instant())
            .unwrap();
        assert_eq!(day.moon_house, 8);
        assert_relative_eq!(day.score, 0.5, epsilon = 1e-9);
        // Saturn 186° squares natal Moon 95° at orb 1.0 (−2.0). The
        // 8th house is not pinned like 6 and 12: −1.5 lands on Avoid.
        let day = score_personal_day(&chart(), &transits(220.0, 320.0, 186.0, 10.0), instant())
            .unwrap();
        assert_relative_eq!(day.score, -1.5, epsilon = 1e-9);
        assert_eq!(day.quality, PersonalQuality::Avoid);
    }

    #[test]
    fn yogi_nakshatra_hit_adds_bonus() {
        let c = chart();
        // Natal Sun 200 + Moon 95 + 93°20' = 388°20' → 28.33° → Krittika
        // starts at 26.67°, so yogi nakshatra is Krittika.
        assert_eq!(c.yogi_nakshatra, Nakshatra::Krittika);
        // Transit Moon 30° sits in Krittika.
        let day = score_personal_day(&c, &transits(30.0, 250.0, 300.0, 200.0), instant()).unwrap();
        assert!(
            day.factors
                .iter()
                .any(|f| f.label.contains("Yogi") && f.contribution == YOGI_BONUS)
        );
    }

    #[test]
    fn malefic_penalties_respect_both_thresholds() {
        assert_relative_eq!(malefic_penalty(0.4, -2.0, -1.0), -2.0);
        assert_relative_eq!(malefic_penalty(2.2, -2.0, -1.0), -1.0);
        assert_relative_eq!(malefic_penalty(3.5, -2.0, -1.0), 0.0);
        // Orb folds over conjunction, square, opposition.
        assert_relative_eq!(clash_orb(0.7), 0.7);
        assert_relative_eq!(clash_orb(91.5), 1.5);
        assert_relative_eq!(clash_orb(178.0), 2.0);
        assert_relative_eq!(clash_orb(45.0), 45.0);
    }
}
