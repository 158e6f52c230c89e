//! Panch Pakshi bird periods.
//!
//! Each person is assigned one of five birds from the birth Moon
//! nakshatra and birth paksha. Every day splits into five day periods
//! (06:00 to 18:00) and five night periods (18:00 to 06:00); in each
//! period one bird rules, and every bird holds exactly one of the five
//! activities. The leading bird rotates with the weekday, forward
//! through the bird order in Shukla paksha and backward in Krishna,
//! with the night lead offset from the day lead.
//!
//! Favorable windows (the birth bird ruling or eating) are the input
//! to overlap detection against micro-transit events.

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;

use muhurta_core::{EphemerisPort, GeoLocation};
use muhurta_vedic::{BirthChart, Nakshatra, Paksha, moon_sun_elongation, tithi_from_elongation};

use crate::error::ClassifyError;
use crate::result::{ClassificationResult, DayClassifier};

/// The five birds, in canonical Shukla order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bird {
    Vulture,
    Owl,
    Crow,
    Cock,
    Peacock,
}

pub const BIRD_ORDER: [Bird; 5] = [
    Bird::Vulture,
    Bird::Owl,
    Bird::Crow,
    Bird::Cock,
    Bird::Peacock,
];

impl Bird {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vulture => "Vulture",
            Self::Owl => "Owl",
            Self::Crow => "Crow",
            Self::Cock => "Cock",
            Self::Peacock => "Peacock",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Vulture => 0,
            Self::Owl => 1,
            Self::Crow => 2,
            Self::Cock => 3,
            Self::Peacock => 4,
        }
    }
}

impl Display for Bird {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a bird is doing in one period. Rule is strongest, Die weakest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BirdActivity {
    Rule,
    Eat,
    Walk,
    Sleep,
    Die,
}

/// Activity held by the bird at each offset from the period's lead.
const ACTIVITY_CYCLE: [BirdActivity; 5] = [
    BirdActivity::Rule,
    BirdActivity::Eat,
    BirdActivity::Walk,
    BirdActivity::Sleep,
    BirdActivity::Die,
];

impl BirdActivity {
    pub const fn is_favorable(self) -> bool {
        matches!(self, Self::Rule | Self::Eat)
    }

    pub const fn quality(self) -> BirdClass {
        match self {
            Self::Rule => BirdClass::Excellent,
            Self::Eat => BirdClass::Good,
            Self::Walk => BirdClass::Neutral,
            Self::Sleep => BirdClass::Caution,
            Self::Die => BirdClass::Avoid,
        }
    }

    pub const fn score(self) -> f64 {
        match self {
            Self::Rule => 3.0,
            Self::Eat => 2.0,
            Self::Walk => 0.0,
            Self::Sleep => -1.0,
            Self::Die => -3.0,
        }
    }
}

/// Quality tier of a period for the birth bird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BirdClass {
    Excellent,
    Good,
    Neutral,
    Caution,
    Avoid,
}

impl BirdClass {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Bird Excellent",
            Self::Good => "Bird Good",
            Self::Neutral => "Bird Neutral",
            Self::Caution => "Bird Caution",
            Self::Avoid => "Bird Avoid",
        }
    }
}

impl Display for BirdClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Birth bird from the birth Moon nakshatra and birth paksha.
///
/// The 27 nakshatras split into five contiguous bands; Krishna paksha
/// reverses the band-to-bird mapping.
pub fn birth_bird(moon_nakshatra: Nakshatra, paksha: Paksha) -> Bird {
    let band = (moon_nakshatra.index() as usize * 5) / 27; // 0..=4
    match paksha {
        Paksha::Shukla => BIRD_ORDER[band],
        Paksha::Krishna => BIRD_ORDER[4 - band],
    }
}

/// One scheduled period for a specific birth bird.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdPeriod {
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    /// Exclusive; night periods run past midnight into the next day.
    pub end: NaiveDateTime,
    pub bird: Bird,
    pub activity: BirdActivity,
    pub is_day: bool,
}

impl BirdPeriod {
    pub fn is_favorable(&self) -> bool {
        self.activity.is_favorable()
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Period boundaries. Fixed clock halves; sunrise-anchored schedules
/// are a caller-side adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirdScheduleConfig {
    pub day_start: NaiveTime,
    pub night_start: NaiveTime,
}

impl Default for BirdScheduleConfig {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::MIN + Duration::hours(6),
            night_start: NaiveTime::MIN + Duration::hours(18),
        }
    }
}

/// Lead bird of the first day period for a weekday.
fn day_lead(weekday: usize, paksha: Paksha) -> usize {
    match paksha {
        Paksha::Shukla => weekday % 5,
        Paksha::Krishna => (5 - weekday % 5) % 5,
    }
}

/// Activity of `bird` in the period led by `lead`. Krishna runs the
/// rotation backward.
fn activity_of(bird: Bird, lead: usize, paksha: Paksha) -> BirdActivity {
    let offset = match paksha {
        Paksha::Shukla => (bird.index() + 5 - lead) % 5,
        Paksha::Krishna => (lead + 5 - bird.index()) % 5,
    };
    ACTIVITY_CYCLE[offset]
}

/// The ten periods of one date for a birth bird: five day, five night.
pub fn bird_periods_for_date(
    bird: Bird,
    date: NaiveDate,
    paksha: Paksha,
    config: &BirdScheduleConfig,
) -> Vec<BirdPeriod> {
    let weekday = date.weekday().num_days_from_sunday() as usize;
    let lead0 = day_lead(weekday, paksha);
    // Night lead picks up two birds past the day lead.
    let night_lead0 = (lead0 + 2) % 5;

    let day_span = date.and_time(config.night_start) - date.and_time(config.day_start);
    let night_span = Duration::hours(24) - day_span;
    let day_step = day_span / 5;
    let night_step = night_span / 5;

    let mut periods = Vec::with_capacity(10);
    for slot in 0..5usize {
        let start = date.and_time(config.day_start) + day_step * slot as i32;
        let lead = (lead0 + slot) % 5;
        periods.push(BirdPeriod {
            date,
            start,
            end: start + day_step,
            bird,
            activity: activity_of(bird, lead, paksha),
            is_day: true,
        });
    }
    for slot in 0..5usize {
        let start = date.and_time(config.night_start) + night_step * slot as i32;
        let lead = (night_lead0 + slot) % 5;
        periods.push(BirdPeriod {
            date,
            start,
            end: start + night_step,
            bird,
            activity: activity_of(bird, lead, paksha),
            is_day: false,
        });
    }
    periods
}

/// Per-user bird configuration, derived once from the birth chart.
#[derive(Debug, Clone)]
pub struct BirdConfig {
    pub bird: Bird,
    pub schedule: BirdScheduleConfig,
}

impl BirdConfig {
    pub fn from_chart(chart: &BirthChart) -> Self {
        Self {
            bird: birth_bird(chart.moon_nakshatra, chart.birth_tithi.paksha),
            schedule: BirdScheduleConfig::default(),
        }
    }
}

/// Date-driven bird classification: the day's label is the birth
/// bird's activity in the period containing local noon, with the full
/// schedule in the details.
pub struct BirdClassifier<'a, P: EphemerisPort> {
    port: &'a P,
    location: GeoLocation,
    config: BirdConfig,
}

impl<'a, P: EphemerisPort> BirdClassifier<'a, P> {
    pub fn new(port: &'a P, location: GeoLocation, config: BirdConfig) -> Self {
        Self {
            port,
            location,
            config,
        }
    }

    /// The date's full schedule, paksha taken from the day's Moon.
    pub fn schedule(&self, date: NaiveDate) -> Result<Vec<BirdPeriod>, ClassifyError> {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| muhurta_core::CoreError::InvalidInput("invalid date".into()))?;
        let positions = self.port.positions(noon, &self.location)?;
        let tithi = tithi_from_elongation(moon_sun_elongation(&positions, noon)?);
        Ok(bird_periods_for_date(
            self.config.bird,
            date,
            tithi.paksha,
            &self.config.schedule,
        ))
    }
}

impl<P: EphemerisPort> DayClassifier for BirdClassifier<'_, P> {
    type Label = BirdClass;

    fn system_name(&self) -> &'static str {
        "birds"
    }

    fn classify(&self, date: NaiveDate) -> Result<ClassificationResult<BirdClass>, ClassifyError> {
        let periods = self.schedule(date)?;
        let noon = date
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| muhurta_core::CoreError::InvalidInput("invalid date".into()))?;
        let current = periods
            .iter()
            .find(|p| p.contains(noon))
            .ok_or_else(|| {
                muhurta_core::CoreError::InvalidInput("midday outside bird schedule".into())
            })?;

        let favorable: Vec<&BirdPeriod> = periods.iter().filter(|p| p.is_favorable()).collect();
        let reason = format!(
            "{} {:?}s at midday",
            self.config.bird.name(),
            current.activity
        );
        Ok(
            ClassificationResult::new(date, current.activity.quality(), current.activity.score(), reason)
                .with_detail("bird", json!(self.config.bird.name()))
                .with_detail(
                    "favorable_windows",
                    json!(
                        favorable
                            .iter()
                            .map(|p| {
                                json!({
                                    "start": p.start.format("%Y-%m-%dT%H:%M").to_string(),
                                    "end": p.end.format("%Y-%m-%dT%H:%M").to_string(),
                                })
                            })
                            .collect::<Vec<_>>()
                    ),
                )
                .with_detail("schedule", serde_json::to_value(&periods).unwrap_or_default()),
        )
    }
}
