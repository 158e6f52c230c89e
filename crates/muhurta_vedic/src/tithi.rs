//! Tithi (lunar day) determination from Moon-Sun elongation.
//!
//! Tithi = which of 30 segments of 12° the elongation falls in, numbered
//! 1..=30. Tithis 1-15 are Shukla (waxing) paksha, 16-30 Krishna
//! (waning); tithi 15 is Purnima (full moon), tithi 30 Amavasya (new
//! moon). The five-fold category cycles Nanda/Bhadra/Jaya/Rikta/Poorna
//! within each paksha.

use serde::{Deserialize, Serialize};

/// Elongation span of one tithi: 12 degrees.
pub const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paksha {
    Shukla,
    Krishna,
}

impl Paksha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }
}

/// Five-fold tithi category, with Amavasya split out because the
/// personal score table treats it separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TithiCategory {
    Nanda,
    Bhadra,
    Jaya,
    Rikta,
    Poorna,
    Amavasya,
}

impl TithiCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nanda => "Nanda",
            Self::Bhadra => "Bhadra",
            Self::Jaya => "Jaya",
            Self::Rikta => "Rikta",
            Self::Poorna => "Poorna",
            Self::Amavasya => "Amavasya",
        }
    }
}

/// The tithi at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TithiPosition {
    /// 1..=30.
    pub number: u8,
    pub paksha: Paksha,
    /// 1..=15 within the paksha.
    pub number_in_paksha: u8,
    pub category: TithiCategory,
}

impl TithiPosition {
    /// Full moon tithi (Purnima, 15).
    pub const fn is_purnima(&self) -> bool {
        self.number == 15
    }

    /// New moon tithi (Amavasya, 30).
    pub const fn is_amavasya(&self) -> bool {
        self.number == 30
    }
}

/// Tithi containing a Moon-Sun elongation in degrees.
pub fn tithi_from_elongation(elongation_deg: f64) -> TithiPosition {
    let elong = elongation_deg.rem_euclid(360.0);
    let index = ((elong / TITHI_SEGMENT_DEG) as u8).min(29); // 0..=29
    let number = index + 1;
    let (paksha, number_in_paksha) = if number <= 15 {
        (Paksha::Shukla, number)
    } else {
        (Paksha::Krishna, number - 15)
    };
    let category = if number == 30 {
        TithiCategory::Amavasya
    } else {
        // Nanda/Bhadra/Jaya/Rikta/Poorna cycle by position in paksha.
        match (number_in_paksha - 1) % 5 {
            0 => TithiCategory::Nanda,
            1 => TithiCategory::Bhadra,
            2 => TithiCategory::Jaya,
            3 => TithiCategory::Rikta,
            _ => TithiCategory::Poorna,
        }
    };
    TithiPosition {
        number,
        paksha,
        number_in_paksha,
        category,
    }
}
