//! Rashi (sidereal sign) lookup, sign lords, and Moon dignity.

use serde::{Deserialize, Serialize};

use muhurta_core::Body;

/// Span of one rashi: 30 degrees.
pub const RASHI_SPAN_DEG: f64 = 30.0;

/// The twelve sidereal signs from Mesha to Meena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All twelve rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::Mesha => 0,
            Self::Vrishabha => 1,
            Self::Mithuna => 2,
            Self::Karka => 3,
            Self::Simha => 4,
            Self::Kanya => 5,
            Self::Tula => 6,
            Self::Vrischika => 7,
            Self::Dhanu => 8,
            Self::Makara => 9,
            Self::Kumbha => 10,
            Self::Meena => 11,
        }
    }

    pub const fn from_index(index: u8) -> Self {
        ALL_RASHIS[(index % 12) as usize]
    }

    /// Traditional sign lord.
    pub const fn lord(self) -> Body {
        match self {
            Self::Mesha | Self::Vrischika => Body::Mars,
            Self::Vrishabha | Self::Tula => Body::Venus,
            Self::Mithuna | Self::Kanya => Body::Mercury,
            Self::Karka => Body::Moon,
            Self::Simha => Body::Sun,
            Self::Dhanu | Self::Meena => Body::Jupiter,
            Self::Makara | Self::Kumbha => Body::Saturn,
        }
    }

    /// Whether Saturn owns this sign (Makara or Kumbha).
    pub const fn is_saturn_sign(self) -> bool {
        matches!(self, Self::Makara | Self::Kumbha)
    }
}

/// Moon dignity in a sign, for the small personal-score bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoonDignity {
    Exalted,
    OwnSign,
    Debilitated,
    Ordinary,
}

impl MoonDignity {
    /// Moon is exalted in Vrishabha, owns Karka, debilitated in Vrischika.
    pub const fn of_moon_in(rashi: Rashi) -> Self {
        match rashi {
            Rashi::Vrishabha => Self::Exalted,
            Rashi::Karka => Self::OwnSign,
            Rashi::Vrischika => Self::Debilitated,
            _ => Self::Ordinary,
        }
    }
}

/// Rashi containing a sidereal longitude.
pub fn rashi_from_longitude(sidereal_deg: f64) -> Rashi {
    let lon = sidereal_deg.rem_euclid(360.0);
    Rashi::from_index((lon / RASHI_SPAN_DEG) as u8)
}
