//! Nakshatra (lunar mansion) lookup, guna buckets, and tara positions.
//!
//! The ecliptic is divided into 27 equal nakshatras of 13°20' each.
//! The guna table partitions them into benefic/malefic/neutral buckets
//! for the Vedic day classifier; the nine-fold tara cycle positions a
//! transit nakshatra relative to a natal one for personal scoring.

use serde::{Deserialize, Serialize};

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_DEG: f64 = 360.0 / 27.0;

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

/// Guna bucket for the Vedic classifier: a fixed 27-entry partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NakshatraGuna {
    Benefic,
    Malefic,
    Neutral,
}

impl Nakshatra {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    pub fn index(self) -> u8 {
        ALL_NAKSHATRAS.iter().position(|&n| n == self).unwrap_or(0) as u8
    }

    pub const fn from_index(index: u8) -> Self {
        ALL_NAKSHATRAS[(index % 27) as usize]
    }

    /// Fixed guna bucket.
    pub const fn guna(self) -> NakshatraGuna {
        match self {
            Self::Bharani
            | Self::Krittika
            | Self::Ardra
            | Self::Ashlesha
            | Self::Magha
            | Self::Jyeshtha
            | Self::Mula => NakshatraGuna::Malefic,
            Self::Ashwini
            | Self::PurvaPhalguni
            | Self::Vishakha
            | Self::PurvaAshadha
            | Self::Shatabhisha
            | Self::PurvaBhadrapada => NakshatraGuna::Neutral,
            _ => NakshatraGuna::Benefic,
        }
    }
}

/// The nine-fold tara cycle position of a transit nakshatra counted from
/// a natal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tara {
    Janma,
    Sampat,
    Vipat,
    Kshema,
    Pratyak,
    Sadhana,
    Naidhana,
    Mitra,
    ParamaMitra,
}

const TARA_CYCLE: [Tara; 9] = [
    Tara::Janma,
    Tara::Sampat,
    Tara::Vipat,
    Tara::Kshema,
    Tara::Pratyak,
    Tara::Sadhana,
    Tara::Naidhana,
    Tara::Mitra,
    Tara::ParamaMitra,
];

/// Tara position of `transit` counted from `natal` (inclusive count mod 9).
pub fn tara_position(natal: Nakshatra, transit: Nakshatra) -> Tara {
    let offset = (27 + transit.index() as i32 - natal.index() as i32) % 27;
    TARA_CYCLE[(offset % 9) as usize]
}

/// Nakshatra containing a sidereal longitude.
pub fn nakshatra_from_longitude(sidereal_deg: f64) -> Nakshatra {
    let lon = sidereal_deg.rem_euclid(360.0);
    Nakshatra::from_index((lon / NAKSHATRA_SPAN_DEG) as u8)
}
