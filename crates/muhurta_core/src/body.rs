//! Celestial bodies and points recognized by the timing engine.
//!
//! These are the bodies the [`EphemerisPort`](crate::EphemerisPort) contract
//! must resolve. Derived chart points (Yogi Point, Part of Fortune) are NOT
//! included here — they are computed downstream from these positions.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Bodies and computed points supported by the position contract.
///
/// Rahu/Ketu are the mean lunar nodes; Ketu is always Rahu + 180°.
/// Chiron is optional in providers — callers that need it must check
/// for its presence rather than assume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Rahu,
    Ketu,
    Chiron,
}

/// All supported bodies in conventional order (Sun first, Chiron last).
pub const ALL_BODIES: [Body; 13] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::Rahu,
    Body::Ketu,
    Body::Chiron,
];

impl Body {
    /// Human-facing name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
            Self::Chiron => "Chiron",
        }
    }

    /// Table index (0 = Sun, 12 = Chiron).
    pub const fn index(self) -> usize {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mercury => 2,
            Self::Venus => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::Uranus => 7,
            Self::Neptune => 8,
            Self::Pluto => 9,
            Self::Rahu => 10,
            Self::Ketu => 11,
            Self::Chiron => 12,
        }
    }

    /// Personal planet per the deal-breaker rules: Sun, Mercury, Venus, Mars.
    pub const fn is_personal(self) -> bool {
        matches!(self, Self::Sun | Self::Mercury | Self::Venus | Self::Mars)
    }

    /// Fast mover for duration classification: Sun, Moon, Mercury, Venus.
    ///
    /// An aspect involving a fast mover is short-term; its window is days,
    /// not weeks.
    pub const fn is_fast_mover(self) -> bool {
        matches!(self, Self::Sun | Self::Moon | Self::Mercury | Self::Venus)
    }

    /// Slow mover for duration classification: Jupiter outward, nodes,
    /// Chiron. An aspect between two slow movers is long-term background.
    pub const fn is_slow_mover(self) -> bool {
        matches!(
            self,
            Self::Jupiter
                | Self::Saturn
                | Self::Uranus
                | Self::Neptune
                | Self::Pluto
                | Self::Rahu
                | Self::Ketu
                | Self::Chiron
        )
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
