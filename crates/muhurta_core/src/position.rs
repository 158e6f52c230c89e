//! Per-instant body position snapshots.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::CoreError;

/// One body's state at one instant.
///
/// Longitude is ecliptic, in [0, 360), in whatever zodiac frame the
/// producing port was configured with. Speed is longitude motion in
/// degrees per day (negative = retrograde). Ephemeral: recomputed per
/// query, never persisted as a primary entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude_deg: f64,
    pub declination_deg: f64,
    pub speed_deg_per_day: f64,
}

impl Position {
    pub fn new(longitude_deg: f64, declination_deg: f64, speed_deg_per_day: f64) -> Self {
        Self {
            longitude_deg: longitude_deg.rem_euclid(360.0),
            declination_deg,
            speed_deg_per_day,
        }
    }
}

/// A full snapshot: every available body's position at one instant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyPositions {
    positions: BTreeMap<Body, Position>,
}

impl BodyPositions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: Body, position: Position) {
        self.positions.insert(body, position);
    }

    pub fn get(&self, body: Body) -> Option<&Position> {
        self.positions.get(&body)
    }

    /// Fetch a position, failing with an ephemeris error naming the body
    /// when it is absent from the snapshot.
    pub fn require(&self, body: Body, instant: NaiveDateTime) -> Result<&Position, CoreError> {
        self.positions.get(&body).ok_or(CoreError::Ephemeris {
            body,
            instant,
            reason: "body absent from position snapshot".into(),
        })
    }

    pub fn contains(&self, body: Body) -> bool {
        self.positions.contains_key(&body)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Body, &Position)> {
        self.positions.iter().map(|(b, p)| (*b, p))
    }

    /// Bodies present, in `Body` declaration order.
    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.positions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FromIterator<(Body, Position)> for BodyPositions {
    fn from_iter<I: IntoIterator<Item = (Body, Position)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
