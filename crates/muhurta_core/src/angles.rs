//! Reduced-circle angle arithmetic.
//!
//! Every orb computation in the engine goes through [`angular_distance`]:
//! the separation of two ecliptic longitudes reduced to [0, 180]. Raw
//! differences are never compared against orbs anywhere downstream.

/// Normalize an angle to [0, 360).
pub fn normalize_deg(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Normalize an angle to (-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Angular distance between two longitudes on the reduced circle.
///
/// Symmetric in its arguments; result is in [0, 180].
pub fn angular_distance(a_deg: f64, b_deg: f64) -> f64 {
    normalize_to_pm180(a_deg - b_deg).abs()
}
