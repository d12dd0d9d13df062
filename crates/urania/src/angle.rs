//! Angle helpers shared by every other module.
//!
//! All longitudes in this crate are ecliptic degrees. Anything that reaches
//! a cusp table or a placement goes through [`normalize`] first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize degrees to [0, 360).
///
/// Uses the mathematical modulo, so `-10.0` becomes `350.0`.
pub fn normalize(deg: f64) -> f64 {
    let normalized = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Shorter arc between two angles, in [0, 180].
///
/// Symmetric bit for bit: `a - b` and `b - a` differ only in sign, and the
/// sign is dropped before folding.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs().rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Whole degrees and arc-minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeMinute {
    pub degrees: i32,
    pub minutes: u32,
}

impl fmt::Display for DegreeMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}° {:02}'", self.degrees, self.minutes)
    }
}

/// Split decimal degrees into truncated degrees and rounded minutes.
///
/// A fraction that rounds to 60 minutes carries into the degree, so
/// `29.9999` is `30° 00'` rather than `29° 60'`. Negative input keeps its
/// sign on the degree part.
pub fn degrees_to_dm(deg: f64) -> DegreeMinute {
    let whole = deg.trunc();
    let mut degrees = whole as i32;
    let mut minutes = ((deg - whole).abs() * 60.0).round() as u32;
    if minutes >= 60 {
        minutes = 0;
        degrees += if deg < 0.0 { -1 } else { 1 };
    }
    DegreeMinute { degrees, minutes }
}
