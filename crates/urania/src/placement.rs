//! Placing raw longitudes into signs and houses.

use serde::{Deserialize, Serialize};

use crate::angle::{degrees_to_dm, normalize, DegreeMinute};
use crate::error::{ensure_finite, Result};
use crate::houses::CuspTable;
use crate::zodiac::{Body, Sign};

/// A body resolved against the zodiac and a cusp table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPosition {
    pub body: Body,
    /// Absolute ecliptic longitude, [0, 360)
    pub longitude: f64,
    pub sign: Sign,
    /// Degree within the sign, [0, 30)
    pub sign_degree: f64,
    /// House 1-12
    pub house: u8,
}

impl BodyPosition {
    pub fn sign_index(&self) -> usize {
        self.sign.index()
    }

    /// Sign-relative position as degrees and minutes.
    pub fn degree_minute(&self) -> DegreeMinute {
        degrees_to_dm(self.sign_degree)
    }
}

/// Resolve one longitude.
pub fn place(body: Body, longitude: f64, cusps: &CuspTable) -> Result<BodyPosition> {
    let longitude = normalize(ensure_finite("ecliptic longitude", longitude)?);
    let sign = Sign::from_longitude(longitude);
    Ok(BodyPosition {
        body,
        longitude,
        sign,
        sign_degree: longitude - sign.start_longitude(),
        house: cusps.house_of(longitude),
    })
}

/// Resolve a list of `(body, longitude)` pairs, preserving order.
pub fn place_bodies(longitudes: &[(Body, f64)], cusps: &CuspTable) -> Result<Vec<BodyPosition>> {
    longitudes
        .iter()
        .map(|&(body, longitude)| place(body, longitude, cusps))
        .collect()
}

/// ASC and MC as positions in their own frame (houses 1 and 10).
pub fn place_angles(cusps: &CuspTable) -> Result<[BodyPosition; 2]> {
    Ok([
        place(Body::Ascendant, cusps.ascendant(), cusps)?,
        place(Body::Midheaven, cusps.midheaven(), cusps)?,
    ])
}
