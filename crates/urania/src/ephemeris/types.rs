use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::oracle::{Ephemeris, OBLIQUITY_J2000_DEG};
use crate::error::{ensure_finite, ChartError, Result};

/// Geographic location coordinates (decimal degrees, east and north positive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// Validated location: latitude in [-90, 90], longitude in [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let location = Self { lat, lon };
        location.validate()?;
        Ok(location)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("latitude", self.lat)?;
        ensure_finite("longitude", self.lon)?;
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ChartError::invalid(
                "latitude",
                self.lat,
                "must lie in [-90, 90]",
            ));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(ChartError::invalid(
                "longitude",
                self.lon,
                "must lie in [-180, 180]",
            ));
        }
        Ok(())
    }

    pub fn latitude_rad(&self) -> f64 {
        self.lat.to_radians()
    }
}

/// Where the obliquity of the ecliptic for a chart comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObliquityModel {
    /// Mean obliquity at the chart instant, as reported by the oracle.
    #[default]
    OfDate,
    /// Fixed J2000.0 value, independent of the instant.
    J2000,
}

/// A chart moment: UTC time, observer location, and the sidereal time and
/// obliquity derived for them.
///
/// Both angles are fixed at construction so every body and cusp of one chart
/// sees the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInstant")]
pub struct Instant {
    datetime: DateTime<Utc>,
    location: GeoLocation,
    /// Local sidereal time as an angle (RAMC), radians in [0, 2π)
    ramc: f64,
    /// Obliquity of the ecliptic, radians
    obliquity: f64,
}

#[derive(Deserialize)]
struct RawInstant {
    datetime: DateTime<Utc>,
    location: GeoLocation,
    ramc: f64,
    obliquity: f64,
}

impl TryFrom<RawInstant> for Instant {
    type Error = ChartError;

    fn try_from(raw: RawInstant) -> Result<Self> {
        Self::from_parts(raw.datetime, raw.location, raw.ramc, raw.obliquity)
    }
}

impl Instant {
    /// Ask the oracle for sidereal time and obliquity once.
    pub fn resolve(
        ephemeris: &dyn Ephemeris,
        datetime: DateTime<Utc>,
        location: GeoLocation,
        model: ObliquityModel,
    ) -> Result<Self> {
        location.validate()?;
        let ramc = ephemeris.sidereal_time(datetime, location.lon)?;
        let obliquity = match model {
            ObliquityModel::OfDate => ephemeris.obliquity(datetime)?,
            ObliquityModel::J2000 => OBLIQUITY_J2000_DEG.to_radians(),
        };
        log::debug!(
            "instant {} at ({}, {}): ramc={:.4}° obliquity={:.5}° ({:?})",
            datetime,
            location.lat,
            location.lon,
            ramc.to_degrees(),
            obliquity.to_degrees(),
            model
        );
        Self::from_parts(datetime, location, ramc, obliquity)
    }

    /// Build from precomputed RAMC and obliquity (both radians).
    pub fn from_parts(
        datetime: DateTime<Utc>,
        location: GeoLocation,
        ramc: f64,
        obliquity: f64,
    ) -> Result<Self> {
        location.validate()?;
        ensure_finite("sidereal time", ramc)?;
        ensure_finite("obliquity", obliquity)?;
        if !(0.0..std::f64::consts::FRAC_PI_2).contains(&obliquity) {
            return Err(ChartError::invalid(
                "obliquity",
                obliquity,
                "must lie in [0, π/2) radians",
            ));
        }
        Ok(Self {
            datetime,
            location,
            ramc: ramc.rem_euclid(std::f64::consts::TAU),
            obliquity,
        })
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    /// RAMC in radians.
    pub fn ramc(&self) -> f64 {
        self.ramc
    }

    /// Obliquity in radians.
    pub fn obliquity(&self) -> f64 {
        self.obliquity
    }
}
