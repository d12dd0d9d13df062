use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::ephemeris::oracle::{
    gmst_rad, julian_day, local_sidereal_time_rad, mean_obliquity_rad, Ephemeris,
};
use crate::ephemeris::types::GeoLocation;
use crate::error::{ensure_finite, ChartError, Result};
use crate::zodiac::Body;

/// In-memory ephemeris backed by precomputed samples.
///
/// Longitudes are keyed by (body, instant) and are geocentric, so the
/// observer location is ignored. Sidereal time and obliquity fall back to the
/// closed-form defaults unless pinned with the `with_*` builders.
#[derive(Debug, Clone, Default)]
pub struct TableEphemeris {
    samples: HashMap<(Body, DateTime<Utc>), f64>,
    sidereal_time: Option<f64>,
    obliquity: Option<f64>,
}

impl TableEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a body longitude (degrees) at an instant.
    pub fn insert(&mut self, body: Body, at: DateTime<Utc>, longitude: f64) -> Result<()> {
        ensure_finite("ecliptic longitude", longitude)?;
        self.samples.insert((body, at), longitude);
        Ok(())
    }

    /// Builder form of [`TableEphemeris::insert`].
    pub fn with_sample(mut self, body: Body, at: DateTime<Utc>, longitude: f64) -> Result<Self> {
        self.insert(body, at, longitude)?;
        Ok(self)
    }

    /// Pin the local sidereal time (radians) for every query.
    pub fn with_sidereal_time(mut self, ramc: f64) -> Self {
        self.sidereal_time = Some(ramc);
        self
    }

    /// Pin the obliquity (radians) for every query.
    pub fn with_obliquity(mut self, obliquity: f64) -> Self {
        self.obliquity = Some(obliquity);
        self
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Ephemeris for TableEphemeris {
    fn ecliptic_longitude(
        &self,
        body: Body,
        at: DateTime<Utc>,
        _location: &GeoLocation,
    ) -> Result<f64> {
        self.samples
            .get(&(body, at))
            .copied()
            .ok_or(ChartError::MissingSample { body, at })
    }

    fn sidereal_time(&self, at: DateTime<Utc>, longitude_deg: f64) -> Result<f64> {
        match self.sidereal_time {
            Some(ramc) => Ok(ramc),
            None => Ok(local_sidereal_time_rad(
                gmst_rad(julian_day(at)),
                longitude_deg.to_radians(),
            )),
        }
    }

    fn obliquity(&self, at: DateTime<Utc>) -> Result<f64> {
        match self.obliquity {
            Some(eps) => Ok(eps),
            None => Ok(mean_obliquity_rad(julian_day(at))),
        }
    }
}
