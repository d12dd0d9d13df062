//! Whole-chart pipeline: instant → cusps → positions → aspects / transits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aspects::{AspectCalculator, AspectRecord, AspectSettings};
use crate::config::ChartConfig;
use crate::ephemeris::{Ephemeris, GeoLocation, Instant};
use crate::error::{ChartError, Result};
use crate::houses::{self, CuspTable, HouseMethod};
use crate::placement::{self, BodyPosition};
use crate::transit::{TransitComparator, TransitEvent};
use crate::zodiac::Body;

/// Cusps for a resolved instant.
pub fn compute_cusps(instant: &Instant, method: HouseMethod) -> Result<CuspTable> {
    houses::compute_cusps(instant, method)
}

/// Place `(body, longitude)` pairs against a cusp table.
pub fn place_bodies(longitudes: &[(Body, f64)], cusps: &CuspTable) -> Result<Vec<BodyPosition>> {
    placement::place_bodies(longitudes, cusps)
}

/// Aspects among placed bodies.
pub fn detect_aspects(
    positions: &[BodyPosition],
    settings: &AspectSettings,
) -> Result<Vec<AspectRecord>> {
    Ok(AspectCalculator::new(settings.clone())?.detect(positions))
}

/// Compare `bodies` at `start` and `end` against natal positions.
pub fn compute_transits(
    ephemeris: &dyn Ephemeris,
    bodies: &[Body],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    location: &GeoLocation,
    natal: &[BodyPosition],
    contact_orb: f64,
) -> Result<Vec<TransitEvent>> {
    location.validate()?;
    if end < start {
        return Err(ChartError::invalid(
            "transit range",
            (end - start).num_seconds() as f64,
            format!("end {end} is before start {start}"),
        ));
    }
    if let Some(angle) = bodies.iter().find(|b| b.is_angle()) {
        return Err(ChartError::invalid(
            "transiting body",
            f64::NAN,
            format!("{angle} has no ephemeris longitude"),
        ));
    }

    let comparator = TransitComparator::new(contact_orb)?;
    let events = comparator.compare(
        bodies,
        natal,
        |body| ephemeris.ecliptic_longitude(body, start, location),
        |body| ephemeris.ecliptic_longitude(body, end, location),
    )?;
    log::debug!(
        "transits {start} .. {end}: {} bodies, {} sign changes",
        events.len(),
        events.iter().filter(|e| e.sign_changed()).count()
    );
    Ok(events)
}

/// A computed natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub instant: Instant,
    pub cusps: CuspTable,
    /// ASC and MC first, then the natal bodies in traditional order
    pub positions: Vec<BodyPosition>,
    pub aspects: Vec<AspectRecord>,
}

impl NatalChart {
    pub fn compute(
        ephemeris: &dyn Ephemeris,
        at: DateTime<Utc>,
        location: GeoLocation,
        config: &ChartConfig,
    ) -> Result<Self> {
        let instant = Instant::resolve(ephemeris, at, location, config.houses.obliquity)?;
        let cusps = compute_cusps(&instant, config.houses.method)?;

        let longitudes = Body::NATAL
            .iter()
            .map(|&body| {
                ephemeris
                    .ecliptic_longitude(body, at, &location)
                    .map(|lon| (body, lon))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut positions = placement::place_angles(&cusps)?.to_vec();
        positions.extend(place_bodies(&longitudes, &cusps)?);

        let aspects = detect_aspects(&positions, &config.aspects)?;

        Ok(Self {
            instant,
            cusps,
            positions,
            aspects,
        })
    }

    pub fn position(&self, body: Body) -> Option<&BodyPosition> {
        self.positions.iter().find(|p| p.body == body)
    }

    /// Transits of the configured bodies over this chart.
    pub fn transits(
        &self,
        ephemeris: &dyn Ephemeris,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        config: &ChartConfig,
    ) -> Result<Vec<TransitEvent>> {
        compute_transits(
            ephemeris,
            &config.transits.bodies,
            start,
            end,
            &self.instant.location(),
            &self.positions,
            config.transits.contact_orb,
        )
    }
}
