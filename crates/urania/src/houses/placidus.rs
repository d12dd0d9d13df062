//! Placidus house cusps from RAMC, obliquity and latitude.
//!
//! The angles come from the standard spherical formulas (Meeus ch. 13):
//!
//! - `MC  = atan2(tan(RAMC), cos(ε))`, taken on the branch within 90° of RAMC
//! - `ASC = atan2(cos(RAMC), -(sin(RAMC)·cos(ε) + tan(φ)·sin(ε)))`
//!
//! Intermediate cusps use the pole method: cusp 12 and 2 are the ascendant
//! of RAMC ∓ 30° under a pole with `tan(pole) = ⅔·tan(φ)`, cusp 11 and 3 the
//! ascendant of RAMC ∓ 60° with `tan(pole) = ⅓·tan(φ)`. Cusps 5, 6, 8 and 9
//! are the antipodes of 11, 12, 2 and 3.

use crate::angle::{circular_distance, normalize};
use crate::ephemeris::Instant;
use crate::error::{ChartError, Result};
use crate::houses::types::{CuspTable, HouseMethod};

/// (cusp, RAMC offset in degrees, pole factor) for the eastern intermediates.
const POLE_CUSPS: [(u8, f64, f64); 4] = [
    (11, -60.0, 1.0 / 3.0),
    (12, -30.0, 2.0 / 3.0),
    (2, 30.0, 2.0 / 3.0),
    (3, 60.0, 1.0 / 3.0),
];

/// Cusps for a resolved chart instant.
pub fn compute_cusps(instant: &Instant, method: HouseMethod) -> Result<CuspTable> {
    house_cusps(
        instant.ramc(),
        instant.obliquity(),
        instant.location().latitude_rad(),
        method,
    )
}

/// Cusps from raw frame angles, all in radians.
pub fn house_cusps(
    ramc: f64,
    obliquity: f64,
    latitude: f64,
    method: HouseMethod,
) -> Result<CuspTable> {
    for (field, value) in [("ramc", ramc), ("obliquity", obliquity), ("latitude", latitude)] {
        if !value.is_finite() {
            return Err(ChartError::invalid(field, value, "must be a finite number"));
        }
    }

    let lat_deg = latitude.to_degrees();
    if lat_deg.abs() >= 90.0 {
        return Err(ChartError::domain(lat_deg, "tan(latitude) is undefined at the pole"));
    }
    if method == HouseMethod::SemiArc && lat_deg.abs() >= 90.0 - obliquity.to_degrees() {
        return Err(ChartError::domain(
            lat_deg,
            "inside the polar circle some ecliptic degrees never rise, semi-arcs are undefined",
        ));
    }

    let mc = midheaven(ramc, obliquity);
    let asc = ascendant(ramc, obliquity, latitude);

    let mut cusps = [0.0; 12];
    cusps[0] = asc;
    cusps[9] = mc;

    match method {
        HouseMethod::SemiArc => {
            for (house, offset, factor) in POLE_CUSPS {
                let pole = (latitude.tan() * factor).atan();
                cusps[usize::from(house - 1)] =
                    ascendant(ramc + offset.to_radians(), obliquity, pole);
            }
        }
        HouseMethod::Trisection => {
            log::warn!("trisection house method is a lower-fidelity Placidus approximation");
            let upper = normalize(asc - mc);
            cusps[10] = normalize(mc + upper / 3.0);
            cusps[11] = normalize(mc + 2.0 * upper / 3.0);
            let lower = normalize(mc + 180.0 - asc);
            cusps[1] = normalize(asc + lower / 3.0);
            cusps[2] = normalize(asc + 2.0 * lower / 3.0);
        }
    }

    // Lower hemisphere mirrors the upper one
    for (target, source) in [(4, 10), (5, 11), (6, 12), (7, 1), (8, 2), (9, 3)] {
        cusps[target - 1] = normalize(cusps[source - 1] + 180.0);
    }

    if cusps.iter().any(|c| !c.is_finite()) {
        return Err(ChartError::domain(lat_deg, "cusp computation produced a non-finite value"));
    }

    let table = CuspTable::new(method, cusps)
        .map_err(|e| ChartError::domain(lat_deg, format!("no consistent house solution: {e}")))?;
    log::debug!("{:?} cusps: {:?}", method, table.cusps());
    Ok(table)
}

/// Ecliptic longitude of the MC in degrees, [0, 360).
pub fn midheaven(ramc: f64, obliquity: f64) -> f64 {
    let mut mc = normalize(f64::atan2(ramc.tan(), obliquity.cos()).to_degrees());
    // atan2 of tan(RAMC) only spans ±90°; pick the branch that follows RAMC
    if circular_distance(mc, ramc.to_degrees()) > 90.0 {
        mc = normalize(mc + 180.0);
    }
    mc
}

/// Ecliptic longitude rising at `latitude` (or a house pole) in degrees, [0, 360).
pub fn ascendant(ramc: f64, obliquity: f64, latitude: f64) -> f64 {
    let y = ramc.cos();
    let x = -(ramc.sin() * obliquity.cos() + latitude.tan() * obliquity.sin());
    normalize(f64::atan2(y, x).to_degrees())
}
