//! The numeric contract with an external ephemeris.
//!
//! Chart code only ever asks three questions: where is a body, what is the
//! local sidereal time, and what is the obliquity. Implementors must supply
//! body longitudes; the two frame angles have standard closed-form defaults.
//!
//! Sources for the defaults:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.
//! - Mean obliquity: IAU 2006 (Capitaine, Wallace & Chapront 2003).

use std::f64::consts::{PI, TAU};

use chrono::{DateTime, Utc};

use crate::ephemeris::types::GeoLocation;
use crate::error::Result;
use crate::zodiac::Body;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Mean obliquity at J2000.0 in degrees (84381.406″).
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_279_444_444_445;

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Source of body longitudes and frame angles.
pub trait Ephemeris {
    /// Ecliptic longitude of `body` in degrees.
    fn ecliptic_longitude(
        &self,
        body: Body,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<f64>;

    /// Local sidereal time (RAMC) in radians, [0, 2π).
    fn sidereal_time(&self, at: DateTime<Utc>, longitude_deg: f64) -> Result<f64> {
        Ok(local_sidereal_time_rad(
            gmst_rad(julian_day(at)),
            longitude_deg.to_radians(),
        ))
    }

    /// Obliquity of the ecliptic in radians.
    fn obliquity(&self, at: DateTime<Utc>) -> Result<f64> {
        Ok(mean_obliquity_rad(julian_day(at)))
    }
}

/// Convert UTC datetime to Julian Day.
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / 86_400.0
}

/// Earth Rotation Angle, radians in [0, 2π).
pub fn earth_rotation_angle_rad(jd_ut1: f64) -> f64 {
    let du = jd_ut1 - J2000_JD;
    let theta = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time, radians in [0, 2π).
///
/// UTC is taken as UT1; the sub-second difference is far below the
/// precision that house cusps need.
pub fn gmst_rad(jd_ut1: f64) -> f64 {
    let era = earth_rotation_angle_rad(jd_ut1);
    let t = (jd_ut1 - J2000_JD) / 36525.0;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t4
        - 0.0000000368 * t5;

    (era + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// LST = GMST + east longitude, radians in [0, 2π).
pub fn local_sidereal_time_rad(gmst: f64, longitude_east_rad: f64) -> f64 {
    (gmst + longitude_east_rad).rem_euclid(TAU)
}

/// IAU 2006 mean obliquity of date, radians.
pub fn mean_obliquity_rad(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / 36525.0;
    let arcsec = 84381.406 - 46.836769 * t - 0.0001831 * t * t + 0.00200340 * t * t * t
        - 0.000000576 * t.powi(4)
        - 0.0000000434 * t.powi(5);
    arcsec * ARCSEC_TO_RAD
}
