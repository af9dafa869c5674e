//! Julian Date conversions and sidereal time.
//!
//! The search engine works on `f64` Julian Dates in UT; callers see
//! `chrono::DateTime<Utc>`. Conversions here are the only place the two meet.
//!
//! GMST sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use std::f64::consts::{PI, TAU};

use chrono::{DateTime, TimeDelta, Utc};

/// Julian Date of J2000.0 (2000-01-01T12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Arcseconds to radians.
const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// How a fractional Julian Date is turned into a whole-second timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round toward the past (used for period starts).
    Floor,
    /// Round toward the future (used for period ends).
    Ceil,
    /// Round to the nearest second.
    Nearest,
}

/// Julian Date (UT) of a UTC instant, with millisecond resolution.
pub fn jd_from_utc(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / (SECONDS_PER_DAY * 1000.0) + UNIX_EPOCH_JD
}

/// UTC instant of a Julian Date, rounded to a whole second.
///
/// Out-of-range or NaN input saturates to chrono's min/max instant.
pub fn utc_from_jd(jd: f64, rounding: Rounding) -> DateTime<Utc> {
    let secs = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
    let whole = match rounding {
        Rounding::Floor => secs.floor(),
        Rounding::Ceil => secs.ceil(),
        Rounding::Nearest => secs.round(),
    };
    if whole.is_nan() {
        return DateTime::<Utc>::MIN_UTC;
    }
    DateTime::from_timestamp(whole as i64, 0).unwrap_or(if whole > 0.0 {
        DateTime::<Utc>::MAX_UTC
    } else {
        DateTime::<Utc>::MIN_UTC
    })
}

/// Length of a span in fractional days.
pub fn days_between(start: &DateTime<Utc>, end: &DateTime<Utc>) -> f64 {
    (*end - *start).num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0)
}

/// Convert fractional days to a chrono duration (millisecond resolution).
pub fn duration_from_days(days: f64) -> TimeDelta {
    TimeDelta::milliseconds((days * SECONDS_PER_DAY * 1000.0).round() as i64)
}

/// Julian centuries since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / 36525.0
}

/// Earth Rotation Angle at a UT Julian Date, radians in [0, 2π).
pub fn earth_rotation_angle_rad(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    let theta = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time at a UT Julian Date, radians in [0, 2π).
///
/// UTC is used in place of UT1; the sub-second difference is far below the
/// precision the ascendant search needs.
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let era = earth_rotation_angle_rad(jd_ut);
    let t = jd_to_centuries(jd_ut);
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

/// Local Sidereal Time from GMST and observer east longitude, radians in [0, 2π).
pub fn local_sidereal_time_rad(gmst: f64, longitude_east_rad: f64) -> f64 {
    (gmst + longitude_east_rad).rem_euclid(TAU)
}
