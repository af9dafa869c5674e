//! Lagna (Ascendant) computation.
//!
//! Standard spherical astronomy: the ecliptic longitude rising on the
//! eastern horizon for a local sidereal time and latitude.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 13.

use std::f64::consts::TAU;

use crate::julian::{gmst_rad, local_sidereal_time_rad};
use crate::location::GeoLocation;
use crate::util::normalize_360;

/// Mean obliquity of the ecliptic at J2000.0 in degrees.
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_1;

/// Ascendant from a local sidereal time and latitude, radians in [0, 2*pi).
///
/// `Asc = atan2(cos(LST), -(sin(LST)*cos(eps) + tan(phi)*sin(eps)))`
///
/// The Meeus form `atan2(-cos(LST), ...)` yields the descendant; the signs
/// here select the eastern intersection of ecliptic and horizon.
pub fn lagna_from_lst_rad(lst_rad: f64, latitude_rad: f64) -> f64 {
    let eps = OBLIQUITY_J2000_DEG.to_radians();
    let asc = f64::atan2(
        lst_rad.cos(),
        -(lst_rad.sin() * eps.cos() + latitude_rad.tan() * eps.sin()),
    );
    asc.rem_euclid(TAU)
}

/// Tropical ecliptic longitude of the Ascendant at a UT Julian Date,
/// degrees in [0, 360).
pub fn ascendant_longitude_deg(jd_ut: f64, location: &GeoLocation) -> f64 {
    let lst = local_sidereal_time_rad(gmst_rad(jd_ut), location.longitude_rad());
    normalize_360(lagna_from_lst_rad(lst, location.latitude_rad()).to_degrees())
}
