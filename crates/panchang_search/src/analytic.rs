//! Low-precision analytic Sun and Moon.
//!
//! Truncated series from Meeus, *Astronomical Algorithms*: the Sun from
//! chapter 25 (about 0.01 deg) and the Moon from the 13 largest longitude
//! terms of chapter 47 (about 0.05 deg). Good enough for demos, benches and
//! tests; production almanacs should plug in a full ephemeris.

use panchang_base::{jd_to_centuries, normalize_360};

use crate::ephemeris::{EphemerisProvider, TropicalPositions};
use crate::error::SearchError;

/// Moon longitude terms: (coefficient, D, M, M', F).
const MOON_TERMS: [(f64, f64, f64, f64, f64); 13] = [
    (6.288_774, 0.0, 0.0, 1.0, 0.0),
    (1.274_027, 2.0, 0.0, -1.0, 0.0),
    (0.658_314, 2.0, 0.0, 0.0, 0.0),
    (0.213_618, 0.0, 0.0, 2.0, 0.0),
    (-0.185_116, 0.0, 1.0, 0.0, 0.0),
    (-0.114_332, 0.0, 0.0, 0.0, 2.0),
    (0.058_793, 2.0, 0.0, -2.0, 0.0),
    (0.057_066, 2.0, -1.0, -1.0, 0.0),
    (0.053_322, 2.0, 0.0, 1.0, 0.0),
    (0.045_758, 2.0, -1.0, 0.0, 0.0),
    (-0.040_923, 0.0, 1.0, -1.0, 0.0),
    (-0.034_720, 1.0, 0.0, 0.0, 0.0),
    (-0.030_383, 0.0, 1.0, 1.0, 0.0),
];

/// Apparent geocentric longitude of the Sun, degrees.
pub fn sun_longitude_deg(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    normalize_360(l0 + c - 0.005_69 - 0.004_78 * omega.sin())
}

/// Geocentric longitude of the Moon, degrees.
pub fn moon_longitude_deg(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    let lp = 218.316_447_7 + 481_267.881_234_21 * t;
    let d = (297.850_192_1 + 445_267.111_403_4 * t).to_radians();
    let m = (357.529_109_2 + 35_999.050_290_9 * t).to_radians();
    let mp = (134.963_396_4 + 477_198.867_505_5 * t).to_radians();
    let f = (93.272_095_0 + 483_202.017_523_3 * t).to_radians();
    let sum: f64 = MOON_TERMS
        .iter()
        .map(|&(coef, cd, cm, cmp, cf)| coef * (cd * d + cm * m + cmp * mp + cf * f).sin())
        .sum();
    normalize_360(lp + sum)
}

/// [`EphemerisProvider`] backed by the truncated series above.
///
/// Serves any finite Julian Date; the error term grows slowly away from the
/// present era.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowPrecisionEphemeris;

impl EphemerisProvider for LowPrecisionEphemeris {
    fn tropical_positions(&self, jd_ut: f64) -> Result<TropicalPositions, SearchError> {
        if !jd_ut.is_finite() {
            return Err(SearchError::EphemerisUnavailable(format!(
                "non-finite Julian date {jd_ut}"
            )));
        }
        Ok(TropicalPositions::new(
            sun_longitude_deg(jd_ut),
            moon_longitude_deg(jd_ut),
        ))
    }
}
