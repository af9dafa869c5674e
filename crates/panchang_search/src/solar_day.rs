//! Approximate sunrise and sunset from the sunrise equation.

use chrono::{NaiveDate, NaiveTime};
use panchang_base::{
    DayWindow, GeoLocation, J2000_JD, OBLIQUITY_J2000_DEG, Rounding, jd_from_utc, utc_from_jd,
};

use crate::error::SearchError;
use crate::recurring_types::DayBoundaryProvider;

/// Standard altitude of the Sun's upper limb at rise and set, with
/// refraction, in degrees.
const RISE_SET_ALTITUDE_DEG: f64 = -0.833;

fn sin_d(deg: f64) -> f64 {
    deg.to_radians().sin()
}

/// Sunrise and sunset (JD UT) around local noon of a civil date.
///
/// Accurate to a minute or two at moderate latitudes. Polar day or night is
/// reported as `InvalidDayWindow`.
pub fn sunrise_sunset_jd(
    date: NaiveDate,
    location: &GeoLocation,
) -> Result<(f64, f64), SearchError> {
    let noon = date.and_time(NaiveTime::MIN).and_utc() + chrono::TimeDelta::hours(12);
    let n = (jd_from_utc(&noon) - J2000_JD + 0.0008).round();
    let j_star = n - location.longitude_deg / 360.0;
    let m = (357.5291 + 0.985_600_28 * j_star).rem_euclid(360.0);
    let c = 1.9148 * sin_d(m) + 0.02 * sin_d(2.0 * m) + 0.0003 * sin_d(3.0 * m);
    let lambda = (m + c + 180.0 + 102.9372).rem_euclid(360.0);
    let transit = J2000_JD + j_star + 0.0053 * sin_d(m) - 0.0069 * sin_d(2.0 * lambda);

    let sin_decl = sin_d(lambda) * sin_d(OBLIQUITY_J2000_DEG);
    let cos_decl = sin_decl.asin().cos();
    let altitude = RISE_SET_ALTITUDE_DEG - 2.076 * location.altitude_m.max(0.0).sqrt() / 60.0;
    let phi = location.latitude_deg;
    let cos_omega = (sin_d(altitude) - sin_d(phi) * sin_decl) / (phi.to_radians().cos() * cos_decl);
    if cos_omega < -1.0 {
        return Err(SearchError::InvalidDayWindow(format!("polar day on {date}")));
    }
    if cos_omega > 1.0 {
        return Err(SearchError::InvalidDayWindow(format!("polar night on {date}")));
    }
    let half_arc = cos_omega.acos().to_degrees() / 360.0;
    Ok((transit - half_arc, transit + half_arc))
}

/// [`DayBoundaryProvider`] using [`sunrise_sunset_jd`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateSolarDays;

impl DayBoundaryProvider for ApproximateSolarDays {
    fn day_window(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
    ) -> Result<DayWindow, SearchError> {
        location.validate()?;
        let (rise, set) = sunrise_sunset_jd(date, location)?;
        let next_date = date
            .succ_opt()
            .ok_or(SearchError::InvalidRequest("date out of range"))?;
        let (next_rise, _) = sunrise_sunset_jd(next_date, location)?;
        Ok(DayWindow::new(
            utc_from_jd(rise, Rounding::Nearest),
            utc_from_jd(set, Rounding::Nearest),
            utc_from_jd(next_rise, Rounding::Nearest),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn delhi() -> GeoLocation {
        GeoLocation::new(28.6139, 77.209, 0.0)
    }

    #[test]
    fn delhi_equinox() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let w = ApproximateSolarDays.day_window(date, &delhi()).unwrap();
        let rise = Utc.with_ymd_and_hms(2024, 3, 20, 0, 55, 0).unwrap();
        let set = Utc.with_ymd_and_hms(2024, 3, 20, 13, 2, 0).unwrap();
        assert!((w.sunrise() - rise).num_seconds().abs() < 180, "{}", w.sunrise());
        assert!((w.sunset() - set).num_seconds().abs() < 180, "{}", w.sunset());
        let day = w.next_sunrise() - w.sunrise();
        assert!((day.num_minutes() - 1440).abs() < 3);
    }

    #[test]
    fn polar_summer_is_invalid() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let err = ApproximateSolarDays
            .day_window(date, &GeoLocation::new(80.0, 15.0, 0.0))
            .unwrap_err();
        assert!(err.is_invalid_day_window());
    }

    #[test]
    fn polar_winter_is_invalid() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
        assert!(sunrise_sunset_jd(date, &GeoLocation::new(80.0, 15.0, 0.0)).is_err());
    }
}
