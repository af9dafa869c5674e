//! Shared fixtures for the integration tests: synthetic linear providers
//! and fixed 06:00/18:00 day windows.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use panchang_base::{DayWindow, GeoLocation, Zodiac, jd_from_utc};
use panchang_search::{
    EngineConfig, EphemerisProvider, PanchangEngine, SearchError, TropicalPositions,
};

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Sun fixed at 0 deg, Moon at `moon_at_epoch + rate * days` from `epoch`.
pub fn linear_moon(
    epoch: DateTime<Utc>,
    moon_at_epoch: f64,
    rate_deg_per_day: f64,
) -> impl Fn(f64) -> Result<TropicalPositions, SearchError> + Clone {
    let epoch_jd = jd_from_utc(&epoch);
    move |jd: f64| {
        Ok(TropicalPositions::new(
            0.0,
            moon_at_epoch + rate_deg_per_day * (jd - epoch_jd),
        ))
    }
}

/// `inner`, except that query number `fail_at` (1-based) fails with
/// `EphemerisUnavailable`.
pub fn failing_query<P>(
    inner: P,
    fail_at: u64,
) -> impl Fn(f64) -> Result<TropicalPositions, SearchError>
where
    P: Fn(f64) -> Result<TropicalPositions, SearchError>,
{
    let calls = AtomicU64::new(0);
    move |jd: f64| {
        let n = calls.fetch_add(1, Ordering::Relaxed) + 1;
        if n == fail_at {
            Err(SearchError::EphemerisUnavailable(format!("no data at query {n}")))
        } else {
            inner(jd)
        }
    }
}

/// Engine in the tropical frame, so synthetic longitudes classify as given.
pub fn tropical_engine<P: EphemerisProvider>(provider: P) -> PanchangEngine<P> {
    tropical_engine_with(provider, EngineConfig::default())
}

pub fn tropical_engine_with<P: EphemerisProvider>(
    provider: P,
    config: EngineConfig,
) -> PanchangEngine<P> {
    PanchangEngine::new(provider, config.with_zodiac(Zodiac::Tropical)).unwrap()
}

/// Sunrise 06:00, sunset 18:00, next sunrise 06:00 the following day.
pub fn fixed_window(date: NaiveDate) -> DayWindow {
    let sunrise = date.and_hms_opt(6, 0, 0).unwrap().and_utc();
    DayWindow::new(
        sunrise,
        sunrise + TimeDelta::hours(12),
        sunrise + TimeDelta::hours(24),
    )
    .unwrap()
}

pub fn fixed_days(date: NaiveDate, _location: &GeoLocation) -> Result<DayWindow, SearchError> {
    Ok(fixed_window(date))
}

pub fn delhi() -> GeoLocation {
    GeoLocation::new(28.6139, 77.209, 0.0)
}

/// `|a - b|` in seconds.
pub fn seconds_apart(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (a - b).num_seconds().abs()
}
