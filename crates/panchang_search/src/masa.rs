//! Masa (lunar month, amanta) determination.
//!
//! The month runs from new moon to new moon and is named after the Sun's
//! rashi at the closing new moon. When the Sun stays in one rashi across
//! both new moons the month is adhika and takes the following month's name.

use chrono::{DateTime, Utc};
use panchang_base::{Masa, jd_from_utc, masa_from_rashi_index, rashi_from_longitude};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boundary_types::{Boundary, Direction, Transition};
use crate::cancel::CancelToken;
use crate::classifier::SynodicHalfClassifier;
use crate::engine::PanchangEngine;
use crate::ephemeris::EphemerisProvider;
use crate::error::SearchError;

/// Masa containing an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasaInfo {
    pub masa: Masa,
    /// Intercalary month.
    pub adhika: bool,
    /// Opening new moon.
    pub start: DateTime<Utc>,
    /// Closing new moon.
    pub end: DateTime<Utc>,
}

/// Nearest new moon from `jd_ut` in `direction`.
///
/// Walks over at most one full moon on the way.
pub fn new_moon_jd<P: EphemerisProvider>(
    engine: &PanchangEngine<P>,
    jd_ut: f64,
    direction: Direction,
    cancel: &CancelToken,
) -> Result<Boundary, SearchError> {
    let search = engine.config().new_moon_search;
    let mut origin = jd_ut;
    let mut known_bucket = None;
    for _ in 0..2 {
        let found = match known_bucket {
            Some(bucket) => engine.locate_from_jd(
                &SynodicHalfClassifier,
                origin,
                bucket,
                direction,
                None,
                &search,
                cancel,
            )?,
            None => {
                engine.locate_jd(&SynodicHalfClassifier, origin, direction, None, &search, cancel)?
            }
        };
        match found {
            Transition::Found(b) => {
                // Waning to waxing, whichever side we search from.
                let is_new_moon = match direction {
                    Direction::Forward => b.to_bucket == SynodicHalfClassifier::WAXING,
                    Direction::Backward => b.from_bucket == SynodicHalfClassifier::WAXING,
                };
                if is_new_moon {
                    return Ok(b);
                }
                origin = b.outside_jd;
                known_bucket = Some(b.to_bucket);
            }
            Transition::NotFound { .. } => break,
        }
    }
    Err(SearchError::NoTransitionFound("new moon"))
}

fn sun_rashi_index<P: EphemerisProvider>(
    engine: &PanchangEngine<P>,
    jd_ut: f64,
) -> Result<u8, SearchError> {
    let snap = engine.snapshot_at_jd(jd_ut)?;
    Ok(rashi_from_longitude(snap.sun_longitude).rashi_index)
}

/// Masa containing `instant`.
pub fn masa_at<P: EphemerisProvider>(
    engine: &PanchangEngine<P>,
    instant: &DateTime<Utc>,
    cancel: &CancelToken,
) -> Result<MasaInfo, SearchError> {
    let jd = jd_from_utc(instant);
    let prev = new_moon_jd(engine, jd, Direction::Backward, cancel)?;
    let next = new_moon_jd(engine, jd, Direction::Forward, cancel)?;

    let rashi_at_prev = sun_rashi_index(engine, prev.jd)?;
    let rashi_at_next = sun_rashi_index(engine, next.jd)?;
    let (masa, adhika) = if rashi_at_prev == rashi_at_next {
        (masa_from_rashi_index((rashi_at_prev + 1) % 12), true)
    } else {
        (masa_from_rashi_index(rashi_at_next), false)
    };
    debug!(?masa, adhika, "masa determined");

    Ok(MasaInfo {
        masa,
        adhika,
        start: prev.instant(Direction::Backward),
        end: next.instant(Direction::Forward),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::ephemeris::TropicalPositions;
    use chrono::TimeZone;
    use panchang_base::{Rounding, Zodiac, utc_from_jd};

    // Sun moves 1 deg/day, Moon 13 deg/day: synodic month of 30 days, new
    // moon at JD0 with both at 25 deg (Mesha).
    const JD0: f64 = 2_460_000.5;

    fn provider(jd: f64) -> Result<TropicalPositions, SearchError> {
        let d = jd - JD0;
        Ok(TropicalPositions::new(25.0 + d, 25.0 + 13.0 * d))
    }

    type ProviderFn = fn(f64) -> Result<TropicalPositions, SearchError>;

    fn engine() -> PanchangEngine<ProviderFn> {
        let config = EngineConfig::default().with_zodiac(Zodiac::Tropical);
        PanchangEngine::new(provider as ProviderFn, config).unwrap()
    }

    #[test]
    fn finds_bracketing_new_moons() {
        let e = engine();
        let cancel = CancelToken::new();
        // Day 20: waning half, so the forward search meets the new moon directly
        // and the backward one crosses the full moon first.
        let next = new_moon_jd(&e, JD0 + 20.0, Direction::Forward, &cancel).unwrap();
        assert!((next.jd - (JD0 + 30.0)).abs() < 2.0 / 1440.0);
        let prev = new_moon_jd(&e, JD0 + 20.0, Direction::Backward, &cancel).unwrap();
        assert!((prev.jd - JD0).abs() < 2.0 / 1440.0);
    }

    #[test]
    fn normal_month() {
        let e = engine();
        let at = utc_from_jd(JD0 + 5.0, Rounding::Nearest);
        let info = masa_at(&e, &at, &CancelToken::new()).unwrap();
        // Sun at 25 deg (Mesha) opening, 55 deg (Vrishabha) closing.
        assert_eq!(info.masa, Masa::Vaishakha);
        assert!(!info.adhika);
        assert!(info.start < at && at < info.end);
        assert!(info.start > Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn adhika_when_sun_stays_in_rashi() {
        // Sun crawls: 0.1 deg/day keeps it inside Mesha for the whole month.
        let slow = |jd: f64| {
            let d = jd - JD0;
            Ok::<_, SearchError>(TropicalPositions::new(5.0 + 0.1 * d, 5.0 + 12.1 * d))
        };
        let config = EngineConfig::default().with_zodiac(Zodiac::Tropical);
        let e = PanchangEngine::new(slow, config).unwrap();
        let at = utc_from_jd(JD0 + 10.0, Rounding::Nearest);
        let info = masa_at(&e, &at, &CancelToken::new()).unwrap();
        assert!(info.adhika);
        assert_eq!(info.masa, Masa::Vaishakha);
    }
}
