//! Gand Mool: the Moon in one of the junction nakshatras.

use panchang_base::{
    DayWindow, Nakshatra, Period, PeriodCategory, PeriodType, Precision, Rounding,
    nakshatra_from_longitude, utc_from_jd,
};
use tracing::{debug, instrument, warn};

use crate::boundary::Sampler;
use crate::boundary_types::{Direction, Transition};
use crate::cancel::CancelToken;
use crate::classifier::GandMoolClassifier;
use crate::engine::{PanchangEngine, span_around};
use crate::ephemeris::EphemerisProvider;
use crate::error::SearchError;
use crate::timeline_types::{DetectorOutput, Diagnostic};

const DETECTOR: &str = "gand_mool";

fn moon_nakshatra<P: EphemerisProvider>(engine: &PanchangEngine<P>, jd: f64) -> Option<Nakshatra> {
    match engine.snapshot_at_jd(jd) {
        Ok(snap) => Some(nakshatra_from_longitude(snap.moon_longitude).nakshatra),
        Err(e) => {
            debug!(jd, error = %e, "moon nakshatra unavailable for description");
            None
        }
    }
}

fn description(first: Option<Nakshatra>, last: Option<Nakshatra>) -> String {
    match (first, last) {
        (Some(a), Some(b)) if a != b => format!("Moon in {} and {}", a.name(), b.name()),
        (Some(a), _) | (None, Some(a)) => format!("Moon in {}", a.name()),
        (None, None) => "Moon in a Gand Mool nakshatra".to_string(),
    }
}

/// Gand Mool spans touching `[sunrise, next_sunrise)`.
///
/// Membership is located as one two-bucket classifier, so consecutive member
/// nakshatras (Revati into Ashwini, Ashlesha into Magha, Jyeshtha into Mula)
/// are reported as a single span. The scan and the edge searches share one
/// memoized sampler; failed samples become `SampleSkipped` diagnostics.
#[instrument(skip_all, fields(sunrise = %window.sunrise()))]
pub fn gand_mool_periods<P: EphemerisProvider>(
    engine: &PanchangEngine<P>,
    window: &DayWindow,
    cancel: &CancelToken,
) -> Result<DetectorOutput, SearchError> {
    let config = engine.config();
    let classifier = GandMoolClassifier::new(config.gand_mool_nakshatras.clone());
    let search = config.search_with_horizon(config.horizons.gand_mool_hours);
    search.validate().map_err(SearchError::InvalidConfig)?;
    let step = search.step_days();
    let tol = search.tolerance_days();
    let sunrise = window.sunrise_jd();
    let limit = window.next_sunrise_jd();
    let last_probe = limit - tol;

    let mut out = DetectorOutput::default();
    let mut sampler = engine.sampler(&classifier);
    let mut probe = sunrise;

    while probe <= last_probe {
        cancel.check()?;
        let next = |jd: f64| {
            let n = jd + step;
            if n > last_probe && jd < last_probe {
                last_probe
            } else {
                n
            }
        };

        let bucket = match sampler.bucket(probe) {
            Ok(b) => b,
            Err(e) if e.is_recoverable() => {
                warn!(jd = probe, error = %e, "gand mool probe skipped");
                probe = next(probe);
                continue;
            }
            Err(e) => return Err(e),
        };
        if bucket != GandMoolClassifier::INSIDE {
            probe = next(probe);
            continue;
        }

        let span = span_around(&mut sampler, probe, bucket, &search, cancel)?;
        let mut precision = Precision::Exact;
        let (start_jd, start) = match span.start {
            Transition::Found(b) => {
                if b.precision == Precision::Approximate {
                    precision = Precision::Approximate;
                }
                (b.jd, b.instant(Direction::Backward))
            }
            Transition::NotFound { .. } => {
                out.diagnostics.push(Diagnostic::NoTransitionFound {
                    detector: DETECTOR.to_string(),
                    from: utc_from_jd(probe, Rounding::Nearest),
                });
                precision = Precision::Approximate;
                (sunrise, window.sunrise())
            }
        };
        let (end_jd, end) = match span.end {
            Transition::Found(b) => {
                if b.precision == Precision::Approximate {
                    precision = Precision::Approximate;
                }
                (b.jd, b.instant(Direction::Forward))
            }
            Transition::NotFound { .. } => {
                out.diagnostics.push(Diagnostic::NoTransitionFound {
                    detector: DETECTOR.to_string(),
                    from: utc_from_jd(probe, Rounding::Nearest),
                });
                precision = Precision::Approximate;
                (limit, window.next_sunrise())
            }
        };

        let first = moon_nakshatra(engine, start_jd + tol);
        let last = moon_nakshatra(engine, end_jd - tol);
        debug!(%start, %end, "gand mool located");
        out.periods.push(
            Period::new(
                PeriodCategory::GandMool,
                "Gand Mool",
                start,
                end,
                PeriodType::Inauspicious,
            )
            .with_description(description(first, last))
            .with_precision(precision),
        );
        probe = next(end_jd.max(probe));
    }

    out.record_skipped(DETECTOR, sampler.take_skipped());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::ephemeris::TropicalPositions;
    use panchang_base::{NAKSHATRA_SPAN_27, SECONDS_PER_DAY, Zodiac, jd_from_utc};

    // Midnight UTC; the Moon crosses one nakshatra per day.
    const JD0: f64 = 2_460_000.5;

    type ProviderFn = fn(f64) -> Result<TropicalPositions, SearchError>;

    fn from_revati(jd: f64) -> Result<TropicalPositions, SearchError> {
        Ok(TropicalPositions::new(0.0, NAKSHATRA_SPAN_27 * (26.0 + jd - JD0)))
    }

    fn from_bharani(jd: f64) -> Result<TropicalPositions, SearchError> {
        Ok(TropicalPositions::new(0.0, NAKSHATRA_SPAN_27 * (1.0 + jd - JD0)))
    }

    fn engine(provider: ProviderFn) -> PanchangEngine<ProviderFn> {
        let config = EngineConfig::default().with_zodiac(Zodiac::Tropical);
        PanchangEngine::new(provider, config).unwrap()
    }

    fn window() -> DayWindow {
        DayWindow::new(
            utc_from_jd(JD0 + 0.25, Rounding::Nearest),
            utc_from_jd(JD0 + 0.75, Rounding::Nearest),
            utc_from_jd(JD0 + 1.25, Rounding::Nearest),
        )
        .unwrap()
    }

    fn near(instant: &chrono::DateTime<chrono::Utc>, jd: f64) -> bool {
        (jd_from_utc(instant) - jd).abs() * SECONDS_PER_DAY <= 60.0
    }

    #[test]
    fn junction_members_merge() {
        // Uttara Bhadrapada from JD0 - 1, then Revati and Ashwini.
        let out = gand_mool_periods(&engine(from_revati), &window(), &CancelToken::new()).unwrap();
        assert_eq!(out.periods.len(), 1);
        let p = &out.periods[0];
        assert_eq!(p.precision, Precision::Exact);
        assert!(near(&p.start, JD0 - 1.0), "start {}", p.start);
        assert!(near(&p.end, JD0 + 2.0), "end {}", p.end);
        assert_eq!(
            p.description.as_deref(),
            Some("Moon in Uttara Bhadrapada and Ashwini")
        );
    }

    #[test]
    fn configured_set_replaces_default() {
        let mut config = EngineConfig::default().with_zodiac(Zodiac::Tropical);
        config.gand_mool_nakshatras = vec![Nakshatra::Revati, Nakshatra::Ashwini];
        let engine = PanchangEngine::new(from_revati as ProviderFn, config).unwrap();
        let out = gand_mool_periods(&engine, &window(), &CancelToken::new()).unwrap();
        assert_eq!(out.periods.len(), 1);
        let p = &out.periods[0];
        assert!(near(&p.start, JD0), "start {}", p.start);
        assert!(near(&p.end, JD0 + 2.0), "end {}", p.end);
        assert_eq!(p.description.as_deref(), Some("Moon in Revati and Ashwini"));
    }

    #[test]
    fn no_member_no_period() {
        let out =
            gand_mool_periods(&engine(from_bharani), &window(), &CancelToken::new()).unwrap();
        assert!(out.periods.is_empty());
    }
}
