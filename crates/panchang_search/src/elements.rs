//! Tithi, Karana, Yoga and Nakshatra timelines over one day.

use panchang_base::{DayWindow, Period, PeriodCategory, Precision, Rounding, utc_from_jd};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::boundary::{Sampler, find_transition_from};
use crate::boundary_types::{Direction, Transition};
use crate::cancel::CancelToken;
use crate::classifier::{
    KaranaClassifier, NakshatraClassifier, PeriodClassifier, TithiClassifier, YogaClassifier,
};
use crate::config::Horizons;
use crate::engine::{PanchangEngine, span_around};
use crate::ephemeris::{Body, EphemerisProvider};
use crate::error::SearchError;
use crate::timeline_types::{DetectorOutput, Diagnostic};

/// The four panchang elements with a day timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Tithi,
    Karana,
    Yoga,
    /// Moon nakshatra.
    Nakshatra,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [Self::Tithi, Self::Karana, Self::Yoga, Self::Nakshatra];

    pub const fn category(self) -> PeriodCategory {
        match self {
            Self::Tithi => PeriodCategory::Tithi,
            Self::Karana => PeriodCategory::Karana,
            Self::Yoga => PeriodCategory::Yoga,
            Self::Nakshatra => PeriodCategory::Nakshatra,
        }
    }

    pub fn classifier(self) -> &'static dyn PeriodClassifier {
        match self {
            Self::Tithi => &TithiClassifier,
            Self::Karana => &KaranaClassifier,
            Self::Yoga => &YogaClassifier,
            Self::Nakshatra => &NakshatraClassifier(Body::Moon),
        }
    }

    pub fn horizon_hours(self, horizons: &Horizons) -> f64 {
        match self {
            Self::Tithi => horizons.tithi_hours,
            Self::Karana => horizons.karana_hours,
            Self::Yoga => horizons.yoga_hours,
            Self::Nakshatra => horizons.nakshatra_hours,
        }
    }
}

fn worse(a: Precision, b: Precision) -> Precision {
    if a == Precision::Approximate || b == Precision::Approximate {
        Precision::Approximate
    } else {
        Precision::Exact
    }
}

/// First sample of the window that succeeds, stepping from sunrise.
///
/// Fails only when no sample in `[sunrise, next_sunrise)` can be taken.
fn first_sample<S: Sampler + ?Sized>(
    sampler: &mut S,
    window: &DayWindow,
    step: f64,
    label: &str,
    cancel: &CancelToken,
) -> Result<(f64, u16), SearchError> {
    let mut probe = window.sunrise_jd();
    loop {
        cancel.check()?;
        match sampler.bucket(probe) {
            Ok(bucket) => return Ok((probe, bucket)),
            Err(e) if e.is_recoverable() && probe + step < window.next_sunrise_jd() => {
                warn!(detector = label, jd = probe, error = %e, "element sample skipped");
                probe += step;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Consecutive buckets of `kind` covering `[sunrise, next_sunrise)`.
///
/// Each period carries its true start and end, so the first may begin
/// before sunrise and the last may end after the next sunrise. Neighbours
/// share one located boundary, rounded to the nearest second. All searches
/// of one timeline share a memo, and each search starts from a bucket that
/// is already known.
pub fn element_timeline<P: EphemerisProvider>(
    engine: &PanchangEngine<P>,
    window: &DayWindow,
    kind: ElementKind,
    cancel: &CancelToken,
) -> Result<DetectorOutput, SearchError> {
    let classifier = kind.classifier();
    let label = classifier.label();
    let search = engine
        .config()
        .search_with_horizon(kind.horizon_hours(&engine.config().horizons));
    search.validate().map_err(SearchError::InvalidConfig)?;
    let limit = window.next_sunrise_jd();
    let mut out = DetectorOutput::default();
    let mut sampler = engine.sampler(classifier);

    let (origin, origin_bucket) =
        first_sample(&mut sampler, window, search.step_days(), label, cancel)?;
    let span = span_around(&mut sampler, origin, origin_bucket, &search, cancel)?;
    let (mut start, mut start_precision) = match span.start {
        Transition::Found(b) => (b.instant(Direction::Backward), b.precision),
        Transition::NotFound { .. } => {
            warn!(detector = label, "element start not found, using sunrise");
            out.diagnostics.push(Diagnostic::NoTransitionFound {
                detector: label.to_string(),
                from: window.sunrise(),
            });
            (window.sunrise(), Precision::Approximate)
        }
    };
    let mut bucket = span.bucket;
    let mut end_transition = span.end;

    loop {
        let period = |end, precision| {
            Period::new(
                kind.category(),
                classifier.bucket_name(bucket),
                start,
                end,
                classifier.nature(bucket),
            )
            .with_precision(precision)
        };
        match end_transition {
            Transition::Found(b) if b.jd >= limit => {
                let end = b.instant(Direction::Forward);
                out.periods
                    .push(period(end, worse(start_precision, b.precision)));
                break;
            }
            Transition::Found(b) => {
                let end = utc_from_jd(b.jd, Rounding::Nearest);
                out.periods
                    .push(period(end, worse(start_precision, b.precision)));
                start = end;
                start_precision = b.precision;
                bucket = b.to_bucket;
                end_transition = find_transition_from(
                    &mut sampler,
                    b.outside_jd,
                    b.to_bucket,
                    Direction::Forward,
                    None,
                    &search,
                    cancel,
                )?;
            }
            Transition::NotFound { .. } => {
                warn!(detector = label, "element end not found, using next sunrise");
                out.diagnostics.push(Diagnostic::NoTransitionFound {
                    detector: label.to_string(),
                    from: start,
                });
                out.periods
                    .push(period(window.next_sunrise(), Precision::Approximate));
                break;
            }
        }
    }

    out.record_skipped(label, sampler.take_skipped());
    debug!(detector = label, count = out.periods.len(), "element timeline built");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::ephemeris::TropicalPositions;
    use panchang_base::{SECONDS_PER_DAY, Zodiac, jd_from_utc};

    // Midnight UTC; tithis last exactly one day, karanas half a day.
    const JD0: f64 = 2_460_000.5;

    type LinearFn = fn(f64) -> Result<TropicalPositions, SearchError>;

    fn linear(jd: f64) -> Result<TropicalPositions, SearchError> {
        Ok(TropicalPositions::new(0.0, 12.0 * (jd - JD0)))
    }

    fn engine() -> PanchangEngine<LinearFn> {
        let config = EngineConfig::default().with_zodiac(Zodiac::Tropical);
        PanchangEngine::new(linear as LinearFn, config).unwrap()
    }

    fn window() -> DayWindow {
        DayWindow::new(
            utc_from_jd(JD0 + 2.25, Rounding::Nearest),
            utc_from_jd(JD0 + 2.75, Rounding::Nearest),
            utc_from_jd(JD0 + 3.25, Rounding::Nearest),
        )
        .unwrap()
    }

    fn near(instant: &chrono::DateTime<chrono::Utc>, jd: f64) -> bool {
        (jd_from_utc(instant) - jd).abs() * SECONDS_PER_DAY <= 60.0
    }

    #[test]
    fn tithis_extend_past_the_window() {
        let out = element_timeline(&engine(), &window(), ElementKind::Tithi, &CancelToken::new())
            .unwrap();
        assert!(out.diagnostics.is_empty());
        let names: Vec<_> = out.periods.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Shukla Tritiya", "Shukla Chaturthi"]);
        assert!(near(&out.periods[0].start, JD0 + 2.0));
        assert!(near(&out.periods[0].end, JD0 + 3.0));
        assert_eq!(out.periods[0].end, out.periods[1].start);
        assert!(near(&out.periods[1].end, JD0 + 4.0));
    }

    #[test]
    fn karanas_are_contiguous() {
        let out = element_timeline(&engine(), &window(), ElementKind::Karana, &CancelToken::new())
            .unwrap();
        assert_eq!(out.periods.len(), 3);
        for pair in out.periods.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert!(out.periods.iter().all(|p| p.precision == Precision::Exact));
    }
}
