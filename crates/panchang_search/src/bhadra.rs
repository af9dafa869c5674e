//! Bhadra (Vishti karana) detection.
//!
//! The day window is scanned with the karana classifier. When a probe lands
//! in Vishti, the karana's start is searched backward and its end is taken
//! per [`BhadraEndMode`]. The scan then resumes past the end.

use panchang_base::{
    DayWindow, Period, PeriodCategory, PeriodType, Precision, Rashi, Rounding, SECONDS_PER_DAY,
    karana_from_index, rashi_from_longitude, utc_from_jd,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::boundary::{Sampler, find_transition_from};
use crate::boundary_types::{Direction, SearchConfig, Transition};
use crate::cancel::CancelToken;
use crate::classifier::KaranaClassifier;
use crate::config::BhadraEndMode;
use crate::engine::PanchangEngine;
use crate::ephemeris::EphemerisProvider;
use crate::error::SearchError;
use crate::timeline_types::{DetectorOutput, Diagnostic};

const DETECTOR: &str = "bhadra";

/// Where Bhadra resides, from the Moon's rashi at its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BhadraResidence {
    /// Heaven: Moon in Mesha, Vrishabha, Mithuna or Vrischika.
    Swarga,
    /// Netherworld: Moon in Kanya, Tula, Dhanu or Makara.
    Patala,
    /// Earth: Moon in Karka, Simha, Kumbha or Meena. The only residence
    /// where Bhadra's effect is felt.
    Prithvi,
}

impl BhadraResidence {
    pub const fn from_moon_rashi(rashi: Rashi) -> Self {
        match rashi {
            Rashi::Mesha | Rashi::Vrishabha | Rashi::Mithuna | Rashi::Vrischika => Self::Swarga,
            Rashi::Kanya | Rashi::Tula | Rashi::Dhanu | Rashi::Makara => Self::Patala,
            Rashi::Karka | Rashi::Simha | Rashi::Kumbha | Rashi::Meena => Self::Prithvi,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Swarga => "Swarga",
            Self::Patala => "Patala",
            Self::Prithvi => "Prithvi",
        }
    }
}

fn is_vishti(bucket: u16) -> bool {
    karana_from_index(bucket).is_vishti()
}

/// Edge of the Vishti karana sampled at `jd`, or `None` when the horizon
/// holds no change. A recoverable failure is treated like "not found".
fn search_edge<S: Sampler + ?Sized>(
    sampler: &mut S,
    jd: f64,
    bucket: u16,
    direction: Direction,
    search: &SearchConfig,
    cancel: &CancelToken,
) -> Result<Option<(f64, Precision)>, SearchError> {
    match find_transition_from(sampler, jd, bucket, direction, None, search, cancel) {
        Ok(Transition::Found(b)) => Ok(Some((b.jd, b.precision))),
        Ok(Transition::NotFound { .. }) => Ok(None),
        Err(e) if e.is_recoverable() => Ok(None),
        Err(e) => Err(e),
    }
}

fn description<P: EphemerisProvider>(engine: &PanchangEngine<P>, start_jd: f64) -> String {
    match engine.snapshot_at_jd(start_jd) {
        Ok(snap) => {
            let rashi = rashi_from_longitude(snap.moon_longitude).rashi;
            format!(
                "Vishti karana; Bhadra in {} (Moon in {})",
                BhadraResidence::from_moon_rashi(rashi).name(),
                rashi.name()
            )
        }
        Err(e) => {
            debug!(jd = start_jd, error = %e, "bhadra residence unavailable for description");
            "Vishti karana".to_string()
        }
    }
}

/// Bhadra periods touching `[sunrise, next_sunrise)`.
#[instrument(skip_all, fields(sunrise = %window.sunrise()))]
pub fn bhadra_periods<P: EphemerisProvider>(
    engine: &PanchangEngine<P>,
    window: &DayWindow,
    cancel: &CancelToken,
) -> Result<DetectorOutput, SearchError> {
    let config = engine.config();
    let search = config.search_with_horizon(config.horizons.karana_hours);
    search.validate().map_err(SearchError::InvalidConfig)?;
    let step = search.step_days();
    let tol = search.tolerance_days();
    let policy = config.fallback;
    let nominal_days = policy.bhadra_nominal_hours / 24.0;
    let limit = window.next_sunrise_jd();
    let last_probe = limit - tol;

    let mut out = DetectorOutput::default();
    let mut sampler = engine.sampler(&KaranaClassifier);
    let mut last_start: Option<f64> = None;
    let mut probe = window.sunrise_jd();

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
                warn!(jd = probe, error = %e, "bhadra probe skipped");
                probe = next(probe);
                continue;
            }
            Err(e) => return Err(e),
        };
        if !is_vishti(bucket) {
            probe = next(probe);
            continue;
        }

        let mut edge = |direction| {
            search_edge(&mut sampler, probe, bucket, direction, &search, cancel)
        };
        let (start_jd, start_precision) = match edge(Direction::Backward)? {
            Some(found) => found,
            None => {
                let jd = probe - policy.bhadra_start_offset_hours / 24.0;
                out.diagnostics.push(Diagnostic::FallbackUsed {
                    detector: DETECTOR.to_string(),
                    fallback: "bhadra_start_offset_hours".to_string(),
                    at: utc_from_jd(probe, Rounding::Nearest),
                });
                warn!("bhadra start not found, using fallback offset");
                (jd, Precision::Approximate)
            }
        };

        if last_start.is_some_and(|s| (s - start_jd).abs() <= tol) {
            probe = next(probe);
            continue;
        }
        last_start = Some(start_jd);

        let nominal_end_jd = start_jd + nominal_days;
        let (end_jd, end_precision) = match config.bhadra_end_mode {
            BhadraEndMode::NominalDuration => (nominal_end_jd.min(limit), Precision::Approximate),
            BhadraEndMode::ForwardSearch => {
                match edge(Direction::Forward)? {
                    Some((jd, precision)) => {
                        let diff_days = jd - nominal_end_jd;
                        if diff_days.abs() > tol {
                            let difference_seconds = (diff_days * SECONDS_PER_DAY).round() as i64;
                            warn!(difference_seconds, "bhadra end differs from nominal duration");
                            out.diagnostics.push(Diagnostic::BhadraEndDisagreement {
                                searched_end: utc_from_jd(jd, Rounding::Ceil),
                                nominal_end: utc_from_jd(nominal_end_jd, Rounding::Ceil),
                                difference_seconds,
                            });
                        }
                        (jd, precision)
                    }
                    None => {
                        out.diagnostics.push(Diagnostic::FallbackUsed {
                            detector: DETECTOR.to_string(),
                            fallback: "bhadra_nominal_hours".to_string(),
                            at: utc_from_jd(probe, Rounding::Nearest),
                        });
                        warn!("bhadra end not found, using nominal duration");
                        (nominal_end_jd.min(limit), Precision::Approximate)
                    }
                }
            }
        };

        let precision = if start_precision == Precision::Exact && end_precision == Precision::Exact
        {
            Precision::Exact
        } else {
            Precision::Approximate
        };
        let start = utc_from_jd(start_jd, Rounding::Floor);
        let end = utc_from_jd(end_jd, Rounding::Ceil);
        if start < end {
            debug!(%start, %end, "bhadra located");
            out.periods.push(
                Period::new(
                    PeriodCategory::Bhadra,
                    "Bhadra (Vishti)",
                    start,
                    end,
                    PeriodType::Inauspicious,
                )
                .with_description(description(engine, start_jd))
                .with_precision(precision),
            );
        }
        probe = next(end_jd.max(probe));
    }

    out.record_skipped(DETECTOR, sampler.take_skipped());
    Ok(out)
}
