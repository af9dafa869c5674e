//! Day/night segmentation: Choghadiya, Hora and Lagna.
//!
//! Choghadiya and Hora are equal divisions of daytime and nighttime and
//! need no ephemeris. Lagna windows come from ascendant rashi transits
//! located with the boundary search.

use chrono::{DateTime, Utc};
use panchang_base::{
    CHOGHADIYA_PER_HALF, DayHalf, DayWindow, HoraScheme, Period, PeriodCategory, PeriodType,
    Precision, Rashi, Rounding, Vaar, choghadiya_at, hora_lord, utc_from_jd,
};
use tracing::debug;

use crate::boundary_types::{Direction, Transition};
use crate::cancel::CancelToken;
use crate::classifier::RashiClassifier;
use crate::engine::PanchangEngine;
use crate::ephemeris::{Body, EphemerisProvider};
use crate::error::SearchError;
use crate::timeline_types::DetectorOutput;

const HALVES: [DayHalf; 2] = [DayHalf::Day, DayHalf::Night];

fn half_label(half: DayHalf) -> &'static str {
    match half {
        DayHalf::Day => "day",
        DayHalf::Night => "night",
    }
}

/// 8 day and 8 night choghadiyas tiling `[sunrise, next_sunrise)`.
pub fn choghadiya_periods(window: &DayWindow, vaar: Vaar) -> Vec<Period> {
    let mut periods = Vec::with_capacity(2 * CHOGHADIYA_PER_HALF as usize);
    for half in HALVES {
        for (i, (start, end)) in window.split(half, CHOGHADIYA_PER_HALF).into_iter().enumerate() {
            let c = choghadiya_at(vaar, half, i);
            periods.push(
                Period::new(PeriodCategory::Choghadiya, c.name(), start, end, c.nature())
                    .with_description(format!(
                        "{} choghadiya {} of {}",
                        half_label(half),
                        i + 1,
                        CHOGHADIYA_PER_HALF
                    )),
            );
        }
    }
    periods
}

/// Horas tiling `[sunrise, next_sunrise)`, named after their lords.
pub fn hora_periods(window: &DayWindow, vaar: Vaar, scheme: HoraScheme) -> Vec<Period> {
    let per_half = scheme.per_half();
    let mut periods = Vec::with_capacity(2 * per_half as usize);
    for half in HALVES {
        for (i, (start, end)) in window.split(half, per_half).into_iter().enumerate() {
            let lord = hora_lord(vaar, half, i, scheme);
            periods.push(
                Period::new(
                    PeriodCategory::Hora,
                    format!("{} Hora", lord.name()),
                    start,
                    end,
                    lord.hora_nature(),
                )
                .with_description(format!("{} hora of {}", lord.english_name(), half_label(half))),
            );
        }
    }
    periods
}

fn lagna_period(
    bucket: u16,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    precision: Precision,
) -> Period {
    let rashi = Rashi::from_index(bucket);
    Period::new(
        PeriodCategory::Lagna,
        format!("{} Lagna", rashi.name()),
        start,
        end,
        PeriodType::Neutral,
    )
    .with_description(format!("{} rising, lord {}", rashi.western_name(), rashi.lord().name()))
    .with_precision(precision)
}

/// Ascendant rashi windows tiling `[sunrise, next_sunrise)`.
///
/// Consecutive windows share each located transit (rounded to the nearest
/// second). The sign rising at sunrise usually returns shortly before the
/// next sunrise, giving 13 windows.
pub fn lagna_periods<P: EphemerisProvider>(
    engine: &PanchangEngine<P>,
    window: &DayWindow,
    cancel: &CancelToken,
) -> Result<DetectorOutput, SearchError> {
    engine.location()?;
    let classifier = RashiClassifier(Body::Ascendant);
    let search = engine.config().lagna_search;
    let limit = window.next_sunrise_jd();

    let mut cursor = window.sunrise_jd();
    let mut bucket = engine.bucket_at(&classifier, cursor)?;
    let mut start = window.sunrise();
    let mut start_precision = Precision::Exact;
    let mut periods = Vec::new();

    while cursor < limit {
        let found = engine.locate_from_jd(
            &classifier,
            cursor,
            bucket,
            Direction::Forward,
            Some(limit),
            &search,
            cancel,
        )?;
        match found {
            Transition::Found(b) => {
                let end = utc_from_jd(b.jd, Rounding::Nearest);
                let precision = if start_precision == Precision::Approximate {
                    Precision::Approximate
                } else {
                    b.precision
                };
                if end > start {
                    periods.push(lagna_period(bucket, start, end, precision));
                    start = end;
                }
                start_precision = b.precision;
                bucket = b.to_bucket;
                cursor = b.outside_jd;
            }
            Transition::NotFound { scanned_to_jd, .. } => {
                if scanned_to_jd <= cursor {
                    break;
                }
                cursor = scanned_to_jd;
            }
        }
    }

    if window.next_sunrise() > start {
        periods.push(lagna_period(bucket, start, window.next_sunrise(), start_precision));
    }
    debug!(count = periods.len(), "lagna windows located");
    Ok(DetectorOutput::from_periods(periods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use panchang_base::Choghadiya;

    fn window() -> DayWindow {
        DayWindow::new(
            Utc.with_ymd_and_hms(2024, 3, 9, 6, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 9, 18, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 10, 6, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn assert_tiles(periods: &[Period], w: &DayWindow) {
        assert_eq!(periods.first().map(|p| p.start), Some(w.sunrise()));
        assert_eq!(periods.last().map(|p| p.end), Some(w.next_sunrise()));
        for pair in periods.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn saturday_choghadiya() {
        let w = window();
        let p = choghadiya_periods(&w, Vaar::Shanivaar);
        assert_eq!(p.len(), 16);
        assert_tiles(&p, &w);
        assert_eq!(p[0].name, Choghadiya::Kaal.name());
        assert_eq!(p[0].end, Utc.with_ymd_and_hms(2024, 3, 9, 7, 30, 0).unwrap());
        assert_eq!(p[8].start, w.sunset());
    }

    #[test]
    fn octal_and_classical_hora() {
        let w = window();
        let octal = hora_periods(&w, Vaar::Ravivaar, HoraScheme::Octal);
        assert_eq!(octal.len(), 16);
        assert_tiles(&octal, &w);
        assert_eq!(octal[0].name, "Surya Hora");
        assert_eq!(octal[8].name, "Guru Hora");

        let classical = hora_periods(&w, Vaar::Ravivaar, HoraScheme::Classical);
        assert_eq!(classical.len(), 24);
        assert_tiles(&classical, &w);
        assert_eq!(classical[0].end, Utc.with_ymd_and_hms(2024, 3, 9, 7, 0, 0).unwrap());
        assert_eq!(classical[12].name, "Guru Hora");
        // The sequence continues into Monday's Chandra hora.
        assert_eq!(classical[23].name, "Buddh Hora");
    }
}
