//! Recurring event finder: every day of a year on which a tithi or karana
//! prevails at sunrise.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use panchang_base::{DayWindow, Precision, karana_from_index};
use tracing::{debug, info, instrument, warn};

use crate::boundary_types::{Direction, SearchConfig, Transition};
use crate::cancel::CancelToken;
use crate::classifier::{KaranaClassifier, PeriodClassifier, TithiClassifier};
use crate::engine::PanchangEngine;
use crate::ephemeris::EphemerisProvider;
use crate::error::SearchError;
use crate::masa::masa_at;
use crate::recurring_types::{
    DayBoundaryProvider, Occurrence, RecurringQuery, RecurringReport, RecurringTarget, SkippedDay,
};

/// Per-day failure handling: aborts propagate, everything else skips the day.
macro_rules! or_skip {
    ($expr:expr, $report:expr, $date:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) if e.is_abort() => return Err(e),
            Err(e) => {
                warn!(date = %$date, error = %e, "day skipped");
                $report.skipped.push(SkippedDay {
                    date: $date,
                    reason: e.to_string(),
                });
                continue;
            }
        }
    };
}

struct Matcher {
    target: RecurringTarget,
    tithi: Option<u16>,
}

impl Matcher {
    fn new(target: RecurringTarget) -> Result<Self, SearchError> {
        Ok(Self {
            target,
            tithi: target.tithi_index()?,
        })
    }

    fn classifier(&self) -> &'static dyn PeriodClassifier {
        match self.target {
            RecurringTarget::Tithi { .. } => &TithiClassifier,
            RecurringTarget::Karana { .. } => &KaranaClassifier,
        }
    }

    fn matches(&self, bucket: u16) -> bool {
        match self.target {
            RecurringTarget::Tithi { .. } => self.tithi == Some(bucket),
            RecurringTarget::Karana { karana } => karana_from_index(bucket) == karana,
        }
    }
}

/// Outward-rounded instants of a located span. Missing edges fall back to
/// the window and make the result approximate.
fn span_instants(
    start: &Transition,
    end: &Transition,
    window: &DayWindow,
) -> (DateTime<Utc>, DateTime<Utc>, Precision) {
    let mut precision = Precision::Exact;
    let mut edge = |t: &Transition, direction: Direction, fallback: DateTime<Utc>| match t {
        Transition::Found(b) => {
            if b.precision == Precision::Approximate {
                precision = Precision::Approximate;
            }
            b.instant(direction)
        }
        Transition::NotFound { .. } => {
            precision = Precision::Approximate;
            fallback
        }
    };
    let s = edge(start, Direction::Backward, window.sunrise());
    let e = edge(end, Direction::Forward, window.next_sunrise());
    (s, e, precision)
}

/// A tithi that starts after this sunrise and ends before the next one.
fn kshaya_span<P: EphemerisProvider>(
    engine: &PanchangEngine<P>,
    window: &DayWindow,
    classifier: &dyn PeriodClassifier,
    sunrise_bucket: u16,
    search: &SearchConfig,
    cancel: &CancelToken,
) -> Result<Option<(Transition, Transition)>, SearchError> {
    let limit = window.next_sunrise_jd();
    let first_end = engine.locate_from_jd(
        classifier,
        window.sunrise_jd(),
        sunrise_bucket,
        Direction::Forward,
        Some(limit),
        search,
        cancel,
    )?;
    let Some(start) = first_end.boundary().copied() else {
        return Ok(None);
    };
    let second_end = engine.locate_from_jd(
        classifier,
        start.outside_jd,
        start.to_bucket,
        Direction::Forward,
        Some(limit),
        search,
        cancel,
    )?;
    Ok(second_end
        .boundary()
        .map(|_| (Transition::Found(start), second_end)))
}

/// Scan every civil date of `query.year`.
///
/// A date whose window or sunrise sample cannot be computed is recorded in
/// [`RecurringReport::skipped`]; cancellation aborts the whole scan.
#[instrument(skip_all, fields(year = query.year))]
pub fn find_recurring<P, D>(
    engine: &PanchangEngine<P>,
    days: &D,
    query: &RecurringQuery,
    cancel: &CancelToken,
) -> Result<RecurringReport, SearchError>
where
    P: EphemerisProvider,
    D: DayBoundaryProvider + ?Sized,
{
    query.location.validate()?;
    let matcher = Matcher::new(query.target)?;
    let preceding = query.target.preceding_tithi()?;
    let classifier = matcher.classifier();
    let horizons = &engine.config().horizons;
    let search = engine.config().search_with_horizon(match query.target {
        RecurringTarget::Tithi { .. } => horizons.tithi_hours,
        RecurringTarget::Karana { .. } => horizons.karana_hours,
    });
    let first = NaiveDate::from_ymd_opt(query.year, 1, 1)
        .ok_or(SearchError::InvalidRequest("year out of range"))?;

    let mut report = RecurringReport::default();
    // End (JD) of the last reported instance; a later sunrise before it
    // sees the same instance again.
    let mut covered_until = f64::NEG_INFINITY;

    for date in first.iter_days().take_while(|d| d.year() == query.year) {
        cancel.check()?;
        let window = or_skip!(days.day_window(date, &query.location), report, date);
        let sunrise = window.sunrise_jd();
        let bucket = or_skip!(engine.bucket_at(classifier, sunrise), report, date);

        let (start, end, kshaya) = if matcher.matches(bucket) {
            if sunrise < covered_until {
                debug!(%date, "same instance as previous sunrise");
                continue;
            }
            let span = or_skip!(
                engine.bucket_span_from_jd(classifier, sunrise, bucket, &search, cancel),
                report,
                date
            );
            (span.start, span.end, false)
        } else if query.include_kshaya && preceding == Some(bucket) {
            let found = or_skip!(
                kshaya_span(engine, &window, classifier, bucket, &search, cancel),
                report,
                date
            );
            match found {
                Some((start, end))
                    if start.boundary().is_some_and(|b| matcher.matches(b.to_bucket)) =>
                {
                    (start, end, true)
                }
                _ => continue,
            }
        } else {
            continue;
        };

        let adhika = match query.target.masa() {
            Some(wanted) => {
                let info = or_skip!(masa_at(engine, &window.sunrise(), cancel), report, date);
                if info.masa != wanted {
                    continue;
                }
                Some(info.adhika)
            }
            None => None,
        };

        if let Some(b) = end.boundary() {
            covered_until = b.jd;
        }
        let name_bucket = match (&start, kshaya) {
            (Transition::Found(b), true) => b.to_bucket,
            _ => bucket,
        };
        let (start, end, precision) = span_instants(&start, &end, &window);
        report.occurrences.push(Occurrence {
            date,
            name: classifier.bucket_name(name_bucket),
            start,
            end,
            precision,
            kshaya,
            adhika,
        });
    }

    info!(
        year = query.year,
        occurrences = report.occurrences.len(),
        skipped = report.skipped.len(),
        "recurring scan finished"
    );
    Ok(report)
}
