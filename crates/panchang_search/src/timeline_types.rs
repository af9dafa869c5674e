//! Types produced by the detectors and the day timeline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use panchang_base::{DayWindow, Period, PeriodCategory, Rounding, Vaar, utc_from_jd};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Something a detector had to work around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An ephemeris sample failed and was skipped.
    SampleSkipped {
        detector: String,
        at: DateTime<Utc>,
        reason: String,
    },
    /// A boundary was not found and a [`FallbackPolicy`](crate::FallbackPolicy)
    /// value was used instead.
    FallbackUsed {
        detector: String,
        fallback: String,
        at: DateTime<Utc>,
    },
    /// A boundary was not found within the horizon and the window edge was
    /// used instead.
    NoTransitionFound {
        detector: String,
        from: DateTime<Utc>,
    },
    /// The searched Bhadra end differs from start + nominal duration.
    BhadraEndDisagreement {
        searched_end: DateTime<Utc>,
        nominal_end: DateTime<Utc>,
        difference_seconds: i64,
    },
    /// A whole detector failed; its periods are missing from the report.
    DetectorFailed { detector: String, reason: String },
}

impl Diagnostic {
    pub(crate) fn sample_skipped(detector: &str, at: DateTime<Utc>, err: &SearchError) -> Self {
        Self::SampleSkipped {
            detector: detector.to_string(),
            at,
            reason: err.to_string(),
        }
    }
}

/// Periods from one detector plus what it had to work around.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorOutput {
    pub periods: Vec<Period>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DetectorOutput {
    pub fn from_periods(periods: Vec<Period>) -> Self {
        Self {
            periods,
            diagnostics: Vec::new(),
        }
    }

    pub fn extend(&mut self, other: DetectorOutput) {
        self.periods.extend(other.periods);
        self.diagnostics.extend(other.diagnostics);
    }

    /// One `SampleSkipped` per failed sample (JD UT, error).
    pub(crate) fn record_skipped(&mut self, detector: &str, skipped: Vec<(f64, SearchError)>) {
        for (jd, e) in skipped {
            let at = utc_from_jd(jd, Rounding::Nearest);
            self.diagnostics
                .push(Diagnostic::sample_skipped(detector, at, &e));
        }
    }
}

/// Everything computed for one sunrise-to-sunrise day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    pub window: DayWindow,
    pub vaar: Vaar,
    /// Ordered by (start, end, category).
    pub periods: Vec<Period>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DayReport {
    pub fn to_json(&self) -> Result<String, SearchError> {
        serde_json::to_string_pretty(self).map_err(|e| SearchError::Serialization(e.to_string()))
    }

    /// Periods grouped by category, each group in start order.
    pub fn by_category(&self) -> BTreeMap<PeriodCategory, Vec<&Period>> {
        let mut map: BTreeMap<PeriodCategory, Vec<&Period>> = BTreeMap::new();
        for p in &self.periods {
            map.entry(p.category).or_default().push(p);
        }
        map
    }

    pub fn periods_of(&self, category: PeriodCategory) -> impl Iterator<Item = &Period> {
        self.periods.iter().filter(move |p| p.category == category)
    }

    pub fn has_approximations(&self) -> bool {
        self.periods.iter().any(Period::is_approximate)
    }
}
