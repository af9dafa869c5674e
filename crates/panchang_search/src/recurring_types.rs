//! Types for the recurring event finder.

use chrono::{DateTime, NaiveDate, Utc};
use panchang_base::{
    DayWindow, GeoLocation, Karana, Masa, Paksha, Precision, TITHI_COUNT, tithi_index,
};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Source of sunrise/sunset windows for calendar dates.
pub trait DayBoundaryProvider {
    /// Window of the Vedic day starting at the sunrise of `date`.
    ///
    /// Polar days and nights, and any provider failure, are reported as
    /// [`SearchError::InvalidDayWindow`].
    fn day_window(&self, date: NaiveDate, location: &GeoLocation)
    -> Result<DayWindow, SearchError>;
}

impl<F> DayBoundaryProvider for F
where
    F: Fn(NaiveDate, &GeoLocation) -> Result<DayWindow, SearchError>,
{
    fn day_window(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
    ) -> Result<DayWindow, SearchError> {
        self(date, location)
    }
}

/// What to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecurringTarget {
    /// A tithi by paksha and 1-based number (1-15), optionally restricted to
    /// one masa.
    Tithi {
        paksha: Paksha,
        number: u8,
        #[serde(default)]
        masa: Option<Masa>,
    },
    /// Any instance of a karana name.
    Karana { karana: Karana },
}

impl RecurringTarget {
    pub fn tithi(paksha: Paksha, number: u8) -> Self {
        Self::Tithi {
            paksha,
            number,
            masa: None,
        }
    }

    pub fn with_masa(self, masa: Masa) -> Self {
        match self {
            Self::Tithi { paksha, number, .. } => Self::Tithi {
                paksha,
                number,
                masa: Some(masa),
            },
            other => other,
        }
    }

    /// 0-based tithi index of a tithi target.
    pub fn tithi_index(&self) -> Result<Option<u16>, SearchError> {
        match *self {
            Self::Tithi { paksha, number, .. } => Ok(Some(tithi_index(paksha, number)?)),
            Self::Karana { .. } => Ok(None),
        }
    }

    /// Tithi index immediately before a tithi target.
    pub(crate) fn preceding_tithi(&self) -> Result<Option<u16>, SearchError> {
        Ok(self
            .tithi_index()?
            .map(|i| (i + TITHI_COUNT - 1) % TITHI_COUNT))
    }

    pub fn masa(&self) -> Option<Masa> {
        match *self {
            Self::Tithi { masa, .. } => masa,
            Self::Karana { .. } => None,
        }
    }
}

/// A year scan request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecurringQuery {
    pub year: i32,
    pub location: GeoLocation,
    pub target: RecurringTarget,
    /// Also report tithis that begin and end between two sunrises.
    #[serde(default)]
    pub include_kshaya: bool,
}

/// One matching day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Civil date whose sunrise window contains the match.
    pub date: NaiveDate,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub precision: Precision,
    /// Prevails at no sunrise.
    #[serde(default)]
    pub kshaya: bool,
    /// Set when a masa filter was checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adhika: Option<bool>,
}

/// A date that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDay {
    pub date: NaiveDate,
    pub reason: String,
}

/// Result of a year scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringReport {
    /// Chronological, at most one per tithi or karana instance.
    pub occurrences: Vec<Occurrence>,
    pub skipped: Vec<SkippedDay>,
}
