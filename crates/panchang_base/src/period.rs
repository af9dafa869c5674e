//! Period records and the sunrise-bounded day window.
//!
//! A [`Period`] is the unit every detector produces: a named half-open span
//! `[start, end)` with a nature, a category and a precision flag. A
//! [`DayWindow`] is the caller-supplied `sunrise < sunset < next_sunrise`
//! triple that bounds one Vedic day.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::julian::jd_from_utc;

/// Nature of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Auspicious,
    Inauspicious,
    Neutral,
}

/// Whether a period's boundaries were located or fell back to a nominal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Boundaries located by search or derived from the day window.
    #[default]
    Exact,
    /// At least one boundary came from a fallback or an unconverged search.
    Approximate,
}

/// Which detector or division produced a period.
///
/// Declaration order is the tie-break order of the merged day timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodCategory {
    Tithi,
    Karana,
    Yoga,
    Nakshatra,
    Choghadiya,
    Hora,
    Lagna,
    RahuKaal,
    YamaGhanta,
    GulikaKaal,
    Abhijit,
    DurMuhurta,
    Ardhaprahara,
    Bhadra,
    GandMool,
}

impl PeriodCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tithi => "tithi",
            Self::Karana => "karana",
            Self::Yoga => "yoga",
            Self::Nakshatra => "nakshatra",
            Self::Choghadiya => "choghadiya",
            Self::Hora => "hora",
            Self::Lagna => "lagna",
            Self::RahuKaal => "rahu_kaal",
            Self::YamaGhanta => "yama_ghanta",
            Self::GulikaKaal => "gulika_kaal",
            Self::Abhijit => "abhijit",
            Self::DurMuhurta => "dur_muhurta",
            Self::Ardhaprahara => "ardhaprahara",
            Self::Bhadra => "bhadra",
            Self::GandMool => "gand_mool",
        }
    }
}

/// Daytime `[sunrise, sunset)` or night `[sunset, next_sunrise)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayHalf {
    Day,
    Night,
}

/// A named calendar period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub period_type: PeriodType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: PeriodCategory,
    #[serde(default)]
    pub precision: Precision,
}

impl Period {
    /// An exact period without description.
    pub fn new(
        category: PeriodCategory,
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_type: PeriodType,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            period_type,
            description: None,
            category,
            precision: Precision::Exact,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn is_approximate(&self) -> bool {
        self.precision == Precision::Approximate
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whether `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// Whether the two half-open spans share any instant.
    pub fn overlaps(&self, other: &Period) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Sunrise, sunset and the following sunrise of one Vedic day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayWindow {
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
    next_sunrise: DateTime<Utc>,
}

impl DayWindow {
    /// Build a window, enforcing `sunrise < sunset < next_sunrise`.
    pub fn new(
        sunrise: DateTime<Utc>,
        sunset: DateTime<Utc>,
        next_sunrise: DateTime<Utc>,
    ) -> Result<Self, VedicError> {
        if sunrise >= sunset {
            return Err(VedicError::InvalidDayWindow(format!(
                "sunrise {sunrise} is not before sunset {sunset}"
            )));
        }
        if sunset >= next_sunrise {
            return Err(VedicError::InvalidDayWindow(format!(
                "sunset {sunset} is not before next sunrise {next_sunrise}"
            )));
        }
        Ok(Self {
            sunrise,
            sunset,
            next_sunrise,
        })
    }

    pub fn sunrise(&self) -> DateTime<Utc> {
        self.sunrise
    }

    pub fn sunset(&self) -> DateTime<Utc> {
        self.sunset
    }

    pub fn next_sunrise(&self) -> DateTime<Utc> {
        self.next_sunrise
    }

    pub fn sunrise_jd(&self) -> f64 {
        jd_from_utc(&self.sunrise)
    }

    pub fn sunset_jd(&self) -> f64 {
        jd_from_utc(&self.sunset)
    }

    pub fn next_sunrise_jd(&self) -> f64 {
        jd_from_utc(&self.next_sunrise)
    }

    pub fn day_duration(&self) -> TimeDelta {
        self.sunset - self.sunrise
    }

    pub fn night_duration(&self) -> TimeDelta {
        self.next_sunrise - self.sunset
    }

    /// `[start, end)` of one half.
    pub fn half_bounds(&self, half: DayHalf) -> (DateTime<Utc>, DateTime<Utc>) {
        match half {
            DayHalf::Day => (self.sunrise, self.sunset),
            DayHalf::Night => (self.sunset, self.next_sunrise),
        }
    }

    /// Whether `instant` lies in `[sunrise, next_sunrise)`.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.sunrise <= *instant && *instant < self.next_sunrise
    }

    /// The `index`-th of `parts` equal slices of a half.
    ///
    /// Slice edges are computed in integer milliseconds from the half's
    /// start, so consecutive slices share edges exactly and the last slice
    /// ends on the half's end. `parts` must be non-zero; `index` is clamped
    /// to `parts - 1`.
    pub fn portion(
        &self,
        half: DayHalf,
        index: u32,
        parts: u32,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, end) = self.half_bounds(half);
        let parts = parts.max(1);
        let index = index.min(parts - 1);
        let total_ms = i128::from((end - start).num_milliseconds());
        let edge = |i: u32| -> DateTime<Utc> {
            if i >= parts {
                return end;
            }
            let ms = total_ms * i128::from(i) / i128::from(parts);
            start + TimeDelta::milliseconds(ms as i64)
        };
        (edge(index), edge(index + 1))
    }

    /// All `parts` equal slices of a half, in order.
    pub fn split(&self, half: DayHalf, parts: u32) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        (0..parts.max(1))
            .map(|i| self.portion(half, i, parts))
            .collect()
    }
}
