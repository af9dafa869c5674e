//! Ephemeris adapter: the provider seam and the snapshots built from it.

use chrono::{DateTime, Utc};
use panchang_base::{Rounding, angular_delta, normalize_360, utc_from_jd};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Geocentric tropical ecliptic longitudes of the luminaries, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TropicalPositions {
    pub sun_longitude_deg: f64,
    pub moon_longitude_deg: f64,
}

impl TropicalPositions {
    pub fn new(sun_longitude_deg: f64, moon_longitude_deg: f64) -> Self {
        Self {
            sun_longitude_deg,
            moon_longitude_deg,
        }
    }
}

/// Source of Sun and Moon positions.
///
/// Implementations return [`SearchError::EphemerisUnavailable`] when a
/// single instant cannot be served; callers treat that as a skippable
/// sample.
pub trait EphemerisProvider {
    /// Positions at a UT Julian Date.
    fn tropical_positions(&self, jd_ut: f64) -> Result<TropicalPositions, SearchError>;
}

impl<F> EphemerisProvider for F
where
    F: Fn(f64) -> Result<TropicalPositions, SearchError>,
{
    fn tropical_positions(&self, jd_ut: f64) -> Result<TropicalPositions, SearchError> {
        self(jd_ut)
    }
}

/// A longitude source a classifier can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Ascendant,
}

impl Body {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Ascendant => "Ascendant",
        }
    }
}

/// Positions at one instant, in the engine's zodiac frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialSnapshot {
    pub instant: DateTime<Utc>,
    pub jd_ut: f64,
    pub sun_longitude: f64,
    pub moon_longitude: f64,
    /// Present only when the engine has a location.
    pub ascendant: Option<f64>,
}

impl CelestialSnapshot {
    pub fn new(jd_ut: f64, sun_longitude: f64, moon_longitude: f64) -> Self {
        Self {
            instant: utc_from_jd(jd_ut, Rounding::Nearest),
            jd_ut,
            sun_longitude: normalize_360(sun_longitude),
            moon_longitude: normalize_360(moon_longitude),
            ascendant: None,
        }
    }

    pub fn with_ascendant(mut self, ascendant: f64) -> Self {
        self.ascendant = Some(normalize_360(ascendant));
        self
    }

    /// Moon minus Sun in [0, 360).
    pub fn elongation(&self) -> f64 {
        normalize_360(self.moon_longitude - self.sun_longitude)
    }

    /// Sun plus Moon in [0, 360).
    pub fn sum(&self) -> f64 {
        normalize_360(self.sun_longitude + self.moon_longitude)
    }

    /// Signed Moon-Sun separation in (-180, 180].
    pub fn signed_elongation(&self) -> f64 {
        angular_delta(self.sun_longitude, self.moon_longitude)
    }

    pub fn longitude(&self, body: Body) -> Result<f64, SearchError> {
        match body {
            Body::Sun => Ok(self.sun_longitude),
            Body::Moon => Ok(self.moon_longitude),
            Body::Ascendant => self
                .ascendant
                .ok_or(SearchError::InvalidRequest("ascendant requires a location")),
        }
    }
}
