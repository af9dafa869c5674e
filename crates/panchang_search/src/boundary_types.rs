//! Types for the boundary search engine.

use chrono::{DateTime, Utc};
use panchang_base::{Precision, Rounding, SECONDS_PER_DAY, utc_from_jd};
use serde::{Deserialize, Serialize};

/// Which way a search walks from its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the future: locates the end of the origin bucket.
    Forward,
    /// Toward the past: locates the start of the origin bucket.
    Backward,
}

impl Direction {
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Outward rounding for the located instant: starts floor, ends ceil.
    pub const fn rounding(self) -> Rounding {
        match self {
            Self::Forward => Rounding::Ceil,
            Self::Backward => Rounding::Floor,
        }
    }
}

/// Configuration for one coarse-scan + bisection search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Coarse scan step in minutes (default 60).
    pub coarse_step_minutes: f64,
    /// Maximum coarse scan distance in hours (default 6).
    pub horizon_hours: f64,
    /// Bisection stops once the bracket is this narrow, in seconds (default 60).
    pub tolerance_seconds: f64,
    /// Upper bound on bisection probes (default 40).
    pub max_bisections: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            coarse_step_minutes: 60.0,
            horizon_hours: 6.0,
            tolerance_seconds: 60.0,
            max_bisections: 40,
        }
    }
}

impl SearchConfig {
    /// Ascendant rashi transits: 15-minute step, 30-second tolerance.
    pub fn lagna() -> Self {
        Self {
            coarse_step_minutes: 15.0,
            horizon_hours: 6.0,
            tolerance_seconds: 30.0,
            max_bisections: 40,
        }
    }

    /// New moon search over a synodic half: 12-hour step, 17-day horizon.
    pub fn new_moon() -> Self {
        Self {
            coarse_step_minutes: 720.0,
            horizon_hours: 17.0 * 24.0,
            tolerance_seconds: 60.0,
            max_bisections: 60,
        }
    }

    /// Same step and tolerance with a different horizon.
    pub fn with_horizon_hours(mut self, hours: f64) -> Self {
        self.horizon_hours = hours;
        self
    }

    pub fn with_step_minutes(mut self, minutes: f64) -> Self {
        self.coarse_step_minutes = minutes;
        self
    }

    pub fn step_days(&self) -> f64 {
        self.coarse_step_minutes / 1440.0
    }

    pub fn horizon_days(&self) -> f64 {
        self.horizon_hours / 24.0
    }

    pub fn tolerance_days(&self) -> f64 {
        self.tolerance_seconds / SECONDS_PER_DAY
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.coarse_step_minutes.is_finite() || self.coarse_step_minutes <= 0.0 {
            return Err("coarse_step_minutes must be positive");
        }
        if !self.horizon_hours.is_finite() || self.horizon_hours <= 0.0 {
            return Err("horizon_hours must be positive");
        }
        if !self.tolerance_seconds.is_finite() || self.tolerance_seconds <= 0.0 {
            return Err("tolerance_seconds must be positive");
        }
        if self.tolerance_seconds >= self.coarse_step_minutes * 60.0 {
            return Err("tolerance_seconds must be smaller than the coarse step");
        }
        if self.max_bisections == 0 {
            return Err("max_bisections must be > 0");
        }
        Ok(())
    }
}

/// A located bucket change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    /// Reported instant (bracket midpoint) as JD UT.
    pub jd: f64,
    /// Last probe known to be in the origin bucket.
    pub inside_jd: f64,
    /// First probe known to be outside the origin bucket.
    pub outside_jd: f64,
    /// Bucket at the origin.
    pub from_bucket: u16,
    /// Bucket found at `outside_jd`.
    pub to_bucket: u16,
    /// `Approximate` when refinement stopped before reaching tolerance.
    pub precision: Precision,
    /// Samples requested by the search (origin included).
    pub samples: u32,
}

impl Boundary {
    /// Width of the final bracket in days.
    pub fn bracket_days(&self) -> f64 {
        (self.outside_jd - self.inside_jd).abs()
    }

    /// The located instant rounded outward for the search direction.
    pub fn instant(&self, direction: Direction) -> DateTime<Utc> {
        utc_from_jd(self.jd, direction.rounding())
    }
}

/// Outcome of one boundary search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Found(Boundary),
    /// The horizon was exhausted without a bucket change.
    NotFound {
        origin_bucket: u16,
        /// Farthest instant (JD UT) the scan covered.
        scanned_to_jd: f64,
    },
}

impl Transition {
    pub fn boundary(&self) -> Option<&Boundary> {
        match self {
            Self::Found(b) => Some(b),
            Self::NotFound { .. } => None,
        }
    }

    pub fn origin_bucket(&self) -> u16 {
        match self {
            Self::Found(b) => b.from_bucket,
            Self::NotFound { origin_bucket, .. } => *origin_bucket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = SearchConfig::default();
        assert!((c.step_days() - 1.0 / 24.0).abs() < 1e-15);
        assert!((c.horizon_days() - 0.25).abs() < 1e-15);
        assert!((c.tolerance_days() * SECONDS_PER_DAY - 60.0).abs() < 1e-9);
        assert!(c.validate().is_ok());
        assert!(SearchConfig::lagna().validate().is_ok());
        assert!(SearchConfig::new_moon().validate().is_ok());
    }

    #[test]
    fn rejects_zero_step() {
        let c = SearchConfig::default().with_step_minutes(0.0);
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_tolerance_wider_than_step() {
        let mut c = SearchConfig::default();
        c.tolerance_seconds = 7200.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_bisections() {
        let mut c = SearchConfig::default();
        c.max_bisections = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rounding_by_direction() {
        assert_eq!(Direction::Forward.rounding(), Rounding::Ceil);
        assert_eq!(Direction::Backward.rounding(), Rounding::Floor);
    }
}
