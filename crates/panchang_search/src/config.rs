//! Engine configuration, loadable from TOML.

use std::path::Path;

use panchang_base::{GAND_MOOL_NAKSHATRAS, GeoLocation, HoraScheme, Nakshatra, Zodiac};
use serde::{Deserialize, Serialize};

use crate::boundary_types::SearchConfig;
use crate::error::SearchError;

/// How the end of a Bhadra (Vishti karana) period is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BhadraEndMode {
    /// Start plus the nominal duration, clipped to the next sunrise.
    NominalDuration,
    /// Search forward for the karana's true end.
    #[default]
    ForwardSearch,
}

/// Substitute values used when a boundary search finds nothing.
///
/// Every period built from these is flagged approximate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPolicy {
    /// Bhadra start assumed this long before the detection sample.
    pub bhadra_start_offset_hours: f64,
    /// Nominal Bhadra length.
    pub bhadra_nominal_hours: f64,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            bhadra_start_offset_hours: 3.0,
            bhadra_nominal_hours: 5.0,
        }
    }
}

/// Per-element scan horizons in hours.
///
/// Each must exceed the longest duration of one bucket of that element so
/// the true boundary is always reachable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Horizons {
    pub tithi_hours: f64,
    pub karana_hours: f64,
    pub yoga_hours: f64,
    pub nakshatra_hours: f64,
    pub gand_mool_hours: f64,
}

impl Default for Horizons {
    fn default() -> Self {
        Self {
            tithi_hours: 30.0,
            karana_hours: 16.0,
            yoga_hours: 30.0,
            nakshatra_hours: 30.0,
            gand_mool_hours: 96.0,
        }
    }
}

/// Configuration for a [`PanchangEngine`](crate::PanchangEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame the classifiers see longitudes in.
    pub zodiac: Zodiac,
    /// Observer location; required for lagna and the day report.
    pub location: Option<GeoLocation>,
    /// Base coarse step and tolerance for element searches.
    pub search: SearchConfig,
    pub horizons: Horizons,
    pub lagna_search: SearchConfig,
    pub new_moon_search: SearchConfig,
    pub hora_scheme: HoraScheme,
    pub bhadra_end_mode: BhadraEndMode,
    pub fallback: FallbackPolicy,
    pub gand_mool_nakshatras: Vec<Nakshatra>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zodiac: Zodiac::default(),
            location: None,
            search: SearchConfig::default(),
            horizons: Horizons::default(),
            lagna_search: SearchConfig::lagna(),
            new_moon_search: SearchConfig::new_moon(),
            hora_scheme: HoraScheme::default(),
            bhadra_end_mode: BhadraEndMode::default(),
            fallback: FallbackPolicy::default(),
            gand_mool_nakshatras: GAND_MOOL_NAKSHATRAS.to_vec(),
        }
    }
}

impl EngineConfig {
    pub fn with_location(mut self, location: GeoLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_zodiac(mut self, zodiac: Zodiac) -> Self {
        self.zodiac = zodiac;
        self
    }

    pub fn with_bhadra_end_mode(mut self, mode: BhadraEndMode) -> Self {
        self.bhadra_end_mode = mode;
        self
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, SearchError> {
        let config: Self = toml::from_str(s).map_err(|e| SearchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// `search` with the horizon replaced.
    pub fn search_with_horizon(&self, hours: f64) -> SearchConfig {
        self.search.with_horizon_hours(hours)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        self.search.validate().map_err(SearchError::InvalidConfig)?;
        self.lagna_search
            .validate()
            .map_err(SearchError::InvalidConfig)?;
        self.new_moon_search
            .validate()
            .map_err(SearchError::InvalidConfig)?;
        let h = &self.horizons;
        for hours in [
            h.tithi_hours,
            h.karana_hours,
            h.yoga_hours,
            h.nakshatra_hours,
            h.gand_mool_hours,
        ] {
            if !hours.is_finite() || hours <= 0.0 {
                return Err(SearchError::InvalidConfig("horizons must be positive"));
            }
        }
        let f = &self.fallback;
        if !(f.bhadra_start_offset_hours.is_finite() && f.bhadra_start_offset_hours >= 0.0) {
            return Err(SearchError::InvalidConfig(
                "bhadra_start_offset_hours must be non-negative",
            ));
        }
        if !(f.bhadra_nominal_hours.is_finite() && f.bhadra_nominal_hours > 0.0) {
            return Err(SearchError::InvalidConfig(
                "bhadra_nominal_hours must be positive",
            ));
        }
        if let Some(loc) = &self.location {
            loc.validate()?;
        }
        Ok(())
    }
}
