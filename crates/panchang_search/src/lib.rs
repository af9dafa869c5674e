//! Panchang temporal event engine: boundary search, day segmentation and
//! muhurta detection.
//!
//! This crate provides:
//! - An ephemeris adapter ([`EphemerisProvider`]) and [`PanchangEngine`]
//! - Coarse-scan + bisection boundary search over any [`PeriodClassifier`]
//! - Choghadiya, Hora and Lagna segmentation of a [`DayWindow`]
//! - Tithi, Karana, Yoga and Nakshatra timelines
//! - Rahu Kaal, Yama Ghanta, Gulika Kaal, Abhijit, Dur Muhurta, Ardhaprahara,
//!   Bhadra and Gand Mool detection
//! - Masa determination and a recurring tithi/karana finder
//! - A day report merging all of the above
//!
//! All public timestamps are UTC; searches run on UT Julian Dates
//! internally. No tracing subscriber is installed here.

pub mod analytic;
pub mod bhadra;
pub mod boundary;
pub mod boundary_types;
pub mod cancel;
pub mod classifier;
pub mod config;
pub mod elements;
pub mod engine;
pub mod ephemeris;
pub mod error;
pub mod gand_mool;
pub mod masa;
pub mod muhurta;
pub mod recurring;
pub mod recurring_types;
pub mod segmenter;
pub mod solar_day;
pub mod timeline;
pub mod timeline_types;

pub use analytic::{LowPrecisionEphemeris, moon_longitude_deg, sun_longitude_deg};
pub use bhadra::{BhadraResidence, bhadra_periods};
pub use boundary::{
    Bisection, CoarseCursor, CursorState, Memoized, Sampler, find_transition,
    find_transition_from,
};
pub use boundary_types::{Boundary, Direction, SearchConfig, Transition};
pub use cancel::CancelToken;
pub use classifier::{
    GandMoolClassifier, KaranaClassifier, NakshatraClassifier, PeriodClassifier,
    RashiClassifier, SynodicHalfClassifier, TithiClassifier, YogaClassifier, tithi_name,
    tithi_nature,
};
pub use config::{BhadraEndMode, EngineConfig, FallbackPolicy, Horizons};
pub use elements::{ElementKind, element_timeline};
pub use engine::{BucketSpan, PanchangEngine};
pub use ephemeris::{Body, CelestialSnapshot, EphemerisProvider, TropicalPositions};
pub use error::SearchError;
pub use gand_mool::gand_mool_periods;
pub use masa::{MasaInfo, masa_at, new_moon_jd};
pub use muhurta::muhurta_periods;
pub use recurring::find_recurring;
pub use recurring_types::{
    DayBoundaryProvider, Occurrence, RecurringQuery, RecurringReport, RecurringTarget,
    SkippedDay,
};
pub use segmenter::{choghadiya_periods, hora_periods, lagna_periods};
pub use solar_day::{ApproximateSolarDays, sunrise_sunset_jd};
pub use timeline_types::{DayReport, DetectorOutput, Diagnostic};
