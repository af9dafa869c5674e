//! Error types for panchang base calculations.

use thiserror::Error;

/// Errors from panchang base calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// Sunrise, sunset and next sunrise are not strictly ordered.
    #[error("invalid day window: {0}")]
    InvalidDayWindow(String),
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// A requested tithi, karana or similar target does not exist.
    #[error("invalid target: {0}")]
    InvalidTarget(&'static str),
}
