//! Error types for panchang search operations.

use panchang_base::VedicError;
use thiserror::Error;

/// Errors from boundary search, detectors and the recurring finder.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// One ephemeris sample could not be obtained. Recoverable: the search
    /// skips the sample and advances.
    #[error("ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),
    /// A coarse scan exhausted its horizon without a bucket change.
    #[error("no transition found: {0}")]
    NoTransitionFound(&'static str),
    /// A day-boundary provider could not produce a valid window (polar day
    /// or night, provider failure).
    #[error("invalid day window: {0}")]
    InvalidDayWindow(String),
    /// Invalid search or engine configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Malformed top-level request.
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
    /// The cancel token was triggered.
    #[error("search cancelled")]
    Cancelled,
    /// The cancel token's deadline passed.
    #[error("search deadline exceeded")]
    DeadlineExceeded,
    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
    /// A report could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Error from base calculations.
    #[error(transparent)]
    Vedic(#[from] VedicError),
}

impl SearchError {
    /// Whether the failure concerns a single sample and the caller should
    /// skip it and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EphemerisUnavailable(_))
    }

    /// Whether the whole computation was aborted from outside.
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// Whether a day window was rejected, either by the provider or by
    /// [`panchang_base::DayWindow::new`].
    pub fn is_invalid_day_window(&self) -> bool {
        matches!(
            self,
            Self::InvalidDayWindow(_) | Self::Vedic(VedicError::InvalidDayWindow(_))
        )
    }
}
