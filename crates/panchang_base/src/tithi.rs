//! Tithi (lunar day) classification.
//!
//! A tithi is 12 degrees of Moon-Sun elongation. Thirty tithis make a synodic
//! month: indices 0..14 form the Shukla (waxing) paksha, 15..29 the Krishna
//! (waning) paksha.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::util::{normalize_360, segment_index};

/// Elongation span of one tithi in degrees.
pub const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Number of tithis in a synodic month.
pub const TITHI_COUNT: u16 = 30;

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paksha {
    /// Waxing fortnight (new moon to full moon).
    Shukla,
    /// Waning fortnight (full moon to new moon).
    Krishna,
}

impl Paksha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }
}

/// Tithi names within a paksha. The fifteenth is Purnima in Shukla and
/// Amavasya in Krishna.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tithi {
    Pratipada,
    Dwitiya,
    Tritiya,
    Chaturthi,
    Panchami,
    Shashthi,
    Saptami,
    Ashtami,
    Navami,
    Dashami,
    Ekadashi,
    Dwadashi,
    Trayodashi,
    Chaturdashi,
    Purnima,
    Amavasya,
}

const TITHI_NAMES_IN_PAKSHA: [Tithi; 14] = [
    Tithi::Pratipada,
    Tithi::Dwitiya,
    Tithi::Tritiya,
    Tithi::Chaturthi,
    Tithi::Panchami,
    Tithi::Shashthi,
    Tithi::Saptami,
    Tithi::Ashtami,
    Tithi::Navami,
    Tithi::Dashami,
    Tithi::Ekadashi,
    Tithi::Dwadashi,
    Tithi::Trayodashi,
    Tithi::Chaturdashi,
];

impl Tithi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pratipada => "Pratipada",
            Self::Dwitiya => "Dwitiya",
            Self::Tritiya => "Tritiya",
            Self::Chaturthi => "Chaturthi",
            Self::Panchami => "Panchami",
            Self::Shashthi => "Shashthi",
            Self::Saptami => "Saptami",
            Self::Ashtami => "Ashtami",
            Self::Navami => "Navami",
            Self::Dashami => "Dashami",
            Self::Ekadashi => "Ekadashi",
            Self::Dwadashi => "Dwadashi",
            Self::Trayodashi => "Trayodashi",
            Self::Chaturdashi => "Chaturdashi",
            Self::Purnima => "Purnima",
            Self::Amavasya => "Amavasya",
        }
    }

    /// Tithi from its 0-based index in the month (wraps modulo 30).
    pub const fn from_index(index: u16) -> Self {
        let i = (index % TITHI_COUNT) as usize;
        match i {
            14 => Self::Purnima,
            29 => Self::Amavasya,
            _ => TITHI_NAMES_IN_PAKSHA[i % 15],
        }
    }
}

/// Tithi position of an elongation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TithiPosition {
    /// The tithi name.
    pub tithi: Tithi,
    /// 0-based index in the month (0..29).
    pub tithi_index: u8,
    /// Paksha of the tithi.
    pub paksha: Paksha,
    /// 1-based number within the paksha (1-15).
    pub tithi_in_paksha: u8,
    /// Elongation already covered within this tithi [0, 12).
    pub degrees_in_tithi: f64,
}

/// Paksha and 1-based in-paksha number of a 0-based tithi index.
pub const fn paksha_and_number(index: u16) -> (Paksha, u8) {
    let i = index % TITHI_COUNT;
    if i < 15 {
        (Paksha::Shukla, (i + 1) as u8)
    } else {
        (Paksha::Krishna, (i - 14) as u8)
    }
}

/// 0-based tithi index for a paksha and 1-based number (1-15).
pub fn tithi_index(paksha: Paksha, number: u8) -> Result<u16, VedicError> {
    if !(1..=15).contains(&number) {
        return Err(VedicError::InvalidTarget("tithi number must be in 1..=15"));
    }
    let base = match paksha {
        Paksha::Shukla => 0,
        Paksha::Krishna => 15,
    };
    Ok(base + u16::from(number) - 1)
}

/// Determine the tithi of a Moon-Sun elongation in degrees.
pub fn tithi_from_elongation(elongation_deg: f64) -> TithiPosition {
    let elong = normalize_360(elongation_deg);
    let idx = segment_index(elong, TITHI_SEGMENT_DEG, TITHI_COUNT);
    let (paksha, tithi_in_paksha) = paksha_and_number(idx);
    TithiPosition {
        tithi: Tithi::from_index(idx),
        tithi_index: idx as u8,
        paksha,
        tithi_in_paksha,
        degrees_in_tithi: elong - f64::from(idx) * TITHI_SEGMENT_DEG,
    }
}
