//! Yoga (luni-solar sum) classification.
//!
//! The sum of the sidereal Sun and Moon longitudes, divided into 27 equal
//! segments of 13 deg 20'.

use serde::{Deserialize, Serialize};

use crate::period::PeriodType;
use crate::util::{normalize_360, segment_index};

/// Span of one yoga in degrees.
pub const YOGA_SEGMENT_DEG: f64 = 360.0 / 27.0;

/// Number of yogas.
pub const YOGA_COUNT: u16 = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Yoga {
    Vishkambha,
    Priti,
    Ayushman,
    Saubhagya,
    Shobhana,
    Atiganda,
    Sukarma,
    Dhriti,
    Shula,
    Ganda,
    Vriddhi,
    Dhruva,
    Vyaghata,
    Harshana,
    Vajra,
    Siddhi,
    Vyatipata,
    Variyana,
    Parigha,
    Shiva,
    Siddha,
    Sadhya,
    Shubha,
    Shukla,
    Brahma,
    Indra,
    Vaidhriti,
}

/// All 27 yogas in order (0 = Vishkambha).
pub const ALL_YOGAS: [Yoga; 27] = [
    Yoga::Vishkambha,
    Yoga::Priti,
    Yoga::Ayushman,
    Yoga::Saubhagya,
    Yoga::Shobhana,
    Yoga::Atiganda,
    Yoga::Sukarma,
    Yoga::Dhriti,
    Yoga::Shula,
    Yoga::Ganda,
    Yoga::Vriddhi,
    Yoga::Dhruva,
    Yoga::Vyaghata,
    Yoga::Harshana,
    Yoga::Vajra,
    Yoga::Siddhi,
    Yoga::Vyatipata,
    Yoga::Variyana,
    Yoga::Parigha,
    Yoga::Shiva,
    Yoga::Siddha,
    Yoga::Sadhya,
    Yoga::Shubha,
    Yoga::Shukla,
    Yoga::Brahma,
    Yoga::Indra,
    Yoga::Vaidhriti,
];

impl Yoga {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vishkambha => "Vishkambha",
            Self::Priti => "Priti",
            Self::Ayushman => "Ayushman",
            Self::Saubhagya => "Saubhagya",
            Self::Shobhana => "Shobhana",
            Self::Atiganda => "Atiganda",
            Self::Sukarma => "Sukarma",
            Self::Dhriti => "Dhriti",
            Self::Shula => "Shula",
            Self::Ganda => "Ganda",
            Self::Vriddhi => "Vriddhi",
            Self::Dhruva => "Dhruva",
            Self::Vyaghata => "Vyaghata",
            Self::Harshana => "Harshana",
            Self::Vajra => "Vajra",
            Self::Siddhi => "Siddhi",
            Self::Vyatipata => "Vyatipata",
            Self::Variyana => "Variyana",
            Self::Parigha => "Parigha",
            Self::Shiva => "Shiva",
            Self::Siddha => "Siddha",
            Self::Sadhya => "Sadhya",
            Self::Shubha => "Shubha",
            Self::Shukla => "Shukla",
            Self::Brahma => "Brahma",
            Self::Indra => "Indra",
            Self::Vaidhriti => "Vaidhriti",
        }
    }

    pub const fn from_index(index: u16) -> Self {
        ALL_YOGAS[(index % YOGA_COUNT) as usize]
    }

    /// The nine traditionally malefic yogas are inauspicious, the rest auspicious.
    pub const fn nature(self) -> PeriodType {
        match self {
            Self::Vishkambha
            | Self::Atiganda
            | Self::Shula
            | Self::Ganda
            | Self::Vyaghata
            | Self::Vajra
            | Self::Vyatipata
            | Self::Parigha
            | Self::Vaidhriti => PeriodType::Inauspicious,
            _ => PeriodType::Auspicious,
        }
    }
}

/// Yoga position of a Sun+Moon sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YogaPosition {
    pub yoga: Yoga,
    /// 0-based index (0..26).
    pub yoga_index: u8,
    pub degrees_in_yoga: f64,
}

/// Determine the yoga from the sum of sidereal Sun and Moon longitudes.
pub fn yoga_from_sum(sum_deg: f64) -> YogaPosition {
    let sum = normalize_360(sum_deg);
    let idx = segment_index(sum, YOGA_SEGMENT_DEG, YOGA_COUNT);
    YogaPosition {
        yoga: Yoga::from_index(idx),
        yoga_index: idx as u8,
        degrees_in_yoga: sum - f64::from(idx) * YOGA_SEGMENT_DEG,
    }
}
