//! The seven classical grahas: weekday lords, hora lords and rashi lords.

use serde::{Deserialize, Serialize};

use crate::period::PeriodType;

/// The 7 classical grahas (sapta grahas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
}

/// Chaldean order (descending orbital period) used to sequence the horas.
pub const CHALDEAN_ORDER: [Graha; 7] = [
    Graha::Surya,
    Graha::Shukra,
    Graha::Buddh,
    Graha::Chandra,
    Graha::Shani,
    Graha::Guru,
    Graha::Mangal,
];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
        }
    }

    /// Position in [`CHALDEAN_ORDER`].
    pub const fn chaldean_position(self) -> usize {
        match self {
            Self::Surya => 0,
            Self::Shukra => 1,
            Self::Buddh => 2,
            Self::Chandra => 3,
            Self::Shani => 4,
            Self::Guru => 5,
            Self::Mangal => 6,
        }
    }

    /// Nature of a hora ruled by this graha.
    ///
    /// Natural benefics are auspicious, Mars and Saturn inauspicious, the Sun
    /// neutral.
    pub const fn hora_nature(self) -> PeriodType {
        match self {
            Self::Guru | Self::Shukra | Self::Chandra | Self::Buddh => PeriodType::Auspicious,
            Self::Mangal | Self::Shani => PeriodType::Inauspicious,
            Self::Surya => PeriodType::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chaldean_positions_consistent() {
        for (i, g) in CHALDEAN_ORDER.iter().enumerate() {
            assert_eq!(g.chaldean_position(), i, "{g:?}");
        }
    }

    #[test]
    fn names_nonempty() {
        for g in CHALDEAN_ORDER {
            assert!(!g.name().is_empty());
            assert!(!g.english_name().is_empty());
        }
    }
}
