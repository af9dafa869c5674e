//! Masa (lunar month) names.
//!
//! In the Amanta reckoning a month runs from new moon to new moon and takes
//! its name from the Sun's sidereal rashi at the closing new moon.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Masa {
    Chaitra,
    Vaishakha,
    Jyeshtha,
    Ashadha,
    Shravana,
    Bhadrapada,
    Ashwin,
    Kartika,
    Margashirsha,
    Pausha,
    Magha,
    Phalguna,
}

/// All 12 masas in order (0 = Chaitra).
pub const ALL_MASAS: [Masa; 12] = [
    Masa::Chaitra,
    Masa::Vaishakha,
    Masa::Jyeshtha,
    Masa::Ashadha,
    Masa::Shravana,
    Masa::Bhadrapada,
    Masa::Ashwin,
    Masa::Kartika,
    Masa::Margashirsha,
    Masa::Pausha,
    Masa::Magha,
    Masa::Phalguna,
];

impl Masa {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chaitra => "Chaitra",
            Self::Vaishakha => "Vaishakha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Ashadha => "Ashadha",
            Self::Shravana => "Shravana",
            Self::Bhadrapada => "Bhadrapada",
            Self::Ashwin => "Ashwin",
            Self::Kartika => "Kartika",
            Self::Margashirsha => "Margashirsha",
            Self::Pausha => "Pausha",
            Self::Magha => "Magha",
            Self::Phalguna => "Phalguna",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Masa named by the Sun's sidereal rashi index (0 = Mesha) at the closing
/// new moon. Wraps modulo 12.
pub const fn masa_from_rashi_index(rashi_index: u8) -> Masa {
    ALL_MASAS[(rashi_index % 12) as usize]
}
