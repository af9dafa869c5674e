//! Rashi (zodiac sign) classification.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Mesha at 0 degrees of the configured zodiac frame.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::util::{normalize_360, segment_index};

/// Span of one rashi in degrees.
pub const RASHI_SPAN_DEG: f64 = 30.0;

/// Number of rashis.
pub const RASHI_COUNT: u16 = 12;

/// The 12 rashis starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rashi from a 0-based index; wraps modulo 12.
    pub const fn from_index(index: u16) -> Self {
        ALL_RASHIS[(index % RASHI_COUNT) as usize]
    }

    /// Planetary lord of the rashi.
    pub const fn lord(self) -> Graha {
        match self {
            Self::Mesha | Self::Vrischika => Graha::Mangal,
            Self::Vrishabha | Self::Tula => Graha::Shukra,
            Self::Mithuna | Self::Kanya => Graha::Buddh,
            Self::Karka => Graha::Chandra,
            Self::Simha => Graha::Surya,
            Self::Dhanu | Self::Meena => Graha::Guru,
            Self::Makara | Self::Kumbha => Graha::Shani,
        }
    }
}

/// Rashi position of a longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RashiPosition {
    /// The rashi.
    pub rashi: Rashi,
    /// 0-based rashi index (0 = Mesha).
    pub rashi_index: u8,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
}

/// Determine the rashi of a longitude (already in the desired zodiac frame).
pub fn rashi_from_longitude(lon_deg: f64) -> RashiPosition {
    let lon = normalize_360(lon_deg);
    let idx = segment_index(lon, RASHI_SPAN_DEG, RASHI_COUNT);
    RashiPosition {
        rashi: Rashi::from_index(idx),
        rashi_index: idx as u8,
        degrees_in_rashi: lon - f64::from(idx) * RASHI_SPAN_DEG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rashi_indices_sequential() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
            assert_eq!(Rashi::from_index(i as u16), *r);
        }
    }

    #[test]
    fn rashi_boundary_30() {
        let info = rashi_from_longitude(30.0);
        assert_eq!(info.rashi, Rashi::Vrishabha);
        assert!(info.degrees_in_rashi.abs() < 1e-10);
    }

    #[test]
    fn rashi_wrap_around() {
        let info = rashi_from_longitude(365.0);
        assert_eq!(info.rashi, Rashi::Mesha);
        assert!((info.degrees_in_rashi - 5.0).abs() < 1e-10);
    }

    #[test]
    fn rashi_negative() {
        let info = rashi_from_longitude(-10.0);
        assert_eq!(info.rashi, Rashi::Meena);
        assert!((info.degrees_in_rashi - 20.0).abs() < 1e-10);
    }

    #[test]
    fn lords_of_dual_signs() {
        assert_eq!(Rashi::Mesha.lord(), Graha::Mangal);
        assert_eq!(Rashi::Vrischika.lord(), Graha::Mangal);
        assert_eq!(Rashi::Simha.lord(), Graha::Surya);
        assert_eq!(Rashi::Meena.lord(), Graha::Guru);
    }
}
