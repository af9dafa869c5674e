//! Karana (half-tithi) classification.
//!
//! Sixty karanas of 6 degrees of elongation make a synodic month. Index 0 is
//! the fixed Kintughna, indices 57..59 are the fixed Shakuni, Chatushpada and
//! Naga, and indices 1..=56 cycle eight times through the seven movable
//! karanas Bava..Vishti.

use serde::{Deserialize, Serialize};

use crate::period::PeriodType;
use crate::util::{normalize_360, segment_index};

/// Elongation span of one karana in degrees.
pub const KARANA_SEGMENT_DEG: f64 = 6.0;

/// Number of karanas in a synodic month.
pub const KARANA_COUNT: u16 = 60;

/// The 11 karana names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Karana {
    Bava,
    Balava,
    Kaulava,
    Taitila,
    Garaja,
    Vanija,
    /// Vishti, also called Bhadra.
    Vishti,
    Shakuni,
    Chatushpada,
    Naga,
    Kintughna,
}

/// The seven movable (chara) karanas in cycle order.
pub const MOVABLE_KARANAS: [Karana; 7] = [
    Karana::Bava,
    Karana::Balava,
    Karana::Kaulava,
    Karana::Taitila,
    Karana::Garaja,
    Karana::Vanija,
    Karana::Vishti,
];

/// The four fixed (sthira) karanas: index 0 then indices 57, 58, 59.
pub const FIXED_KARANAS: [Karana; 4] = [
    Karana::Kintughna,
    Karana::Shakuni,
    Karana::Chatushpada,
    Karana::Naga,
];

impl Karana {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bava => "Bava",
            Self::Balava => "Balava",
            Self::Kaulava => "Kaulava",
            Self::Taitila => "Taitila",
            Self::Garaja => "Garaja",
            Self::Vanija => "Vanija",
            Self::Vishti => "Vishti",
            Self::Shakuni => "Shakuni",
            Self::Chatushpada => "Chatushpada",
            Self::Naga => "Naga",
            Self::Kintughna => "Kintughna",
        }
    }

    /// Whether this is Vishti (Bhadra).
    pub const fn is_vishti(self) -> bool {
        matches!(self, Self::Vishti)
    }

    /// Whether this is one of the four fixed karanas.
    pub const fn is_fixed(self) -> bool {
        matches!(
            self,
            Self::Kintughna | Self::Shakuni | Self::Chatushpada | Self::Naga
        )
    }

    /// Vishti is avoided, the fixed karanas are neutral and the remaining
    /// movable ones auspicious.
    pub const fn nature(self) -> PeriodType {
        if self.is_vishti() {
            PeriodType::Inauspicious
        } else if self.is_fixed() {
            PeriodType::Neutral
        } else {
            PeriodType::Auspicious
        }
    }
}

/// Karana name for a 0-based index in the month (wraps modulo 60).
pub const fn karana_from_index(index: u16) -> Karana {
    let i = index % KARANA_COUNT;
    match i {
        0 => FIXED_KARANAS[0],
        57..=59 => FIXED_KARANAS[(i - 56) as usize],
        _ => MOVABLE_KARANAS[((i - 1) % 7) as usize],
    }
}

/// Karana position of an elongation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KaranaPosition {
    /// The karana name.
    pub karana: Karana,
    /// 0-based index in the month (0..59).
    pub karana_index: u8,
    /// Elongation already covered within this karana [0, 6).
    pub degrees_in_karana: f64,
}

/// Determine the karana of a Moon-Sun elongation in degrees.
pub fn karana_from_elongation(elongation_deg: f64) -> KaranaPosition {
    let elong = normalize_360(elongation_deg);
    let idx = segment_index(elong, KARANA_SEGMENT_DEG, KARANA_COUNT);
    KaranaPosition {
        karana: karana_from_index(idx),
        karana_index: idx as u8,
        degrees_in_karana: elong - f64::from(idx) * KARANA_SEGMENT_DEG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_karanas_at_edges() {
        assert_eq!(karana_from_index(0), Karana::Kintughna);
        assert_eq!(karana_from_index(57), Karana::Shakuni);
        assert_eq!(karana_from_index(58), Karana::Chatushpada);
        assert_eq!(karana_from_index(59), Karana::Naga);
    }

    #[test]
    fn movable_cycle() {
        for i in 1..=56u16 {
            assert_eq!(karana_from_index(i), MOVABLE_KARANAS[((i - 1) % 7) as usize], "{i}");
        }
        assert_eq!(karana_from_index(1), Karana::Bava);
        assert_eq!(karana_from_index(8), Karana::Bava);
        assert_eq!(karana_from_index(56), Karana::Vishti);
    }

    #[test]
    fn vishti_occurs_eight_times() {
        let vishti: Vec<u16> = (0..60).filter(|&i| karana_from_index(i).is_vishti()).collect();
        assert_eq!(vishti, vec![7, 14, 21, 28, 35, 42, 49, 56]);
    }

    #[test]
    fn elongation_mapping() {
        let k = karana_from_elongation(45.0);
        assert_eq!(k.karana_index, 7);
        assert_eq!(k.karana, Karana::Vishti);
        assert!((k.degrees_in_karana - 3.0).abs() < 1e-10);
        assert_eq!(karana_from_elongation(359.0).karana, Karana::Naga);
    }

    #[test]
    fn natures() {
        assert_eq!(Karana::Vishti.nature(), PeriodType::Inauspicious);
        assert_eq!(Karana::Naga.nature(), PeriodType::Neutral);
        assert_eq!(Karana::Bava.nature(), PeriodType::Auspicious);
    }
}
