//! Weekday tables for the fixed-fraction muhurta windows.
//!
//! Rahu Kaal, Yama Ghanta, Gulika Kaal and Ardhaprahara each occupy one
//! eighth of the day (or night for night Gulika) at a weekday-dependent
//! slot. Abhijit and the Dur Muhurtas are slots among the 15 muhurtas of a
//! half. All slot indices are 0-based and every table is indexed Sunday
//! first.

use crate::period::{DayHalf, PeriodCategory, PeriodType};
use crate::vaar::Vaar;

/// Eighth-part divisions of a half.
pub const DAY_PARTS: u32 = 8;

/// Muhurtas per half.
pub const MUHURTAS_PER_HALF: u32 = 15;

/// Rahu Kaal slot among 8 day parts.
pub const RAHU_KAAL_SEGMENT: [u8; 7] = [7, 1, 6, 4, 5, 3, 2];

/// Yama Ghanta slot among 8 day parts.
pub const YAMA_GHANTA_SEGMENT: [u8; 7] = [4, 3, 2, 1, 0, 6, 5];

/// Gulika Kaal slot among 8 day parts.
pub const GULIKA_KAAL_SEGMENT: [u8; 7] = [6, 5, 4, 3, 2, 1, 0];

/// Gulika Kaal slot among 8 night parts.
pub const NIGHT_GULIKA_SEGMENT: [u8; 7] = [2, 1, 0, 6, 5, 4, 3];

/// Ardhaprahara (Mercury's portion) slot among 8 day parts.
pub const ARDHAPRAHARA_SEGMENT: [u8; 7] = [3, 2, 1, 0, 6, 5, 4];

/// Abhijit is the eighth of the 15 day muhurtas.
pub const ABHIJIT_MUHURTA: u8 = 7;

/// Dur Muhurta slots among the 15 muhurtas of each half.
pub const DUR_MUHURTA: [&[(DayHalf, u8)]; 7] = [
    &[(DayHalf::Day, 13)],                      // Sunday
    &[(DayHalf::Day, 8), (DayHalf::Day, 11)],   // Monday
    &[(DayHalf::Day, 3), (DayHalf::Night, 6)],  // Tuesday
    &[(DayHalf::Day, 7)],                       // Wednesday
    &[(DayHalf::Day, 5), (DayHalf::Day, 11)],   // Thursday
    &[(DayHalf::Day, 3), (DayHalf::Day, 8)],    // Friday
    &[(DayHalf::Day, 0), (DayHalf::Day, 1)],    // Saturday
];

/// One fixed-fraction window: slot `part` of `parts` equal slices of `half`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuhurtaSlot {
    pub category: PeriodCategory,
    pub name: &'static str,
    pub half: DayHalf,
    pub part: u32,
    pub parts: u32,
    pub nature: PeriodType,
}

impl MuhurtaSlot {
    const fn eighth(
        category: PeriodCategory,
        name: &'static str,
        half: DayHalf,
        part: u8,
        nature: PeriodType,
    ) -> Self {
        Self {
            category,
            name,
            half,
            part: part as u32,
            parts: DAY_PARTS,
            nature,
        }
    }

    const fn muhurta(
        category: PeriodCategory,
        name: &'static str,
        half: DayHalf,
        part: u8,
        nature: PeriodType,
    ) -> Self {
        Self {
            category,
            name,
            half,
            part: part as u32,
            parts: MUHURTAS_PER_HALF,
            nature,
        }
    }
}

/// Every fixed-fraction window of a weekday, in table order.
pub fn muhurta_slots(vaar: Vaar) -> Vec<MuhurtaSlot> {
    let w = vaar.index();
    let mut slots = vec![
        MuhurtaSlot::eighth(
            PeriodCategory::RahuKaal,
            "Rahu Kaal",
            DayHalf::Day,
            RAHU_KAAL_SEGMENT[w],
            PeriodType::Inauspicious,
        ),
        MuhurtaSlot::eighth(
            PeriodCategory::YamaGhanta,
            "Yama Ghanta",
            DayHalf::Day,
            YAMA_GHANTA_SEGMENT[w],
            PeriodType::Inauspicious,
        ),
        MuhurtaSlot::eighth(
            PeriodCategory::GulikaKaal,
            "Gulika Kaal",
            DayHalf::Day,
            GULIKA_KAAL_SEGMENT[w],
            PeriodType::Inauspicious,
        ),
        MuhurtaSlot::eighth(
            PeriodCategory::GulikaKaal,
            "Gulika Kaal (night)",
            DayHalf::Night,
            NIGHT_GULIKA_SEGMENT[w],
            PeriodType::Inauspicious,
        ),
        MuhurtaSlot::eighth(
            PeriodCategory::Ardhaprahara,
            "Ardhaprahara",
            DayHalf::Day,
            ARDHAPRAHARA_SEGMENT[w],
            PeriodType::Inauspicious,
        ),
        MuhurtaSlot::muhurta(
            PeriodCategory::Abhijit,
            "Abhijit",
            DayHalf::Day,
            ABHIJIT_MUHURTA,
            abhijit_nature(vaar),
        ),
    ];
    for &(half, idx) in DUR_MUHURTA[w] {
        slots.push(MuhurtaSlot::muhurta(
            PeriodCategory::DurMuhurta,
            "Dur Muhurta",
            half,
            idx,
            PeriodType::Inauspicious,
        ));
    }
    slots
}

/// Abhijit is auspicious except on Wednesday, where it is neutral.
pub const fn abhijit_nature(vaar: Vaar) -> PeriodType {
    match vaar {
        Vaar::Budhvaar => PeriodType::Neutral,
        _ => PeriodType::Auspicious,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eighth_tables_are_permutations_of_seven_slots() {
        for table in [
            RAHU_KAAL_SEGMENT,
            YAMA_GHANTA_SEGMENT,
            GULIKA_KAAL_SEGMENT,
            NIGHT_GULIKA_SEGMENT,
            ARDHAPRAHARA_SEGMENT,
        ] {
            let mut sorted = table;
            sorted.sort_unstable();
            assert_eq!(sorted.len(), 7);
            for pair in sorted.windows(2) {
                assert_ne!(pair[0], pair[1], "{table:?}");
            }
            assert!(table.iter().all(|&s| s < 8));
        }
    }

    #[test]
    fn sunday_slots() {
        let slots = muhurta_slots(Vaar::Ravivaar);
        let rahu = slots
            .iter()
            .find(|s| s.category == PeriodCategory::RahuKaal)
            .unwrap();
        assert_eq!((rahu.half, rahu.part, rahu.parts), (DayHalf::Day, 7, 8));
        let dur: Vec<_> = slots
            .iter()
            .filter(|s| s.category == PeriodCategory::DurMuhurta)
            .collect();
        assert_eq!(dur.len(), 1);
        assert_eq!(dur[0].part, 13);
    }

    #[test]
    fn tuesday_has_night_dur_muhurta() {
        let slots = muhurta_slots(Vaar::Mangalvaar);
        assert!(slots.iter().any(|s| s.category == PeriodCategory::DurMuhurta
            && s.half == DayHalf::Night
            && s.part == 6));
    }

    #[test]
    fn abhijit_neutral_on_wednesday() {
        assert_eq!(abhijit_nature(Vaar::Budhvaar), PeriodType::Neutral);
        assert_eq!(abhijit_nature(Vaar::Guruvaar), PeriodType::Auspicious);
    }
}
