//! Fixed-fraction muhurta windows: Rahu Kaal, Yama Ghanta, Gulika Kaal,
//! Ardhaprahara, Abhijit and Dur Muhurta.
//!
//! Pure arithmetic over the day window; no ephemeris queries.

use panchang_base::{DayHalf, DayWindow, MuhurtaSlot, Period, Vaar, muhurta_slots};

fn slot_description(slot: &MuhurtaSlot) -> String {
    let half = match slot.half {
        DayHalf::Day => "daytime",
        DayHalf::Night => "nighttime",
    };
    format!("part {} of {} of {half}", slot.part + 1, slot.parts)
}

/// Every fixed muhurta window of `vaar`, in start order.
pub fn muhurta_periods(window: &DayWindow, vaar: Vaar) -> Vec<Period> {
    let mut periods: Vec<Period> = muhurta_slots(vaar)
        .iter()
        .map(|slot| {
            let (start, end) = window.portion(slot.half, slot.part, slot.parts);
            Period::new(slot.category, slot.name, start, end, slot.nature)
                .with_description(slot_description(slot))
        })
        .collect();
    periods.sort_by(|a, b| (a.start, a.end, a.category).cmp(&(b.start, b.end, b.category)));
    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use panchang_base::{PeriodCategory, PeriodType};

    fn hm(h: u32, m: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, h, m, 0).unwrap()
    }

    fn sunday() -> DayWindow {
        DayWindow::new(
            hm(6, 0),
            hm(18, 0),
            Utc.with_ymd_and_hms(2024, 3, 11, 6, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn find(periods: &[Period], category: PeriodCategory) -> &Period {
        periods
            .iter()
            .find(|p| p.category == category)
            .unwrap_or_else(|| panic!("missing {category:?}"))
    }

    #[test]
    fn sunday_windows() {
        let p = muhurta_periods(&sunday(), Vaar::Ravivaar);
        let rahu = find(&p, PeriodCategory::RahuKaal);
        assert_eq!((rahu.start, rahu.end), (hm(16, 30), hm(18, 0)));
        assert_eq!(rahu.period_type, PeriodType::Inauspicious);
        let yama = find(&p, PeriodCategory::YamaGhanta);
        assert_eq!((yama.start, yama.end), (hm(12, 0), hm(13, 30)));
        let gulika = find(&p, PeriodCategory::GulikaKaal);
        assert_eq!((gulika.start, gulika.end), (hm(15, 0), hm(16, 30)));
        let abhijit = find(&p, PeriodCategory::Abhijit);
        assert_eq!((abhijit.start, abhijit.end), (hm(11, 36), hm(12, 24)));
        let dur = find(&p, PeriodCategory::DurMuhurta);
        // 14th daytime muhurta.
        assert_eq!((dur.start, dur.end), (hm(16, 24), hm(17, 12)));
    }

    #[test]
    fn sorted_and_well_formed() {
        for vaar in panchang_base::ALL_VAARS {
            let p = muhurta_periods(&sunday(), vaar);
            assert!(p.iter().all(|x| x.start < x.end));
            assert!(p.windows(2).all(|w| w[0].start <= w[1].start));
        }
    }

    #[test]
    fn wednesday_abhijit_is_neutral() {
        let p = muhurta_periods(&sunday(), Vaar::Budhvaar);
        assert_eq!(find(&p, PeriodCategory::Abhijit).period_type, PeriodType::Neutral);
    }
}
