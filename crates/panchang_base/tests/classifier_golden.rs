//! Integration tests for the longitude classifiers and weekday tables.
//!
//! Pure-math tests (no ephemeris needed).

use chrono::{TimeZone, Utc};
use panchang_base::{
    AyanamshaSystem, DayHalf, DayWindow, Graha, HoraScheme, Karana, Nakshatra, Paksha,
    PeriodCategory, Rashi, Tithi, Vaar, Yoga, Zodiac, choghadiya_at, hora_lord,
    karana_from_elongation, muhurta_slots, nakshatra_from_longitude, rashi_from_longitude,
    tithi_from_elongation, yoga_from_sum,
};

// ---------------------------------------------------------------------------
// Longitude classifiers
// ---------------------------------------------------------------------------

#[test]
fn rashi_sweep_all_12() {
    let expected = [
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
    for (i, r) in expected.iter().enumerate() {
        let lon = i as f64 * 30.0 + 15.0;
        let info = rashi_from_longitude(lon);
        assert_eq!(info.rashi, *r, "rashi at {lon} deg");
        assert_eq!(info.rashi_index, i as u8);
    }
}

#[test]
fn rashi_from_tropical_with_lahiri() {
    // At J2000.0 Lahiri is 23.853, so tropical 280.5 is sidereal 256.647 (Dhanu).
    let sid = Zodiac::Sidereal(AyanamshaSystem::Lahiri).from_tropical(280.5, 2_451_545.0);
    let info = rashi_from_longitude(sid);
    assert_eq!(info.rashi, Rashi::Dhanu);
    assert!((info.degrees_in_rashi - 16.647).abs() < 0.01);
}

#[test]
fn nakshatra_sweep() {
    for i in 0..27u16 {
        let lon = (f64::from(i) + 0.6) * (360.0 / 27.0);
        let info = nakshatra_from_longitude(lon);
        assert_eq!(info.nakshatra, Nakshatra::from_index(i));
        assert_eq!(info.pada, 3, "{:?} at 60% is in pada 3", info.nakshatra);
    }
}

#[test]
fn tithi_karana_agree_on_halves() {
    // Every tithi holds exactly two karanas.
    for k in 0..60u16 {
        let elong = f64::from(k) * 6.0 + 3.0;
        let t = tithi_from_elongation(elong);
        assert_eq!(u16::from(t.tithi_index), k / 2, "elongation {elong}");
        assert_eq!(u16::from(karana_from_elongation(elong).karana_index), k);
    }
}

#[test]
fn krishna_fortnight_karanas() {
    // Krishna Ekadashi second half: karana index 51 = (51-1) % 7 = 1 -> Balava,
    // Krishna Chaturdashi first half: index 56 -> Vishti.
    assert_eq!(karana_from_elongation(51.0 * 6.0 + 1.0).karana, Karana::Balava);
    assert_eq!(karana_from_elongation(56.0 * 6.0 + 1.0).karana, Karana::Vishti);
    let t = tithi_from_elongation(56.0 * 6.0 + 1.0);
    assert_eq!((t.paksha, t.tithi), (Paksha::Krishna, Tithi::Chaturdashi));
}

#[test]
fn yoga_at_known_sum() {
    assert_eq!(yoga_from_sum(360.0 / 27.0 * 16.5).yoga, Yoga::Vyatipata);
}

// ---------------------------------------------------------------------------
// Weekday tables
// ---------------------------------------------------------------------------

#[test]
fn saturday_choghadiya_and_hora() {
    assert_eq!(
        choghadiya_at(Vaar::Shanivaar, DayHalf::Day, 0).name(),
        "Kaal"
    );
    assert_eq!(
        hora_lord(Vaar::Shanivaar, DayHalf::Night, 0, HoraScheme::Octal),
        Graha::Buddh
    );
}

#[test]
fn sunday_rahu_yama_gulika_clock_times() {
    let window = DayWindow::new(
        Utc.with_ymd_and_hms(2024, 3, 10, 6, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 11, 6, 0, 0).unwrap(),
    )
    .unwrap();
    let slots = muhurta_slots(Vaar::Ravivaar);
    let span = |cat: PeriodCategory| {
        let s = slots
            .iter()
            .find(|s| s.category == cat && s.half == DayHalf::Day)
            .unwrap();
        window.portion(s.half, s.part, s.parts)
    };
    let hm = |h, m| Utc.with_ymd_and_hms(2024, 3, 10, h, m, 0).unwrap();
    assert_eq!(span(PeriodCategory::RahuKaal), (hm(16, 30), hm(18, 0)));
    assert_eq!(span(PeriodCategory::YamaGhanta), (hm(12, 0), hm(13, 30)));
    assert_eq!(span(PeriodCategory::GulikaKaal), (hm(15, 0), hm(16, 30)));
    assert_eq!(span(PeriodCategory::Abhijit), (hm(11, 36), hm(12, 24)));
}
