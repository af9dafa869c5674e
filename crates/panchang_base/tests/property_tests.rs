//! Property-based tests for angle normalization, karana mapping and
//! day-window tiling.

#![allow(clippy::unwrap_used)]

use chrono::{TimeDelta, TimeZone, Utc};
use panchang_base::{
    DayHalf, DayWindow, FIXED_KARANAS, MOVABLE_KARANAS, angular_delta, karana_from_index,
    normalize_360,
};
use proptest::prelude::*;

proptest! {
    /// Property: normalized angles are in [0, 360) and congruent to the input.
    #[test]
    fn prop_normalize_in_range(x in -1.0e6f64..1.0e6) {
        let n = normalize_360(x);
        prop_assert!((0.0..360.0).contains(&n), "normalize({}) = {}", x, n);
        let k = ((x - n) / 360.0).round();
        prop_assert!((x - n - k * 360.0).abs() < 1e-6);
    }

    /// Property: normalization is idempotent.
    #[test]
    fn prop_normalize_idempotent(x in -1.0e4f64..1.0e4) {
        let n = normalize_360(x);
        prop_assert_eq!(normalize_360(n), n);
    }

    /// Property: the signed delta is in (-180, 180] and lands on the target.
    #[test]
    fn prop_delta_range(a in -720.0f64..720.0, b in -720.0f64..720.0) {
        let d = angular_delta(a, b);
        prop_assert!(d > -180.0 && d <= 180.0, "delta = {}", d);
        let reached = normalize_360(a + d);
        let target = normalize_360(b);
        let gap = (reached - target).abs();
        prop_assert!(gap < 1e-9 || (360.0 - gap) < 1e-9);
    }

    /// Property: karana names follow the 7-cycle on 1..=56 and the fixed
    /// names elsewhere.
    #[test]
    fn prop_karana_mapping(i in 0u16..600) {
        let k = karana_from_index(i);
        let j = i % 60;
        match j {
            0 => prop_assert_eq!(k, FIXED_KARANAS[0]),
            57..=59 => prop_assert_eq!(k, FIXED_KARANAS[usize::from(j - 56)]),
            _ => prop_assert_eq!(k, MOVABLE_KARANAS[usize::from((j - 1) % 7)]),
        }
    }

    /// Property: the n slices of either half tile it without gap or overlap.
    #[test]
    fn prop_halves_tile(
        day_ms in 3_600_000i64..80_000_000,
        night_ms in 3_600_000i64..80_000_000,
        parts in 1u32..30,
    ) {
        let sunrise = Utc.with_ymd_and_hms(2024, 6, 1, 0, 30, 0).unwrap();
        let sunset = sunrise + TimeDelta::milliseconds(day_ms);
        let next = sunset + TimeDelta::milliseconds(night_ms);
        let w = DayWindow::new(sunrise, sunset, next).unwrap();
        for half in [DayHalf::Day, DayHalf::Night] {
            let (start, end) = w.half_bounds(half);
            let slices = w.split(half, parts);
            prop_assert_eq!(slices.len() as u32, parts);
            prop_assert_eq!(slices[0].0, start);
            prop_assert_eq!(slices[slices.len() - 1].1, end);
            for pair in slices.windows(2) {
                prop_assert_eq!(pair[0].1, pair[1].0);
                prop_assert!(pair[0].0 < pair[0].1);
            }
        }
    }
}
