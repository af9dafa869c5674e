//! Property-based tests for the boundary search and element timelines.

#![allow(clippy::unwrap_used)]

mod common;

use chrono::TimeDelta;
use common::{linear_moon, tropical_engine, utc};
use panchang_base::{DayWindow, Precision, jd_from_utc};
use panchang_search::{
    CancelToken, Direction, ElementKind, SearchConfig, TithiClassifier, element_timeline,
};
use proptest::prelude::*;

fn epoch_jd() -> f64 {
    jd_from_utc(&utc(2024, 1, 1, 0, 0))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the located tithi boundary is the true one, within
    /// tolerance, whatever the coarse step.
    #[test]
    fn prop_boundary_independent_of_step(
        offset in 0.0f64..12.0,
        rate in 10.0f64..15.0,
        days in 0.0f64..2.0,
        step_a in 5.0f64..180.0,
        step_b in 5.0f64..180.0,
        forward in any::<bool>(),
    ) {
        let elongation = offset + rate * days;
        let into_tithi = elongation % 12.0;
        prop_assume!(into_tithi > 0.05 && into_tithi < 11.95);

        let engine = tropical_engine(linear_moon(utc(2024, 1, 1, 0, 0), offset, rate));
        let origin = epoch_jd() + days;
        let (direction, edge) = if forward {
            (Direction::Forward, elongation - into_tithi + 12.0)
        } else {
            (Direction::Backward, elongation - into_tithi)
        };
        let expected = epoch_jd() + (edge - offset) / rate;
        let cancel = CancelToken::new();

        let mut found = Vec::new();
        for step in [step_a, step_b] {
            let search = SearchConfig::default()
                .with_horizon_hours(30.0)
                .with_step_minutes(step);
            let t = engine
                .locate_jd(&TithiClassifier, origin, direction, None, &search, &cancel)
                .unwrap();
            let b = *t.boundary().unwrap();
            prop_assert_eq!(b.precision, Precision::Exact);
            prop_assert!(
                (b.jd - expected).abs() <= search.tolerance_days(),
                "step {} found {} expected {}", step, b.jd, expected
            );
            found.push(b.jd);
        }
        let tol = SearchConfig::default().tolerance_days();
        prop_assert!((found[0] - found[1]).abs() <= tol);
    }

    /// Property: karana periods tile any day window without gap, starting at
    /// or before sunrise and ending at or after the next sunrise.
    #[test]
    fn prop_karanas_tile_any_window(
        offset in 0.0f64..12.0,
        rate in 11.0f64..15.0,
        sunrise_min in 0i64..1440,
        day_min in 480i64..960,
        night_min in 480i64..960,
    ) {
        let engine = tropical_engine(linear_moon(utc(2024, 1, 1, 0, 0), offset, rate));
        let sunrise = utc(2024, 1, 2, 0, 0) + TimeDelta::minutes(sunrise_min);
        let sunset = sunrise + TimeDelta::minutes(day_min);
        let window = DayWindow::new(sunrise, sunset, sunset + TimeDelta::minutes(night_min))
            .unwrap();

        let out = element_timeline(&engine, &window, ElementKind::Karana, &CancelToken::new())
            .unwrap();
        prop_assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        prop_assert!(!out.periods.is_empty());
        prop_assert!(out.periods[0].start <= window.sunrise());
        prop_assert!(out.periods[out.periods.len() - 1].end >= window.next_sunrise());
        for p in &out.periods {
            prop_assert!(p.start < p.end, "{} {} {}", p.name, p.start, p.end);
        }
        for pair in out.periods.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
            prop_assert_ne!(&pair[0].name, &pair[1].name);
        }
    }
}
