use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use panchang_base::{
    AyanamshaSystem, DayHalf, DayWindow, GeoLocation, Zodiac, ascendant_longitude_deg,
    karana_from_elongation, nakshatra_from_longitude, rashi_from_longitude,
    tithi_from_elongation, yoga_from_sum,
};

fn zodiac_bench(c: &mut Criterion) {
    let tropical_lon = 123.456;
    let jd = 2_460_000.5;
    let zodiac = Zodiac::Sidereal(AyanamshaSystem::Lahiri);

    let mut group = c.benchmark_group("zodiac");
    group.bench_function("sidereal_rashi", |b| {
        b.iter(|| {
            rashi_from_longitude(zodiac.from_tropical(black_box(tropical_lon), black_box(jd)))
        })
    });
    group.bench_function("sidereal_nakshatra", |b| {
        b.iter(|| {
            nakshatra_from_longitude(zodiac.from_tropical(black_box(tropical_lon), black_box(jd)))
        })
    });
    group.finish();
}

fn panchang_primitives_bench(c: &mut Criterion) {
    let elong = 211.75;
    let sum = 278.31;

    let mut group = c.benchmark_group("panchang_primitives");
    group.bench_function("tithi_from_elongation", |b| {
        b.iter(|| tithi_from_elongation(black_box(elong)))
    });
    group.bench_function("karana_from_elongation", |b| {
        b.iter(|| karana_from_elongation(black_box(elong)))
    });
    group.bench_function("yoga_from_sum", |b| b.iter(|| yoga_from_sum(black_box(sum))));
    group.finish();
}

fn ascendant_bench(c: &mut Criterion) {
    let loc = GeoLocation::new(28.6139, 77.209, 0.0);
    let jd = 2_460_000.75;

    let mut group = c.benchmark_group("lagna");
    group.bench_function("ascendant_longitude", |b| {
        b.iter(|| ascendant_longitude_deg(black_box(jd), &loc))
    });
    group.finish();
}

fn day_window_bench(c: &mut Criterion) {
    let window = match DayWindow::new(
        Utc.with_ymd_and_hms(2024, 3, 10, 0, 45, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 41, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 11, 0, 44, 0).unwrap(),
    ) {
        Ok(w) => w,
        Err(e) => panic!("bench window: {e}"),
    };

    let mut group = c.benchmark_group("day_window");
    group.bench_function("split_night_8", |b| {
        b.iter(|| black_box(&window).split(DayHalf::Night, 8))
    });
    group.finish();
}

criterion_group!(
    benches,
    zodiac_bench,
    panchang_primitives_bench,
    ascendant_bench,
    day_window_bench
);
criterion_main!(benches);
