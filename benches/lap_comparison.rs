//! Benchmarks for lap comparison and grid construction
//!
//! A full race for five selected drivers (about 60 laps each, a sprinkling
//! of in/out laps) is the largest table the dashboard builds per request.
//!
//! Platform: Cross-platform (synthetic sessions, CI-safe)

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use paddock::comparison::{
    ComparisonConfig, build_lap_comparison, build_lap_grid, build_tyre_stints,
};
use paddock::session::{Lap, LapTable};
use paddock::test_utils::lap;
use std::hint::black_box;

fn race_table(drivers: usize, laps: u32) -> LapTable {
    let rows: Vec<Lap> = (0..drivers)
        .flat_map(|d| {
            (1..=laps).map(move |n| {
                // Pit laps and the opening lap carry no time
                let time = (n != 1 && n % 20 != 0)
                    .then(|| 88.0 + (d as f64) * 0.137 + ((n * 7 + d as u32) % 13) as f64 * 0.091);
                lap(&d.to_string(), n, time)
            })
        })
        .collect();
    LapTable::from_laps(rows)
}

fn bench_lap_comparison(c: &mut Criterion) {
    let config = ComparisonConfig::default();
    let mut group = c.benchmark_group("lap_comparison");

    for laps in [20u32, 58, 78] {
        let table = race_table(20, laps);
        let selected = ["0", "3", "7", "11", "19"];

        group.bench_with_input(BenchmarkId::new("comparison", laps), &table, |b, table| {
            b.iter(|| build_lap_comparison(black_box(table), black_box(&selected), &config))
        });

        group.bench_with_input(BenchmarkId::new("comparison_and_grid", laps), &table, |b, table| {
            b.iter(|| {
                let comparison = build_lap_comparison(black_box(table), &selected, &config);
                build_lap_grid(black_box(&comparison))
            })
        });

        group.bench_with_input(BenchmarkId::new("tyre_stints", laps), &table, |b, table| {
            b.iter(|| build_tyre_stints(black_box(table), &selected, &config))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lap_comparison);
criterion_main!(benches);
