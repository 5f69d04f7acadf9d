//! Per-driver lap series and fastest laps

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

use super::ComparisonConfig;
use crate::session::LapTable;
use crate::types::{DriverId, LapTime};

/// One valid lap in a driver's series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapPoint {
    pub lap_number: u32,
    pub time: LapTime,
}

/// A driver's lap series for the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DriverLapSeries {
    pub driver: DriverId,
    /// Valid laps, ascending by lap number
    pub laps: Vec<LapPoint>,
    /// Minimum lap time; ties go to the lowest lap number
    pub fastest: Option<LapPoint>,
}

impl DriverLapSeries {
    /// Time for a lap number, if the driver set a valid one
    pub fn time_at(&self, lap_number: u32) -> Option<LapTime> {
        self.laps
            .binary_search_by_key(&lap_number, |point| point.lap_number)
            .ok()
            .map(|index| self.laps[index].time)
    }

    pub fn max_lap(&self) -> u32 {
        self.laps.last().map_or(0, |point| point.lap_number)
    }
}

/// Lap comparison across the selected drivers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapComparison {
    /// One entry per selected driver, in selection order
    pub drivers: Vec<DriverLapSeries>,
    /// Fastest valid lap across the selection
    pub overall_fastest: Option<LapTime>,
}

impl LapComparison {
    pub fn series(&self, driver: &str) -> Option<&DriverLapSeries> {
        self.drivers.iter().find(|series| series.driver == driver)
    }

    pub fn driver_ids(&self) -> impl Iterator<Item = &str> {
        self.drivers.iter().map(|series| series.driver.as_str())
    }

    /// Highest valid lap number across the selection, 0 if none
    pub fn max_lap(&self) -> u32 {
        self.drivers.iter().map(DriverLapSeries::max_lap).max().unwrap_or(0)
    }
}

/// Row of the fastest-laps table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct FastestLapRow {
    pub driver: DriverId,
    pub lap_number: u32,
    pub time: LapTime,
    /// This time equals the fastest lap across the selection
    pub is_overall_fastest: bool,
}

/// De-duplicate a selection (first occurrence wins) and keep the first `cap`
pub fn normalize_selection<S: AsRef<str>>(selected: &[S], cap: usize) -> Vec<DriverId> {
    let mut seen = HashSet::with_capacity(selected.len());
    selected
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| seen.insert(*id))
        .take(cap)
        .map(str::to_string)
        .collect()
}

/// Build lap series for the first `max_comparison_drivers` selected drivers.
///
/// Laps without a valid time are dropped. A driver with no valid laps (or no
/// laps at all) gets an empty series. If a driver reports the same lap number
/// twice, the first occurrence in table order is kept.
pub fn build_lap_comparison<S: AsRef<str>>(
    table: &LapTable,
    selected: &[S],
    config: &ComparisonConfig,
) -> LapComparison {
    let selection = normalize_selection(selected, config.max_comparison_drivers);

    let drivers: Vec<DriverLapSeries> = selection
        .into_iter()
        .map(|driver| {
            let mut laps: Vec<LapPoint> = table
                .laps(&driver)
                .iter()
                .filter_map(|lap| {
                    lap.valid_time().map(|time| LapPoint { lap_number: lap.lap_number, time })
                })
                .collect();

            // Stable sort so the first duplicate survives dedup
            laps.sort_by_key(|point| point.lap_number);
            laps.dedup_by_key(|point| point.lap_number);

            // min_by_key keeps the first minimum, i.e. the lowest lap number
            let fastest = laps.iter().copied().min_by_key(|point| point.time);

            trace!(
                driver = %driver,
                valid_laps = laps.len(),
                fastest = ?fastest.map(|p| p.time.to_string()),
                "Driver lap series"
            );

            DriverLapSeries { driver, laps, fastest }
        })
        .collect();

    let overall_fastest =
        drivers.iter().filter_map(|series| series.fastest.map(|point| point.time)).min();

    debug!(
        drivers = drivers.len(),
        overall_fastest = ?overall_fastest.map(|t| t.to_string()),
        "Built lap comparison"
    );

    LapComparison { drivers, overall_fastest }
}

/// One row per selected driver with at least one valid lap
pub fn fastest_laps_table(comparison: &LapComparison) -> Vec<FastestLapRow> {
    comparison
        .drivers
        .iter()
        .filter_map(|series| {
            series.fastest.map(|point| FastestLapRow {
                driver: series.driver.clone(),
                lap_number: point.lap_number,
                time: point.time,
                is_overall_fastest: Some(point.time) == comparison.overall_fastest,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::lap;
    use proptest::prelude::*;

    fn scenario_table() -> LapTable {
        LapTable::from_laps(vec![
            lap("A", 1, Some(90.123)),
            lap("A", 2, Some(89.5)),
            lap("B", 1, Some(91.0)),
            lap("B", 2, Some(89.5)),
            lap("C", 1, None),
            lap("C", 2, None),
        ])
    }

    #[test]
    fn fastest_laps_for_tied_drivers() {
        let comparison =
            build_lap_comparison(&scenario_table(), &["A", "B"], &ComparisonConfig::default());

        let a = comparison.series("A").unwrap();
        let b = comparison.series("B").unwrap();
        assert_eq!(a.fastest, Some(LapPoint { lap_number: 2, time: LapTime::from_millis(89_500) }));
        assert_eq!(b.fastest, Some(LapPoint { lap_number: 2, time: LapTime::from_millis(89_500) }));
        assert_eq!(comparison.overall_fastest, Some(LapTime::from_millis(89_500)));

        let table = fastest_laps_table(&comparison);
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|row| row.is_overall_fastest));
    }

    #[test]
    fn driver_without_valid_laps_gets_empty_series() {
        let comparison =
            build_lap_comparison(&scenario_table(), &["C", "A"], &ComparisonConfig::default());

        let c = comparison.series("C").unwrap();
        assert!(c.laps.is_empty());
        assert_eq!(c.fastest, None);
        assert_eq!(comparison.max_lap(), 2);
        assert_eq!(fastest_laps_table(&comparison).len(), 1);
    }

    #[test]
    fn all_invalid_selection_has_no_overall_fastest() {
        let comparison = build_lap_comparison(&scenario_table(), &["C"], &ComparisonConfig::default());
        assert_eq!(comparison.overall_fastest, None);
        assert_eq!(comparison.max_lap(), 0);

        let empty: [&str; 0] = [];
        let comparison = build_lap_comparison(&scenario_table(), &empty, &ComparisonConfig::default());
        assert!(comparison.drivers.is_empty());
        assert_eq!(comparison.overall_fastest, None);
    }

    #[test]
    fn unknown_driver_gets_empty_series() {
        let comparison =
            build_lap_comparison(&scenario_table(), &["Z"], &ComparisonConfig::default());
        assert_eq!(comparison.drivers.len(), 1);
        assert!(comparison.drivers[0].laps.is_empty());
    }

    #[test]
    fn selection_is_truncated_and_deduplicated() {
        let config = ComparisonConfig { max_comparison_drivers: 2, ..Default::default() };
        let comparison = build_lap_comparison(&scenario_table(), &["B", "B", "A", "C"], &config);
        let ids: Vec<&str> = comparison.driver_ids().collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn series_is_sorted_and_first_duplicate_wins() {
        let table = LapTable::from_laps(vec![
            lap("A", 3, Some(92.0)),
            lap("A", 1, Some(95.0)),
            lap("A", 3, Some(80.0)),
            lap("A", 2, Some(-4.0)),
        ]);
        let comparison = build_lap_comparison(&table, &["A"], &ComparisonConfig::default());
        let series = &comparison.drivers[0];
        let numbers: Vec<u32> = series.laps.iter().map(|p| p.lap_number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(series.time_at(3), Some(LapTime::from_millis(92_000)));
        assert_eq!(series.time_at(2), None);
    }

    /// Unique (driver, lap number) rows with a mix of valid and invalid times
    fn arb_laps() -> impl Strategy<Value = Vec<(u8, u32, Option<f64>)>> {
        prop::collection::btree_map(
            (0u8..4, 1u32..40),
            prop_oneof![
                Just(None),
                Just(Some(-1.5)),
                Just(Some(f64::NAN)),
                (60_000u32..120_000).prop_map(|ms| Some(ms as f64 / 1_000.0)),
            ],
            0..80,
        )
        .prop_map(|rows| rows.into_iter().map(|((d, n), t)| (d, n, t)).collect())
    }

    fn to_table(rows: &[(u8, u32, Option<f64>)]) -> LapTable {
        LapTable::from_laps(rows.iter().map(|(d, n, t)| lap(&d.to_string(), *n, *t)))
    }

    proptest! {
        #[test]
        fn invalid_laps_never_reach_the_series(rows in arb_laps()) {
            let table = to_table(&rows);
            let selected = ["0", "1", "2", "3"];
            let comparison = build_lap_comparison(&table, &selected, &ComparisonConfig::default());

            for series in &comparison.drivers {
                let valid_numbers: HashSet<u32> = table
                    .laps(&series.driver)
                    .iter()
                    .filter(|l| l.valid_time().is_some())
                    .map(|l| l.lap_number)
                    .collect();
                prop_assert_eq!(series.laps.len(), valid_numbers.len());
                prop_assert!(series.laps.windows(2).all(|w| w[0].lap_number < w[1].lap_number));
            }
        }

        #[test]
        fn overall_fastest_is_minimum_of_valid_laps(rows in arb_laps()) {
            let table = to_table(&rows);
            let selected = ["0", "1", "2", "3"];
            let comparison = build_lap_comparison(&table, &selected, &ComparisonConfig::default());

            let expected = rows
                .iter()
                .filter_map(|(_, _, t)| LapTime::from_raw(*t))
                .min();
            prop_assert_eq!(comparison.overall_fastest, expected);
        }

        #[test]
        fn comparison_is_idempotent(rows in arb_laps()) {
            let table = to_table(&rows);
            let selected = ["3", "1", "0"];
            let config = ComparisonConfig::default();
            prop_assert_eq!(
                build_lap_comparison(&table, &selected, &config),
                build_lap_comparison(&table, &selected, &config)
            );
        }
    }
}
