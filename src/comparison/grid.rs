//! Lap-by-lap comparison grid
//!
//! Rows are lap numbers `1..=max_lap`, columns are the selected drivers. Each
//! row highlights its own fastest time independently of the other rows.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::laps::LapComparison;
use crate::types::{DriverId, LapDelta, LapTime};

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(tag = "kind")]
pub enum GridCell {
    /// The driver set a valid time on this lap
    Time {
        time: LapTime,
        /// `time - row fastest`, never negative
        delta: LapDelta,
        /// Equal to the row fastest; every tied driver is flagged
        is_fastest: bool,
    },
    /// No valid time on this lap
    Absent,
}

impl GridCell {
    pub fn time(&self) -> Option<LapTime> {
        match self {
            GridCell::Time { time, .. } => Some(*time),
            GridCell::Absent => None,
        }
    }

    pub fn is_fastest(&self) -> bool {
        matches!(self, GridCell::Time { is_fastest: true, .. })
    }

    /// `m:ss.mmm`, or `-` for an absent cell
    pub fn time_label(&self) -> String {
        match self {
            GridCell::Time { time, .. } => time.to_string(),
            GridCell::Absent => "-".to_string(),
        }
    }

    /// Signed delta, empty for the row's fastest and for absent cells
    pub fn delta_label(&self) -> String {
        match self {
            GridCell::Time { is_fastest: true, .. } | GridCell::Absent => String::new(),
            GridCell::Time { delta, .. } => delta.label(),
        }
    }
}

/// One lap number across all selected drivers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct GridRow {
    pub lap_number: u32,
    /// Fastest valid time on this lap, absent if nobody set one
    pub fastest: Option<LapTime>,
    /// One cell per column, in column order
    pub cells: Vec<GridCell>,
}

/// The lap comparison grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapGrid {
    /// Column order
    pub drivers: Vec<DriverId>,
    pub rows: Vec<GridRow>,
}

impl LapGrid {
    pub fn row(&self, lap_number: u32) -> Option<&GridRow> {
        lap_number.checked_sub(1).and_then(|index| self.rows.get(index as usize))
    }

    pub fn column(&self, driver: &str) -> Option<usize> {
        self.drivers.iter().position(|d| d == driver)
    }

    pub fn cell(&self, lap_number: u32, driver: &str) -> Option<&GridCell> {
        let column = self.column(driver)?;
        self.row(lap_number)?.cells.get(column)
    }
}

/// Build the grid from a lap comparison.
///
/// Columns follow the comparison's driver order, including drivers with no
/// valid laps (their cells are all [`GridCell::Absent`]).
pub fn build_lap_grid(comparison: &LapComparison) -> LapGrid {
    let max_lap = comparison.max_lap();
    let drivers: Vec<DriverId> = comparison.drivers.iter().map(|s| s.driver.clone()).collect();

    let rows: Vec<GridRow> = (1..=max_lap)
        .map(|lap_number| {
            let times: Vec<Option<LapTime>> =
                comparison.drivers.iter().map(|series| series.time_at(lap_number)).collect();

            let fastest = times.iter().flatten().min().copied();

            let cells = times
                .into_iter()
                .map(|time| match (time, fastest) {
                    (Some(time), Some(fastest)) => GridCell::Time {
                        time,
                        delta: time.delta_to(fastest),
                        is_fastest: time == fastest,
                    },
                    _ => GridCell::Absent,
                })
                .collect();

            GridRow { lap_number, fastest, cells }
        })
        .collect();

    debug!(rows = rows.len(), columns = drivers.len(), "Built lap grid");

    LapGrid { drivers, rows }
}
