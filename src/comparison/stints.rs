//! Tyre stints

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ComparisonConfig;
use super::laps::normalize_selection;
use crate::session::LapTable;
use crate::types::{DriverId, TyreCompound};

/// Contiguous run of laps on one compound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Stint {
    pub compound: TyreCompound,
    pub start_lap: u32,
    pub end_lap: u32,
    /// Laps in the run
    pub laps: u32,
    /// Highest reported tyre life in the run
    pub max_tyre_life: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DriverStints {
    pub driver: DriverId,
    pub stints: Vec<Stint>,
}

/// Group each selected driver's laps into compound stints.
///
/// Laps without a compound are skipped, so a run separated only by unknown
/// laps stays one stint. Lap times play no part here.
pub fn build_tyre_stints<S: AsRef<str>>(
    table: &LapTable,
    selected: &[S],
    config: &ComparisonConfig,
) -> Vec<DriverStints> {
    normalize_selection(selected, config.max_comparison_drivers)
        .into_iter()
        .map(|driver| {
            let mut laps: Vec<_> = table
                .laps(&driver)
                .iter()
                .filter_map(|lap| lap.compound.map(|c| (lap.lap_number, c, lap.tyre_life)))
                .collect();
            laps.sort_by_key(|(lap_number, _, _)| *lap_number);

            let mut stints: Vec<Stint> = Vec::new();
            for (lap_number, compound, tyre_life) in laps {
                match stints.last_mut() {
                    Some(stint) if stint.compound == compound => {
                        stint.end_lap = lap_number;
                        stint.laps += 1;
                        stint.max_tyre_life = stint.max_tyre_life.max(tyre_life);
                    }
                    _ => stints.push(Stint {
                        compound,
                        start_lap: lap_number,
                        end_lap: lap_number,
                        laps: 1,
                        max_tyre_life: tyre_life,
                    }),
                }
            }

            trace!(driver = %driver, stints = stints.len(), "Tyre stints");
            DriverStints { driver, stints }
        })
        .collect()
}
