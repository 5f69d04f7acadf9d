//! # Comparison Builder
//!
//! Pure transformations from a loaded session into the data behind the
//! dashboard's charts and tables:
//!
//! - [`build_lap_comparison`]: per-driver lap series, fastest laps and the
//!   overall fastest lap
//! - [`build_lap_grid`]: lap-by-lap grid with per-row fastest and deltas
//! - [`build_telemetry_comparison`]: fastest-lap telemetry traces, fetched
//!   through a [`TelemetryFetcher`]
//! - [`build_tyre_stints`] and [`WeatherSummary`] for the strategy and
//!   weather panels
//!
//! Nothing here caches or mutates input. Missing data degrades by omission:
//! a driver with no valid laps gets an empty series, an absent lap becomes
//! an absent cell, a failed telemetry fetch becomes an [`OmittedDriver`].

pub mod config;
pub mod grid;
pub mod laps;
pub mod roster;
pub mod stints;
pub mod telemetry;
pub mod weather;

pub use config::ComparisonConfig;
pub use grid::{GridCell, GridRow, LapGrid, build_lap_grid};
pub use laps::{
    DriverLapSeries, FastestLapRow, LapComparison, LapPoint, build_lap_comparison,
    fastest_laps_table, normalize_selection,
};
pub use roster::{
    DriverOption, default_selection, driver_options, season_options, team_color,
};
pub use stints::{DriverStints, Stint, build_tyre_stints};
pub use telemetry::{
    ChannelPoint, DriverTelemetry, OmittedDriver, SessionTelemetry, TelemetryComparison,
    TelemetryFetcher, TrackPoint, build_telemetry_comparison,
};
pub use weather::WeatherSummary;
