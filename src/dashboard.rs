//! Dashboard entry points
//!
//! [`Dashboard`] wires an accessor to the comparison builders for the three
//! UI callbacks: picking an event, loading a session and comparing drivers.
//! It holds no state beyond the accessor and configuration; wrap the
//! accessor in a [`CachedAccessor`](crate::accessors::CachedAccessor) to
//! avoid reloading sessions.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Result;
use crate::accessor::SessionAccessor;
use crate::comparison::{
    ComparisonConfig, DriverOption, DriverStints, FastestLapRow, LapComparison, LapGrid,
    SessionTelemetry, TelemetryComparison, WeatherSummary, build_lap_comparison, build_lap_grid,
    build_telemetry_comparison, build_tyre_stints, default_selection, driver_options,
    fastest_laps_table, normalize_selection, team_color,
};
use crate::session::SessionKey;
use crate::types::DriverId;

/// Event offered when the schedule cannot be loaded
pub const FALLBACK_EVENT: &str = "Abu Dhabi";

/// Session header and driver selector contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionOverview {
    pub key: SessionKey,
    pub event_name: String,
    pub event_date: Option<String>,
    pub session_name: String,
    pub driver_count: usize,
    pub drivers: Vec<DriverOption>,
    pub default_selection: Vec<DriverId>,
}

/// Chart styling for one selected driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DriverStyle {
    pub driver: DriverId,
    /// Abbreviation, or the id for drivers missing from the roster
    pub label: String,
    pub color: String,
}

/// Everything the comparison view renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ComparisonReport {
    pub laps: LapComparison,
    pub fastest_laps: Vec<FastestLapRow>,
    pub grid: LapGrid,
    pub telemetry: TelemetryComparison,
    pub stints: Vec<DriverStints>,
    /// Absent when the session has no weather data
    pub weather: Option<WeatherSummary>,
    pub styles: Vec<DriverStyle>,
}

impl ComparisonReport {
    fn empty(weather: Option<WeatherSummary>) -> Self {
        Self {
            laps: LapComparison { drivers: Vec::new(), overall_fastest: None },
            fastest_laps: Vec::new(),
            grid: LapGrid { drivers: Vec::new(), rows: Vec::new() },
            telemetry: TelemetryComparison::default(),
            stints: Vec::new(),
            weather,
            styles: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.laps.drivers.is_empty()
    }
}

/// Dashboard callbacks over a session accessor
pub struct Dashboard<A> {
    accessor: A,
    config: ComparisonConfig,
}

impl<A: SessionAccessor> Dashboard<A> {
    pub fn new(accessor: A) -> Self {
        Self::with_config(accessor, ComparisonConfig::default())
    }

    pub fn with_config(accessor: A, config: ComparisonConfig) -> Self {
        Self { accessor, config }
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Event names for a season, newest first
    pub async fn event_options(&self, year: u16) -> Vec<String> {
        match self.accessor.event_schedule(year).await {
            Ok(schedule) => schedule.into_iter().rev().map(|event| event.event_name).collect(),
            Err(e) => {
                warn!(year, error = %e, "Event schedule unavailable, offering fallback event");
                vec![FALLBACK_EVENT.to_string()]
            }
        }
    }

    /// Load a session and describe it for the header and driver selector
    pub async fn load_session(&self, key: &SessionKey) -> Result<SessionOverview> {
        let session = self.accessor.load_session(key).await?;
        info!(%key, drivers = session.drivers.len(), "Session ready");

        Ok(SessionOverview {
            key: key.clone(),
            event_name: session.event_name.clone(),
            event_date: session.event_date.clone(),
            session_name: session.name.clone(),
            driver_count: session.drivers.len(),
            drivers: driver_options(&session.drivers),
            default_selection: default_selection(&session.drivers, &self.config),
        })
    }

    /// Build every comparison for the selected drivers.
    ///
    /// Only the session load can fail. Missing laps or telemetry for a
    /// driver shrink the report instead.
    pub async fn compare<S: AsRef<str>>(
        &self,
        key: &SessionKey,
        selected: &[S],
    ) -> Result<ComparisonReport> {
        let session = self.accessor.load_session(key).await?;
        let weather = WeatherSummary::from_samples(&session.weather);

        if selected.is_empty() {
            return Ok(ComparisonReport::empty(weather));
        }

        let table = session.lap_table();
        let laps = build_lap_comparison(&table, selected, &self.config);
        let fastest_laps = fastest_laps_table(&laps);
        let grid = build_lap_grid(&laps);
        let stints = build_tyre_stints(&table, selected, &self.config);

        let fetcher = SessionTelemetry::new(&self.accessor, &session);
        let telemetry = build_telemetry_comparison(selected, &fetcher, &self.config).await;

        let styles = normalize_selection(selected, self.config.max_comparison_drivers)
            .into_iter()
            .map(|driver| {
                let roster = session.driver(&driver);
                DriverStyle {
                    label: roster.map_or_else(|| driver.clone(), |d| d.abbreviation.clone()),
                    color: team_color(roster.map_or("", |d| d.team_name.as_str())).to_string(),
                    driver,
                }
            })
            .collect();

        info!(
            %key,
            drivers = laps.drivers.len(),
            telemetry = telemetry.drivers.len(),
            omitted = telemetry.omitted.len(),
            "Built comparison"
        );

        Ok(ComparisonReport { laps, fastest_laps, grid, telemetry, stints, weather, styles })
    }
}
