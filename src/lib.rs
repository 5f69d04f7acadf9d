//! Lap and telemetry comparison core for Formula 1 session dashboards.
//!
//! Paddock turns a loaded session (driver roster, lap table, weather and
//! per-lap telemetry) into the data behind a driver comparison view.
//!
//! # Features
//!
//! - **Lap comparison**: per-driver lap series with fastest laps and the
//!   overall fastest lap of the selection
//! - **Lap grid**: lap-by-lap times with per-row fastest and deltas
//! - **Telemetry comparison**: fastest-lap speed, throttle, brake and gear
//!   traces plus a track map, with per-driver failure isolation
//! - **Accessor seam**: sessions come from any [`SessionAccessor`]; a YAML
//!   fixture accessor and a session cache ship with the crate
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paddock::{Paddock, SessionKey, SessionKind};
//!
//! #[tokio::main]
//! async fn main() -> paddock::Result<()> {
//!     let dashboard = Paddock::open_fixtures("test-data/sessions");
//!     let key = SessionKey::new(2024, "Abu Dhabi", SessionKind::Race);
//!
//!     let overview = dashboard.load_session(&key).await?;
//!     let report = dashboard.compare(&key, &overview.default_selection).await?;
//!
//!     for row in &report.fastest_laps {
//!         println!("{} lap {}: {}", row.driver, row.lap_number, row.time);
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Data access
pub mod accessor;
pub mod accessors;
pub mod session;

// Comparison and wiring
pub mod comparison;
pub mod dashboard;

// Core exports
pub use error::*;
pub use types::*;

pub use accessor::SessionAccessor;
pub use accessors::{CachedAccessor, FixtureAccessor};
pub use session::{
    Driver, EventInfo, Lap, LapTable, Session, SessionKey, TelemetrySample, WeatherSample,
};

pub use comparison::{
    ComparisonConfig, GridCell, LapComparison, LapGrid, TelemetryComparison,
    build_lap_comparison, build_lap_grid, build_telemetry_comparison,
};
pub use dashboard::{ComparisonReport, Dashboard, SessionOverview};

/// Entry point for common accessor stacks.
pub struct Paddock;

impl Paddock {
    /// Dashboard over a directory of YAML session fixtures, with session caching.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use paddock::Paddock;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let dashboard = Paddock::open_fixtures("sessions");
    /// let events = dashboard.event_options(2024).await;
    /// # }
    /// ```
    pub fn open_fixtures<P: AsRef<std::path::Path>>(
        root: P,
    ) -> Dashboard<CachedAccessor<FixtureAccessor>> {
        Dashboard::new(CachedAccessor::new(FixtureAccessor::new(root)))
    }

    /// Same as [`Paddock::open_fixtures`] with explicit comparison limits.
    pub fn open_fixtures_with_config<P: AsRef<std::path::Path>>(
        root: P,
        config: ComparisonConfig,
    ) -> Dashboard<CachedAccessor<FixtureAccessor>> {
        Dashboard::with_config(CachedAccessor::new(FixtureAccessor::new(root)), config)
    }
}
