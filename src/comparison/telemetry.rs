//! Fastest-lap telemetry comparison
//!
//! Fetches telemetry for each selected driver's fastest lap and shapes it
//! into channel traces (speed, throttle, brake, gear by distance) and a track
//! map trace. A driver without a valid lap is skipped; a failed fetch only
//! removes that driver from the result.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ComparisonConfig;
use super::laps::normalize_selection;
use crate::accessor::SessionAccessor;
use crate::session::{Session, TelemetrySample};
use crate::types::DriverId;
use crate::{AccessError, Result};

/// Capability to fetch a driver's fastest-lap telemetry
#[async_trait::async_trait]
pub trait TelemetryFetcher: Send + Sync {
    async fn fastest_lap_telemetry(&self, driver: &str) -> Result<Vec<TelemetrySample>>;
}

/// Fetcher bound to one loaded session of an accessor
pub struct SessionTelemetry<'a, A: ?Sized> {
    accessor: &'a A,
    session: &'a Session,
}

impl<'a, A: SessionAccessor + ?Sized> SessionTelemetry<'a, A> {
    pub fn new(accessor: &'a A, session: &'a Session) -> Self {
        Self { accessor, session }
    }
}

#[async_trait::async_trait]
impl<'a, A: SessionAccessor + ?Sized> TelemetryFetcher for SessionTelemetry<'a, A> {
    async fn fastest_lap_telemetry(&self, driver: &str) -> Result<Vec<TelemetrySample>> {
        self.accessor.fastest_lap_telemetry(self.session, driver).await
    }
}

/// Channel values at one distance along the lap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ChannelPoint {
    pub distance: f64,
    pub speed: f64,
    pub throttle: f64,
    pub brake: bool,
    pub gear: u8,
}

/// Track map position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TrackPoint {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

/// Shaped telemetry for one driver's fastest lap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DriverTelemetry {
    pub driver: DriverId,
    /// Ordered by distance, as delivered by the accessor
    pub channels: Vec<ChannelPoint>,
    pub track: Vec<TrackPoint>,
}

impl DriverTelemetry {
    fn from_samples(driver: DriverId, samples: &[TelemetrySample]) -> Self {
        let channels = samples
            .iter()
            .map(|s| ChannelPoint {
                distance: s.distance,
                speed: s.speed,
                throttle: s.throttle,
                brake: s.brake,
                gear: s.gear,
            })
            .collect();
        let track = samples.iter().map(|s| TrackPoint { x: s.x, y: s.y, speed: s.speed }).collect();
        Self { driver, channels, track }
    }

    /// Highest speed on the lap
    pub fn top_speed(&self) -> Option<f64> {
        self.channels.iter().map(|c| c.speed).reduce(f64::max)
    }
}

/// A selected driver left out of the telemetry result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct OmittedDriver {
    pub driver: DriverId,
    /// Accessor error message
    pub reason: String,
}

/// Telemetry for the first `max_telemetry_drivers` selected drivers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TelemetryComparison {
    /// Drivers whose fetch succeeded, in selection order
    pub drivers: Vec<DriverTelemetry>,
    /// Drivers whose fetch failed, in selection order
    pub omitted: Vec<OmittedDriver>,
}

impl TelemetryComparison {
    pub fn driver(&self, driver: &str) -> Option<&DriverTelemetry> {
        self.drivers.iter().find(|t| t.driver == driver)
    }
}

/// Fetch and shape fastest-lap telemetry for the selection.
///
/// Fetches for one request run concurrently on the calling task. A driver
/// with no valid lap is left out of both lists. Any other error for a driver
/// (no telemetry, provider failure) moves that driver to
/// [`TelemetryComparison::omitted`] and the rest continue.
pub async fn build_telemetry_comparison<S, F>(
    selected: &[S],
    fetcher: &F,
    config: &ComparisonConfig,
) -> TelemetryComparison
where
    S: AsRef<str>,
    F: TelemetryFetcher + ?Sized,
{
    let selection = normalize_selection(selected, config.max_telemetry_drivers);

    let results =
        join_all(selection.iter().map(|driver| fetcher.fastest_lap_telemetry(driver))).await;

    let mut comparison = TelemetryComparison::default();
    for (driver, result) in selection.into_iter().zip(results) {
        match result {
            Ok(samples) => {
                debug!(driver = %driver, samples = samples.len(), "Fastest lap telemetry");
                comparison.drivers.push(DriverTelemetry::from_samples(driver, &samples));
            }
            Err(AccessError::NoValidLap { .. }) => {
                debug!(driver = %driver, "No valid lap, skipping telemetry");
            }
            Err(e) => {
                warn!(driver = %driver, error = %e, "Omitting driver from telemetry comparison");
                comparison.omitted.push(OmittedDriver { driver, reason: e.to_string() });
            }
        }
    }

    comparison
}
