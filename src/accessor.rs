//! Accessor trait for session data sources

use std::sync::Arc;

use crate::Result;
use crate::session::{EventInfo, Session, SessionKey, TelemetrySample};

/// Trait for motorsport data sources
///
/// Accessors abstract over where session data comes from (fixture files,
/// a remote timing API, an on-disk provider cache). All I/O and any caching
/// live behind this trait; the comparison core only consumes its output.
#[async_trait::async_trait]
pub trait SessionAccessor: Send + Sync {
    /// Get the event schedule for a season, in round order
    async fn event_schedule(&self, year: u16) -> Result<Vec<EventInfo>>;

    /// Load a session
    ///
    /// Returns:
    /// - `Ok(session)` - Roster, lap table and weather are available
    /// - `Err(AccessError::SessionNotFound)` - No such session
    /// - `Err(e)` - Any other provider failure
    async fn load_session(&self, key: &SessionKey) -> Result<Arc<Session>>;

    /// Get telemetry for a driver's fastest valid lap
    ///
    /// Returns:
    /// - `Ok(samples)` - Samples ordered by distance
    /// - `Err(AccessError::NoValidLap)` - Driver has no timed lap
    /// - `Err(AccessError::TelemetryUnavailable)` - Lap exists but has no telemetry
    async fn fastest_lap_telemetry(
        &self,
        session: &Session,
        driver: &str,
    ) -> Result<Vec<TelemetrySample>>;
}
