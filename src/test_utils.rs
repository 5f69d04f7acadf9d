//! Test utilities: in-memory sessions, a stub accessor and test data paths
//!
//! Shared by unit tests and benchmarks (via the `benchmark` feature).

#![cfg(any(test, feature = "benchmark"))]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::accessor::SessionAccessor;
use crate::session::{
    Driver, EventInfo, Lap, LapTelemetry, Session, SessionKey, TelemetrySample, WeatherSample,
};
use crate::types::{SessionKind, TyreCompound};
use crate::{AccessError, Result};

/// The crate's test-data directory
pub fn test_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data")
}

/// Root of the YAML session fixtures, laid out for `FixtureAccessor`
pub fn sessions_fixture_root() -> PathBuf {
    test_data_dir().join("sessions")
}

pub fn driver(id: &str, abbreviation: &str, full_name: &str, team_name: &str) -> Driver {
    Driver {
        id: id.to_string(),
        abbreviation: abbreviation.to_string(),
        full_name: full_name.to_string(),
        team_name: team_name.to_string(),
    }
}

/// Lap without compound or tyre life
pub fn lap(driver: &str, lap_number: u32, lap_time: Option<f64>) -> Lap {
    Lap { driver: driver.to_string(), lap_number, lap_time, compound: None, tyre_life: None }
}

fn lap_on(
    driver: &str,
    lap_number: u32,
    lap_time: Option<f64>,
    compound: TyreCompound,
    tyre_life: u32,
) -> Lap {
    Lap { compound: Some(compound), tyre_life: Some(tyre_life), ..lap(driver, lap_number, lap_time) }
}

/// `n` samples with strictly increasing distance and speed
pub fn samples(n: usize) -> Vec<TelemetrySample> {
    (0..n)
        .map(|i| {
            let i = i as f64;
            TelemetrySample {
                distance: i * 25.0,
                speed: 180.0 + i * 4.5,
                throttle: (60.0 + i * 10.0).min(100.0),
                brake: false,
                gear: (3.0 + i / 4.0).min(8.0) as u8,
                x: i * 12.0,
                y: -i * 3.0,
            }
        })
        .collect()
}

/// Three-driver race with a tied fastest lap, a driver without valid laps,
/// weather and telemetry for one driver's fastest lap only.
pub fn sample_session() -> Session {
    Session {
        year: 2024,
        event_name: "Abu Dhabi Grand Prix".to_string(),
        event_date: Some("2024-12-08".to_string()),
        kind: SessionKind::Race,
        name: "Race".to_string(),
        drivers: vec![
            driver("1", "VER", "Max Verstappen", "Red Bull Racing"),
            driver("16", "LEC", "Charles Leclerc", "Ferrari"),
            driver("44", "HAM", "Lewis Hamilton", "Mercedes"),
        ],
        laps: vec![
            lap_on("1", 1, Some(90.123), TyreCompound::Medium, 1),
            lap_on("1", 2, Some(89.5), TyreCompound::Medium, 2),
            lap_on("1", 3, Some(89.9), TyreCompound::Hard, 1),
            lap_on("16", 1, Some(91.0), TyreCompound::Soft, 1),
            lap_on("16", 2, Some(89.5), TyreCompound::Soft, 2),
            lap_on("16", 3, None, TyreCompound::Hard, 1),
            lap("44", 1, None),
            lap("44", 2, None),
        ],
        weather: vec![
            WeatherSample {
                air_temp: 26.0,
                track_temp: 31.0,
                humidity: 55.0,
                pressure: 1012.0,
                rainfall: false,
                wind_speed: 2.0,
            },
            WeatherSample {
                air_temp: 25.0,
                track_temp: 29.0,
                humidity: 57.0,
                pressure: 1012.0,
                rainfall: false,
                wind_speed: 3.0,
            },
        ],
        telemetry: vec![LapTelemetry { driver: "1".to_string(), lap_number: 2, samples: samples(6) }],
    }
}

/// Write `session` and a two-event schedule as a fixture tree under `root`
pub fn write_fixture_tree(root: &Path, session: &Session) {
    let year_dir = root.join(session.year.to_string());
    let schedule = vec![
        EventInfo {
            round_number: 1,
            event_name: "Bahrain Grand Prix".to_string(),
            event_date: Some(format!("{}-03-02", session.year)),
        },
        EventInfo {
            round_number: 24,
            event_name: session.event_name.clone(),
            event_date: session.event_date.clone(),
        },
    ];

    let session_dir = year_dir.join(crate::accessors::FixtureAccessor::slug(&session.event_name));
    std::fs::create_dir_all(&session_dir).expect("create fixture dirs");
    std::fs::write(
        year_dir.join("schedule.yaml"),
        serde_yaml_ng::to_string(&schedule).expect("serialize schedule"),
    )
    .expect("write schedule");
    std::fs::write(
        session_dir.join(format!("{}.yaml", session.kind.code())),
        serde_yaml_ng::to_string(session).expect("serialize session"),
    )
    .expect("write session");
}

/// In-memory accessor that counts session loads
pub struct StubAccessor {
    sessions: Vec<Session>,
    load_count: AtomicUsize,
}

impl StubAccessor {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions, load_count: AtomicUsize::new(0) }
    }

    /// Number of `load_session` calls that reached this accessor
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SessionAccessor for StubAccessor {
    async fn event_schedule(&self, year: u16) -> Result<Vec<EventInfo>> {
        let mut schedule: Vec<EventInfo> = Vec::new();
        for session in self.sessions.iter().filter(|s| s.year == year) {
            if !schedule.iter().any(|e| e.event_name == session.event_name) {
                schedule.push(EventInfo {
                    round_number: schedule.len() as u32 + 1,
                    event_name: session.event_name.clone(),
                    event_date: session.event_date.clone(),
                });
            }
        }
        if schedule.is_empty() {
            return Err(AccessError::provider_failed(format!("No schedule for {year}")));
        }
        Ok(schedule)
    }

    async fn load_session(&self, key: &SessionKey) -> Result<Arc<Session>> {
        self.load_count.fetch_add(1, Ordering::SeqCst);
        let needle = key.event.to_lowercase();
        self.sessions
            .iter()
            .find(|s| {
                s.year == key.year
                    && s.kind == key.kind
                    && s.event_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .map(Arc::new)
            .ok_or_else(|| AccessError::SessionNotFound { key: key.clone() })
    }

    async fn fastest_lap_telemetry(
        &self,
        session: &Session,
        driver: &str,
    ) -> Result<Vec<TelemetrySample>> {
        let lap = session
            .fastest_lap(driver)
            .ok_or_else(|| AccessError::NoValidLap { driver: driver.to_string() })?;
        session
            .telemetry_for(driver, lap.lap_number)
            .filter(|samples| !samples.is_empty())
            .map(<[TelemetrySample]>::to_vec)
            .ok_or_else(|| AccessError::telemetry_unavailable(driver, "no samples recorded"))
    }
}
