//! # Session Data
//!
//! Read-only projections of one on-track session as handed over by a data
//! accessor: the driver roster, the lap table, weather samples and the
//! telemetry recorded for individual laps.
//!
//! Sessions are plain data. They are fetched fresh per request (or served
//! from an accessor-level cache keyed by [`SessionKey`]) and never mutated
//! by the comparison core.
//!
//! ## File Format
//!
//! Sessions deserialize from PascalCase YAML:
//!
//! ```text
//! Year: 2024
//! EventName: Abu Dhabi Grand Prix
//! EventDate: "2024-12-08"
//! Kind: R
//! Name: Race
//! Drivers:
//!   - Id: "1"
//!     Abbreviation: VER
//!     FullName: Max Verstappen
//!     TeamName: Red Bull Racing
//! Laps:
//!   - Driver: "1"
//!     LapNumber: 1
//!     LapTime: 90.123
//!     Compound: MEDIUM
//!     TyreLife: 1
//! Weather: []
//! Telemetry: []
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::types::{DriverId, LapTime, SessionKind, TyreCompound};
use crate::{AccessError, Result};

/// Explicit identity of a session, used as the accessor cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionKey {
    pub year: u16,
    pub event: String,
    pub kind: SessionKind,
}

impl SessionKey {
    pub fn new(year: u16, event: impl Into<String>, kind: SessionKind) -> Self {
        Self { year, event: event.into(), kind }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.event, self.kind)
    }
}

/// One row of a season's event schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
pub struct EventInfo {
    /// Round number within the season
    pub round_number: u32,
    /// Official event name
    pub event_name: String,
    /// Event date (ISO-8601)
    #[serde(default)]
    pub event_date: Option<String>,
}

/// Driver entry from the session roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
pub struct Driver {
    /// Provider identifier, unique within the session
    pub id: DriverId,
    /// Three-letter abbreviation
    pub abbreviation: String,
    pub full_name: String,
    pub team_name: String,
}

/// One lap by one driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
pub struct Lap {
    /// Owning driver id
    pub driver: DriverId,
    /// Lap number, starting at 1
    pub lap_number: u32,
    /// Raw lap time in seconds; absent for in/out laps and deleted times
    #[serde(default)]
    pub lap_time: Option<f64>,
    #[serde(default)]
    pub compound: Option<TyreCompound>,
    /// Laps driven on this set of tyres
    #[serde(default)]
    pub tyre_life: Option<u32>,
}

impl Lap {
    /// Lap time if it is present and valid
    pub fn valid_time(&self) -> Option<LapTime> {
        LapTime::from_raw(self.lap_time)
    }
}

/// One car-state reading along a lap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
pub struct TelemetrySample {
    /// Meters from the start of the lap
    pub distance: f64,
    /// km/h
    pub speed: f64,
    /// Throttle percentage 0-100
    pub throttle: f64,
    /// Brake pedal on/off
    pub brake: bool,
    pub gear: u8,
    pub x: f64,
    pub y: f64,
}

/// Telemetry recorded for one lap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LapTelemetry {
    pub driver: DriverId,
    pub lap_number: u32,
    pub samples: Vec<TelemetrySample>,
}

/// One weather station reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
pub struct WeatherSample {
    /// °C
    pub air_temp: f64,
    /// °C
    pub track_temp: f64,
    /// %
    pub humidity: f64,
    /// mbar
    pub pressure: f64,
    pub rainfall: bool,
    /// km/h
    pub wind_speed: f64,
}

/// A loaded session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Session {
    pub year: u16,
    pub event_name: String,
    #[serde(default)]
    pub event_date: Option<String>,
    pub kind: SessionKind,
    /// Session display name
    pub name: String,
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub laps: Vec<Lap>,
    #[serde(default)]
    pub weather: Vec<WeatherSample>,
    /// Per-lap telemetry, only read through an accessor
    #[serde(default)]
    pub telemetry: Vec<LapTelemetry>,
}

impl Session {
    /// Parse and validate session YAML
    pub fn parse(yaml: &str) -> Result<Self> {
        let session: Session = serde_yaml_ng::from_str(yaml)?;
        session.validate()?;
        Ok(session)
    }

    /// Canonical key of this session
    pub fn key(&self) -> SessionKey {
        SessionKey::new(self.year, self.event_name.clone(), self.kind)
    }

    /// Check roster and lap table consistency
    pub fn validate(&self) -> Result<()> {
        if self.event_name.trim().is_empty() {
            return Err(AccessError::parse_error("Session validation", "Missing event name"));
        }

        let mut ids = HashSet::with_capacity(self.drivers.len());
        for driver in &self.drivers {
            if !ids.insert(driver.id.as_str()) {
                return Err(AccessError::parse_error(
                    "Session validation",
                    format!("Duplicate driver id {}", driver.id),
                ));
            }
        }

        for lap in &self.laps {
            if lap.lap_number == 0 {
                return Err(AccessError::parse_error(
                    "Session validation",
                    format!("Driver {} has a lap numbered 0", lap.driver),
                ));
            }
            if !ids.contains(lap.driver.as_str()) {
                return Err(AccessError::parse_error(
                    "Session validation",
                    format!("Lap {} references unknown driver {}", lap.lap_number, lap.driver),
                ));
            }
        }

        Ok(())
    }

    /// Roster entry for a driver id
    pub fn driver(&self, id: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    /// All laps of a driver, in table order
    pub fn laps_for<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Lap> {
        self.laps.iter().filter(move |lap| lap.driver == id)
    }

    /// The driver's fastest valid lap; ties go to the lowest lap number
    pub fn fastest_lap(&self, id: &str) -> Option<&Lap> {
        self.laps_for(id)
            .filter_map(|lap| lap.valid_time().map(|time| (time, lap.lap_number, lap)))
            .min_by_key(|(time, lap_number, _)| (*time, *lap_number))
            .map(|(_, _, lap)| lap)
    }

    /// Telemetry samples recorded for one lap
    pub fn telemetry_for(&self, id: &str, lap_number: u32) -> Option<&[TelemetrySample]> {
        self.telemetry
            .iter()
            .find(|t| t.driver == id && t.lap_number == lap_number)
            .map(|t| t.samples.as_slice())
    }

    /// Lap table grouped by driver
    pub fn lap_table(&self) -> LapTable {
        LapTable::from_laps(self.laps.iter().cloned())
    }
}

/// Laps grouped by driver, each driver's laps kept in table order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LapTable {
    by_driver: HashMap<DriverId, Vec<Lap>>,
}

impl LapTable {
    pub fn from_laps(laps: impl IntoIterator<Item = Lap>) -> Self {
        let mut by_driver: HashMap<DriverId, Vec<Lap>> = HashMap::new();
        for lap in laps {
            by_driver.entry(lap.driver.clone()).or_default().push(lap);
        }
        Self { by_driver }
    }

    /// Laps of one driver; empty when the driver has none
    pub fn laps(&self, driver: &str) -> &[Lap] {
        self.by_driver.get(driver).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{driver, lap, sample_session};

    #[test]
    fn fastest_lap_prefers_lowest_lap_number_on_ties() {
        let mut session = sample_session();
        session.laps = vec![
            lap("1", 1, Some(90.5)),
            lap("1", 2, Some(89.5)),
            lap("1", 3, Some(89.5)),
            lap("1", 4, None),
        ];

        let fastest = session.fastest_lap("1").unwrap();
        assert_eq!(fastest.lap_number, 2);
        assert!(session.fastest_lap("44").is_none());
    }

    #[test]
    fn fastest_lap_ignores_invalid_times() {
        let mut session = sample_session();
        session.laps = vec![lap("1", 1, Some(-1.0)), lap("1", 2, Some(f64::NAN)), lap("1", 3, None)];
        assert!(session.fastest_lap("1").is_none());
    }

    #[test]
    fn validation_rejects_unknown_driver_laps() {
        let mut session = sample_session();
        session.laps.push(lap("99", 1, Some(90.0)));
        let err = session.validate().unwrap_err();
        assert!(matches!(err, AccessError::Parse { ref details, .. } if details.contains("99")));
    }

    #[test]
    fn validation_rejects_duplicate_driver_ids() {
        let mut session = sample_session();
        session.drivers.push(driver("1", "DUP", "Duplicate Driver", "Nowhere"));
        assert!(session.validate().is_err());
    }

    #[test]
    fn validation_rejects_lap_zero() {
        let mut session = sample_session();
        session.laps.push(lap("1", 0, Some(90.0)));
        assert!(session.validate().is_err());
    }

    #[test]
    fn parse_reads_pascal_case_yaml() {
        let yaml = r#"
Year: 2024
EventName: Abu Dhabi Grand Prix
EventDate: "2024-12-08"
Kind: R
Name: Race
Drivers:
  - Id: "4"
    Abbreviation: NOR
    FullName: Lando Norris
    TeamName: McLaren
Laps:
  - Driver: "4"
    LapNumber: 1
    LapTime: 90.123
    Compound: MEDIUM
    TyreLife: 1
  - Driver: "4"
    LapNumber: 2
"#;
        let session = Session::parse(yaml).unwrap();
        assert_eq!(session.key(), SessionKey::new(2024, "Abu Dhabi Grand Prix", SessionKind::Race));
        assert_eq!(session.laps.len(), 2);
        assert_eq!(session.laps[0].compound, Some(TyreCompound::Medium));
        assert_eq!(session.laps[1].lap_time, None);
        assert!(session.weather.is_empty());
    }

    #[test]
    fn parse_reports_malformed_yaml() {
        let err = Session::parse("Year: [not, a, year]").unwrap_err();
        assert!(matches!(err, AccessError::Parse { ref context, .. } if context == "YAML deserialization"));
    }

    #[test]
    fn lap_table_groups_by_driver() {
        let table = LapTable::from_laps(vec![
            lap("1", 1, Some(90.0)),
            lap("16", 1, Some(91.0)),
            lap("1", 2, Some(89.0)),
        ]);
        assert_eq!(table.laps("1").len(), 2);
        assert_eq!(table.laps("16").len(), 1);
        assert!(table.laps("44").is_empty());
    }
}
