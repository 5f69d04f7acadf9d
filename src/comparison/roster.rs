//! Driver roster helpers for selectors and chart styling

use serde::{Deserialize, Serialize};

use super::ComparisonConfig;
use crate::session::Driver;
use crate::types::DriverId;

/// Team colours for the 2024-25 grid
pub const TEAM_COLORS: &[(&str, &str)] = &[
    ("Red Bull Racing", "#3671C6"),
    ("Ferrari", "#E8002D"),
    ("Mercedes", "#27F4D2"),
    ("McLaren", "#FF8000"),
    ("Aston Martin", "#229971"),
    ("Alpine", "#FF87BC"),
    ("Williams", "#64C4FF"),
    ("RB", "#6692FF"),
    ("Kick Sauber", "#52E252"),
    ("Haas F1 Team", "#B6BABD"),
];

/// Colour for teams missing from [`TEAM_COLORS`]
pub const DEFAULT_TEAM_COLOR: &str = "#ffffff";

/// Seasons offered by the season selector
pub const SEASONS: std::ops::RangeInclusive<u16> = 2022..=2025;

/// Entry of the driver selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DriverOption {
    pub value: DriverId,
    /// `ABB - Full Name`
    pub label: String,
}

pub fn driver_options(drivers: &[Driver]) -> Vec<DriverOption> {
    drivers
        .iter()
        .map(|d| DriverOption {
            value: d.id.clone(),
            label: format!("{} - {}", d.abbreviation, d.full_name),
        })
        .collect()
}

/// Ids preselected after a session loads, in roster order
pub fn default_selection(drivers: &[Driver], config: &ComparisonConfig) -> Vec<DriverId> {
    drivers.iter().take(config.default_selection).map(|d| d.id.clone()).collect()
}

/// Exact team name lookup
pub fn team_color(team_name: &str) -> &'static str {
    TEAM_COLORS
        .iter()
        .find(|(team, _)| *team == team_name)
        .map_or(DEFAULT_TEAM_COLOR, |(_, color)| *color)
}

/// Season selector entries, newest first
pub fn season_options() -> Vec<u16> {
    SEASONS.rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{driver, sample_session};

    #[test]
    fn options_use_abbreviation_and_full_name() {
        let options = driver_options(&sample_session().drivers);
        assert_eq!(options[0].value, "1");
        assert_eq!(options[0].label, "VER - Max Verstappen");
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn default_selection_takes_first_drivers() {
        let session = sample_session();
        assert_eq!(
            default_selection(&session.drivers, &ComparisonConfig::default()),
            vec!["1".to_string(), "16".to_string()]
        );

        let single = vec![driver("4", "NOR", "Lando Norris", "McLaren")];
        assert_eq!(default_selection(&single, &ComparisonConfig::default()).len(), 1);
        assert!(default_selection(&[], &ComparisonConfig::default()).is_empty());
    }

    #[test]
    fn unknown_team_falls_back_to_white() {
        assert_eq!(team_color("Ferrari"), "#E8002D");
        assert_eq!(team_color("Haas F1 Team"), "#B6BABD");
        assert_eq!(team_color("ferrari"), DEFAULT_TEAM_COLOR);
        assert_eq!(team_color("Toro Rosso"), DEFAULT_TEAM_COLOR);
    }

    #[test]
    fn seasons_are_newest_first() {
        assert_eq!(season_options(), vec![2025, 2024, 2023, 2022]);
    }
}
