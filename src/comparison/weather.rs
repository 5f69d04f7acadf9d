//! Session weather summary

use serde::{Deserialize, Serialize};

use crate::session::WeatherSample;

/// Mean conditions over a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct WeatherSummary {
    pub air_temp: f64,
    pub track_temp: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    /// Rain was reported at any point
    pub rainfall: bool,
    pub samples: usize,
}

impl WeatherSummary {
    /// Average the samples; `None` when there are none
    pub fn from_samples(samples: &[WeatherSample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mean = |field: fn(&WeatherSample) -> f64| {
            samples.iter().map(field).sum::<f64>() / samples.len() as f64
        };

        Some(Self {
            air_temp: mean(|s| s.air_temp),
            track_temp: mean(|s| s.track_temp),
            humidity: mean(|s| s.humidity),
            pressure: mean(|s| s.pressure),
            wind_speed: mean(|s| s.wind_speed),
            rainfall: samples.iter().any(|s| s.rainfall),
            samples: samples.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(air_temp: f64, track_temp: f64, rainfall: bool) -> WeatherSample {
        WeatherSample {
            air_temp,
            track_temp,
            humidity: 50.0,
            pressure: 1010.0,
            rainfall,
            wind_speed: 2.0,
        }
    }

    #[test]
    fn averages_and_flags_rain() {
        let summary = WeatherSummary::from_samples(&[
            sample(26.0, 30.0, false),
            sample(28.0, 34.0, true),
            sample(27.0, 32.0, false),
        ])
        .unwrap();

        assert_eq!(summary.air_temp, 27.0);
        assert_eq!(summary.track_temp, 32.0);
        assert_eq!(summary.humidity, 50.0);
        assert!(summary.rainfall);
        assert_eq!(summary.samples, 3);
    }

    #[test]
    fn dry_session_has_no_rainfall() {
        let summary = WeatherSummary::from_samples(&[sample(20.0, 25.0, false)]).unwrap();
        assert!(!summary.rainfall);
    }

    #[test]
    fn empty_table_has_no_summary() {
        assert_eq!(WeatherSummary::from_samples(&[]), None);
    }
}
