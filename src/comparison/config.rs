//! Comparison limits
//!
//! The dashboard shows at most five drivers in lap charts and tables and at
//! most three in telemetry charts. These caps shape result sizes, so they
//! are configuration rather than literals.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{AccessError, Result};

/// Driver caps for each family of comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct ComparisonConfig {
    /// Drivers feeding lap charts, fastest-lap table, lap grid and tyre stints
    pub max_comparison_drivers: usize,
    /// Drivers feeding speed, detailed channel and track map charts
    pub max_telemetry_drivers: usize,
    /// Drivers preselected after a session loads
    pub default_selection: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self { max_comparison_drivers: 5, max_telemetry_drivers: 3, default_selection: 2 }
    }
}

impl ComparisonConfig {
    /// Parse and validate YAML configuration; missing keys keep defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ComparisonConfig = serde_yaml_ng::from_str(yaml)
            .map_err(|e| AccessError::Config { details: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| AccessError::file_error(path.to_path_buf(), e))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_comparison_drivers == 0 {
            return Err(AccessError::Config {
                details: "MaxComparisonDrivers must be at least 1".to_string(),
            });
        }
        if self.max_telemetry_drivers == 0 {
            return Err(AccessError::Config {
                details: "MaxTelemetryDrivers must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
