//! Error types for session access.
//!
//! The comparison core never fails on partial data: drivers with no valid laps
//! or missing telemetry are dropped from the result. Errors in this module come
//! from the data accessor layer (loading a session, reading fixture files,
//! fetching telemetry) and are handed back to the caller as a tagged failure.
//!
//! ## Error Categories
//!
//! - **Lookup Errors**: Unknown event, session or session kind
//! - **File Errors**: Problems reading fixture files from disk
//! - **Parse Errors**: Malformed or inconsistent session data
//! - **Telemetry Errors**: No fastest lap or no samples for a driver
//! - **Provider Errors**: Failures inside an external data provider
//!
//! ## Recovery
//!
//! ```rust
//! use paddock::AccessError;
//!
//! let error = AccessError::provider_failed("upstream timed out");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::session::SessionKey;

/// Result type alias for session access operations.
pub type Result<T, E = AccessError> = std::result::Result<T, E>;

/// Main error type for session access.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AccessError {
    #[error("Session not available: {key}")]
    SessionNotFound { key: SessionKey },

    #[error("No event matching '{query}' in the {year} schedule")]
    EventNotFound { year: u16, query: String },

    #[error("Session file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Telemetry unavailable for driver {driver}: {reason}")]
    TelemetryUnavailable { driver: String, reason: String },

    #[error("Driver {driver} has no valid lap in this session")]
    NoValidLap { driver: String },

    #[error("Data provider failed: {reason}")]
    Provider {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unknown session kind '{value}'")]
    InvalidSessionKind { value: String },

    #[error("Invalid configuration: {details}")]
    Config { details: String },
}

impl AccessError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// The comparison core itself never retries; this is guidance for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            AccessError::Provider { .. } => true,
            AccessError::File { source, .. } => {
                matches!(source.kind(), std::io::ErrorKind::Interrupted | std::io::ErrorKind::TimedOut)
            }
            AccessError::SessionNotFound { .. } => false,
            AccessError::EventNotFound { .. } => false,
            AccessError::Parse { .. } => false,
            AccessError::TelemetryUnavailable { .. } => false,
            AccessError::NoValidLap { .. } => false,
            AccessError::InvalidSessionKind { .. } => false,
            AccessError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            AccessError::SessionNotFound { .. } => vec![
                "Check the season, event and session kind",
                "Verify the session has already taken place",
            ],
            AccessError::EventNotFound { .. } => vec![
                "Check the event name against the season schedule",
                "Use a shorter fragment of the event name",
            ],
            AccessError::File { .. } => vec![
                "Check the fixture directory exists and is readable",
                "Verify the session file name matches the session kind code",
                "Check file permissions",
            ],
            AccessError::Parse { .. } => vec![
                "Check the session file format",
                "Verify driver ids referenced by laps exist in the roster",
            ],
            AccessError::TelemetryUnavailable { .. } => vec![
                "Telemetry is not published for every session",
                "Compare a different driver or session",
            ],
            AccessError::NoValidLap { .. } => vec![
                "The driver did not set a timed lap in this session",
                "Compare a different driver or session",
            ],
            AccessError::Provider { .. } => vec![
                "Retry the request",
                "Check connectivity to the data provider",
                "Clear the provider cache",
            ],
            AccessError::InvalidSessionKind { .. } => {
                vec!["Use one of R, Q, FP1, FP2, FP3 or S"]
            }
            AccessError::Config { .. } => vec![
                "Driver caps must be at least 1",
                "Check the configuration file keys",
            ],
        }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        AccessError::File { path, source }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        AccessError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for provider failures.
    pub fn provider_failed(reason: impl Into<String>) -> Self {
        AccessError::Provider { reason: reason.into(), source: None }
    }

    /// Helper constructor for provider failures with source.
    pub fn provider_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        AccessError::Provider { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for missing telemetry.
    pub fn telemetry_unavailable(driver: impl Into<String>, reason: impl Into<String>) -> Self {
        AccessError::TelemetryUnavailable { driver: driver.into(), reason: reason.into() }
    }
}

impl From<serde_yaml_ng::Error> for AccessError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        AccessError::Parse { context: "YAML deserialization".to_string(), details: err.to_string() }
    }
}
