//! Fixed-point lap durations
//!
//! Lap times are held as whole microseconds so that ties compare exactly and
//! deltas never pick up floating point noise.

use serde::{Deserialize, Serialize};
use std::fmt;

const MICROS_PER_SEC: f64 = 1_000_000.0;

/// Largest representable lap time; deltas between any two times fit in `i64`
const MAX_MICROS: u64 = i64::MAX as u64;

/// A valid (present, finite, non-negative) lap duration in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(transparent)]
pub struct LapTime(u64);

impl LapTime {
    /// Build from whole microseconds, clamped to the representable range
    pub const fn from_micros(micros: u64) -> Self {
        Self(if micros > MAX_MICROS { MAX_MICROS } else { micros })
    }

    /// Build from whole milliseconds, clamped to the representable range
    pub const fn from_millis(millis: u64) -> Self {
        Self::from_micros(millis.saturating_mul(1_000))
    }

    /// Convert provider seconds into a lap time.
    ///
    /// Returns `None` for NaN, infinite, negative or out-of-range values:
    /// such laps are treated as invalid and excluded from every aggregation.
    pub fn from_secs_f64(secs: f64) -> Option<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        let micros = (secs * MICROS_PER_SEC).round();
        // MAX_MICROS as f64 rounds up to 2^63, itself out of range
        if micros >= MAX_MICROS as f64 {
            return None;
        }
        Some(Self(micros as u64))
    }

    /// Validate an optional raw provider value
    pub fn from_raw(raw: Option<f64>) -> Option<Self> {
        raw.and_then(Self::from_secs_f64)
    }

    pub fn as_micros(self) -> u64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / MICROS_PER_SEC
    }

    /// Signed difference `self - reference`
    pub fn delta_to(self, reference: LapTime) -> LapDelta {
        // Both values are at most MAX_MICROS, so the difference fits
        LapDelta(self.0 as i64 - reference.0 as i64)
    }
}

/// Formats as `m:ss.mmm`, rounded to the nearest millisecond.
impl fmt::Display for LapTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0.saturating_add(500) / 1_000;
        let minutes = millis / 60_000;
        let seconds = (millis % 60_000) / 1_000;
        write!(f, "{}:{:02}.{:03}", minutes, seconds, millis % 1_000)
    }
}

/// Signed difference between two lap times in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(transparent)]
pub struct LapDelta(i64);

impl LapDelta {
    pub const ZERO: LapDelta = LapDelta(0);

    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub fn as_micros(self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / MICROS_PER_SEC
    }

    /// Exactly zero; see [`LapDelta::rounds_to_zero`] for display purposes
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Magnitude rounded to the nearest millisecond
    fn abs_millis(self) -> u64 {
        self.0.unsigned_abs().saturating_add(500) / 1_000
    }

    /// Zero once rounded to milliseconds
    pub fn rounds_to_zero(self) -> bool {
        self.abs_millis() == 0
    }

    /// Short label for comparison cells: empty when it rounds to zero,
    /// signed otherwise
    pub fn label(self) -> String {
        if self.rounds_to_zero() { String::new() } else { self.to_string() }
    }
}

/// Formats as `+s.mmm` / `-s.mmm`; anything that rounds to zero has no sign.
impl fmt::Display for LapDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.abs_millis();
        let sign = match self.0.signum() {
            _ if millis == 0 => "",
            1 => "+",
            -1 => "-",
            _ => "",
        };
        write!(f, "{}{}.{:03}", sign, millis / 1_000, millis % 1_000)
    }
}
