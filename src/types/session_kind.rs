//! Session kinds within an event weekend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AccessError;

/// On-track activity within an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SessionKind {
    #[serde(rename = "R", alias = "Race")]
    Race,
    #[serde(rename = "Q", alias = "Qualifying")]
    Qualifying,
    #[serde(rename = "FP1", alias = "Practice1")]
    Practice1,
    #[serde(rename = "FP2", alias = "Practice2")]
    Practice2,
    #[serde(rename = "FP3", alias = "Practice3")]
    Practice3,
    #[serde(rename = "S", alias = "Sprint")]
    Sprint,
}

impl SessionKind {
    /// All kinds in selector order
    pub const ALL: [SessionKind; 6] = [
        SessionKind::Race,
        SessionKind::Qualifying,
        SessionKind::Practice1,
        SessionKind::Practice2,
        SessionKind::Practice3,
        SessionKind::Sprint,
    ];

    /// Provider session identifier (`R`, `Q`, `FP1`, ...)
    pub fn code(self) -> &'static str {
        match self {
            SessionKind::Race => "R",
            SessionKind::Qualifying => "Q",
            SessionKind::Practice1 => "FP1",
            SessionKind::Practice2 => "FP2",
            SessionKind::Practice3 => "FP3",
            SessionKind::Sprint => "S",
        }
    }

    /// Human readable name
    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Race => "Race",
            SessionKind::Qualifying => "Qualifying",
            SessionKind::Practice1 => "Practice 1",
            SessionKind::Practice2 => "Practice 2",
            SessionKind::Practice3 => "Practice 3",
            SessionKind::Sprint => "Sprint",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SessionKind {
    type Err = AccessError;

    /// Accepts provider codes or names, case-insensitive, ignoring spaces
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String =
            value.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_uppercase();

        SessionKind::ALL
            .into_iter()
            .find(|kind| {
                kind.code() == normalized
                    || kind.label().replace(' ', "").to_ascii_uppercase() == normalized
            })
            .ok_or_else(|| AccessError::InvalidSessionKind { value: value.to_string() })
    }
}
