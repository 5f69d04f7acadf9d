//! Tyre compounds

use serde::{Deserialize, Serialize};

/// Tyre compound as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "UPPERCASE")]
pub enum TyreCompound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
    /// Any compound string the provider emits that is not listed above
    #[serde(other)]
    Unknown,
}

impl TyreCompound {
    /// Display colour used by strategy charts
    pub fn color(self) -> &'static str {
        match self {
            TyreCompound::Soft => "#ef4444",
            TyreCompound::Medium => "#f59e0b",
            TyreCompound::Hard => "#ffffff",
            TyreCompound::Intermediate => "#10b981",
            TyreCompound::Wet => "#3b82f6",
            TyreCompound::Unknown => "#9b87f5",
        }
    }
}
