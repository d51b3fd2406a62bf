//! Placement policy selecting how new and edited blocks get their start time.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// How a `WeekSchedule` positions blocks within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Blocks are laid out back to back from midnight in sequence order.
    #[default]
    AutoPacked,
    /// Blocks keep a user-chosen start, only clamped to stay inside the day.
    /// Overlaps are tolerated.
    FreeForm,
}

impl PlacementPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoPacked => "auto_packed",
            Self::FreeForm => "free_form",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "auto_packed" | "auto" | "packed" => Some(Self::AutoPacked),
            "free_form" | "free" => Some(Self::FreeForm),
            _ => None,
        }
    }
}

impl Display for PlacementPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
