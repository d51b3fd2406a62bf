//! Block color palette.
//!
//! Colors are categorical tags only; no scheduling rule depends on them.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed palette offered by the block dialogs.
///
/// Older stores wrote utility-class tokens (`bg-blue-500`); those are accepted
/// on read and normalized to the palette name on the next write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockColor {
    #[default]
    #[serde(alias = "bg-blue-500")]
    Blue,
    #[serde(alias = "bg-green-500")]
    Green,
    #[serde(alias = "bg-purple-500")]
    Purple,
    #[serde(alias = "bg-orange-500")]
    Orange,
    #[serde(alias = "bg-pink-500")]
    Pink,
    #[serde(alias = "bg-red-500")]
    Red,
    #[serde(alias = "bg-teal-500")]
    Teal,
    #[serde(alias = "bg-indigo-500")]
    Indigo,
}

impl BlockColor {
    pub const ALL: [BlockColor; 8] = [
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Orange,
        Self::Pink,
        Self::Red,
        Self::Teal,
        Self::Indigo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Red => "red",
            Self::Teal => "teal",
            Self::Indigo => "indigo",
        }
    }
}

impl Display for BlockColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl Display for UnknownColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown block color `{}`", self.0)
    }
}

impl Error for UnknownColor {}

impl FromStr for BlockColor {
    type Err = UnknownColor;

    /// Accepts palette names and legacy `bg-<name>-500` tokens.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let name = normalized
            .strip_prefix("bg-")
            .and_then(|rest| rest.strip_suffix("-500"))
            .unwrap_or(normalized.as_str());
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == name)
            .ok_or_else(|| UnknownColor(value.trim().to_string()))
    }
}
