//! Fixed weekday labels used as day keys across the planner.
//!
//! # Invariants
//! - Serialized form is the full English label (`Monday`..`Sunday`), which is
//!   also the day key used by persisted block records.
//! - `Weekday::ALL` is ordered Monday-first and drives week-level iteration.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the seven planner columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in grid column order.
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Stable label used in storage and at the presentation boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a day label is not one of the seven known weekdays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWeekday(pub String);

impl Display for UnknownWeekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown weekday `{}`", self.0)
    }
}

impl Error for UnknownWeekday {}

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    /// Parses a weekday label case-insensitively, ignoring surrounding spaces.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| UnknownWeekday(normalized.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Weekday;

    #[test]
    fn parse_accepts_mixed_case_and_whitespace() {
        assert_eq!(" tuesday ".parse::<Weekday>().unwrap(), Weekday::Tuesday);
        assert_eq!("SUNDAY".parse::<Weekday>().unwrap(), Weekday::Sunday);
    }

    #[test]
    fn parse_rejects_unknown_label() {
        let err = "Funday".parse::<Weekday>().unwrap_err();
        assert!(err.to_string().contains("Funday"));
    }

    #[test]
    fn serializes_as_full_label() {
        let json = serde_json::to_string(&Weekday::Wednesday).unwrap();
        assert_eq!(json, "\"Wednesday\"");
    }
}
