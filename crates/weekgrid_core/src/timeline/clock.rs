//! Clock-time arithmetic.
//!
//! Pure conversions between `HH:MM` strings and minute-of-day offsets, plus
//! duration labels used by day stats.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Capacity of one planner day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

static CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").expect("valid clock regex"));

/// Malformed clock-time input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockParseError {
    Malformed(String),
    HourOutOfRange(u32),
    MinuteOutOfRange(u32),
}

impl Display for ClockParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "expected HH:MM clock time, got `{value}`"),
            Self::HourOutOfRange(hour) => write!(f, "hour {hour} must be below 24"),
            Self::MinuteOutOfRange(minute) => write!(f, "minute {minute} must be below 60"),
        }
    }
}

impl Error for ClockParseError {}

/// Parses `HH:MM` into minutes since midnight.
pub fn to_minutes(value: &str) -> Result<u32, ClockParseError> {
    let caps = CLOCK_RE
        .captures(value)
        .ok_or_else(|| ClockParseError::Malformed(value.to_string()))?;

    // Both groups are 1-2 ASCII digits, so parsing cannot overflow.
    let hours: u32 = caps[1]
        .parse()
        .map_err(|_| ClockParseError::Malformed(value.to_string()))?;
    let minutes: u32 = caps[2]
        .parse()
        .map_err(|_| ClockParseError::Malformed(value.to_string()))?;

    if hours >= 24 {
        return Err(ClockParseError::HourOutOfRange(hours));
    }
    if minutes >= 60 {
        return Err(ClockParseError::MinuteOutOfRange(minutes));
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes as zero-padded `HH:MM`, wrapping past midnight.
pub fn to_clock_string(minutes: u32) -> String {
    let wrapped = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Renders a duration as `1h 30m`, `2h` or `45m`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Span from `start` to `end`, reading `end <= start` as the next day.
///
/// The result is always within `1..=1440` for inputs below 1440.
pub fn duration_between(start: u32, end: u32) -> u32 {
    if end <= start {
        end + MINUTES_PER_DAY - start
    } else {
        end - start
    }
}

/// `HH:MM` at which a block starting at `start` ends.
pub fn end_clock_string(start: u32, duration_minutes: u32) -> String {
    to_clock_string(start + duration_minutes)
}
