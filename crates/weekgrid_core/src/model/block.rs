//! Block domain model.
//!
//! # Responsibility
//! - Define the scheduled-activity record shared by the engine, the
//!   persistence gateway and the presentation boundary.
//! - Define the partial draft record submitted for new blocks.
//!
//! # Invariants
//! - `id` is generated once and never reused for another block.
//! - `title` is non-blank, `duration_minutes` is in `1..=1440`,
//!   `start_time` is a minute-of-day in `0..1440`.
//! - Deserialization runs the same validation as `Block::validate()`.

use crate::model::palette::BlockColor;
use crate::model::weekday::Weekday;
use crate::timeline::clock::{self, ClockParseError, MINUTES_PER_DAY};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque block identifier, unique across the whole week.
///
/// Generated ids are UUID v4 text; any non-empty string read from storage is
/// accepted so older stores keep their identities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Creates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BlockId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Validation errors for block records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockValidationError {
    EmptyId,
    EmptyTitle,
    DurationOutOfRange(u32),
    StartOutOfRange(u32),
}

impl Display for BlockValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "block id must not be empty"),
            Self::EmptyTitle => write!(f, "block title must not be blank"),
            Self::DurationOutOfRange(value) => write!(
                f,
                "durationMinutes ({value}) must be within 1..={MINUTES_PER_DAY}"
            ),
            Self::StartOutOfRange(value) => write!(
                f,
                "startTime ({value}) must be within 0..{MINUTES_PER_DAY}"
            ),
        }
    }
}

impl Error for BlockValidationError {}

/// One scheduled activity on a single weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BlockRecord")]
pub struct Block {
    pub id: BlockId,
    pub title: String,
    pub day: Weekday,
    /// Minute-of-day offset. `HH:MM` is only ever a view projection.
    pub start_time: u32,
    pub duration_minutes: u32,
    pub color: BlockColor,
}

impl Block {
    /// Creates a block with a generated id starting at midnight.
    pub fn new(day: Weekday, title: impl Into<String>, duration_minutes: u32) -> Self {
        Self::with_id(BlockId::generate(), day, title, duration_minutes)
    }

    /// Creates a block with a caller-provided id.
    ///
    /// Does not validate; callers that accept external input go through
    /// `validate()` before admitting the block.
    pub fn with_id(
        id: BlockId,
        day: Weekday,
        title: impl Into<String>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            day,
            start_time: 0,
            duration_minutes,
            color: BlockColor::default(),
        }
    }

    pub fn validate(&self) -> Result<(), BlockValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(BlockValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(BlockValidationError::EmptyTitle);
        }
        if self.duration_minutes == 0 || self.duration_minutes > MINUTES_PER_DAY {
            return Err(BlockValidationError::DurationOutOfRange(
                self.duration_minutes,
            ));
        }
        if self.start_time >= MINUTES_PER_DAY {
            return Err(BlockValidationError::StartOutOfRange(self.start_time));
        }
        Ok(())
    }

    /// Exclusive end minute. May exceed 1440 for free-form placements.
    pub fn end_time(&self) -> u32 {
        self.start_time + self.duration_minutes
    }

    /// `HH:MM` projection of `start_time`.
    pub fn start_clock(&self) -> String {
        clock::to_clock_string(self.start_time)
    }

    /// `HH:MM` projection of the end time, wrapping past midnight.
    pub fn end_clock(&self) -> String {
        clock::end_clock_string(self.start_time, self.duration_minutes)
    }
}

/// Wire shape accepted on read.
///
/// `startTime` may be a minute offset or a legacy `HH:MM` string.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockRecord {
    id: BlockId,
    title: String,
    day: Weekday,
    #[serde(deserialize_with = "deserialize_start_time")]
    start_time: u32,
    duration_minutes: u32,
    #[serde(default)]
    color: BlockColor,
}

impl TryFrom<BlockRecord> for Block {
    type Error = BlockValidationError;

    fn try_from(record: BlockRecord) -> Result<Self, Self::Error> {
        let block = Block {
            id: record.id,
            title: record.title,
            day: record.day,
            start_time: record.start_time,
            duration_minutes: record.duration_minutes,
            color: record.color,
        };
        block.validate()?;
        Ok(block)
    }
}

fn deserialize_start_time<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StartTime {
        Minutes(u32),
        Clock(String),
    }

    match StartTime::deserialize(deserializer)? {
        StartTime::Minutes(minutes) => Ok(minutes),
        StartTime::Clock(text) => clock::to_minutes(&text).map_err(serde::de::Error::custom),
    }
}

/// Partial record submitted by a dialog for a new block.
///
/// `start_time` is only honored under free-form placement; auto-packed
/// placement always derives the start from the day's scheduled total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDraft {
    pub title: String,
    pub duration_minutes: u32,
    pub color: BlockColor,
    pub start_time: Option<u32>,
}

impl BlockDraft {
    pub fn new(title: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            title: title.into(),
            duration_minutes,
            color: BlockColor::default(),
            start_time: None,
        }
    }

    /// Builds a draft from a start/end clock pair.
    ///
    /// An end at or before the start is read as ending on the next day, so
    /// `22:00`-`06:00` is eight hours and `09:00`-`09:00` is a full day.
    pub fn from_clock_range(
        title: impl Into<String>,
        start: &str,
        end: &str,
    ) -> Result<Self, ClockParseError> {
        let start_minutes = clock::to_minutes(start)?;
        let end_minutes = clock::to_minutes(end)?;
        Ok(Self {
            title: title.into(),
            duration_minutes: clock::duration_between(start_minutes, end_minutes),
            color: BlockColor::default(),
            start_time: Some(start_minutes),
        })
    }

    pub fn with_color(mut self, color: BlockColor) -> Self {
        self.color = color;
        self
    }

    pub fn starting_at(mut self, minute: u32) -> Self {
        self.start_time = Some(minute);
        self
    }

    /// Materializes the draft into a block with a fresh id.
    ///
    /// The title is trimmed; the start defaults to midnight and is expected to
    /// be overwritten by the placement policy.
    pub fn into_block(self, day: Weekday) -> Block {
        Block {
            id: BlockId::generate(),
            title: self.title.trim().to_string(),
            day,
            start_time: self.start_time.unwrap_or(0),
            duration_minutes: self.duration_minutes,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, BlockDraft, BlockValidationError};
    use crate::model::palette::BlockColor;
    use crate::model::weekday::Weekday;

    #[test]
    fn validate_rejects_blank_title_and_bad_duration() {
        let blank = Block::new(Weekday::Monday, "   ", 30);
        assert_eq!(blank.validate(), Err(BlockValidationError::EmptyTitle));

        let zero = Block::new(Weekday::Monday, "Nap", 0);
        assert_eq!(zero.validate(), Err(BlockValidationError::DurationOutOfRange(0)));

        let long = Block::new(Weekday::Monday, "Marathon", 1441);
        assert_eq!(
            long.validate(),
            Err(BlockValidationError::DurationOutOfRange(1441))
        );
    }

    #[test]
    fn serialization_uses_camel_case_wire_fields() {
        let mut block = Block::with_id("b-1".into(), Weekday::Friday, "Gym", 90);
        block.start_time = 600;
        block.color = BlockColor::Green;

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["id"], "b-1");
        assert_eq!(json["day"], "Friday");
        assert_eq!(json["startTime"], 600);
        assert_eq!(json["durationMinutes"], 90);
        assert_eq!(json["color"], "green");

        let decoded: Block = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, block);
    }

    #[test]
    fn deserialize_accepts_legacy_clock_start_and_color_token() {
        let value = serde_json::json!({
            "id": "1700000000000",
            "title": "Sleep",
            "day": "Monday",
            "startTime": "07:30",
            "durationMinutes": 60,
            "color": "bg-purple-500"
        });

        let block: Block = serde_json::from_value(value).unwrap();
        assert_eq!(block.start_time, 450);
        assert_eq!(block.color, BlockColor::Purple);
    }

    #[test]
    fn deserialize_rejects_out_of_range_duration() {
        let value = serde_json::json!({
            "id": "x",
            "title": "Too long",
            "day": "Monday",
            "startTime": 0,
            "durationMinutes": 2000,
            "color": "blue"
        });

        let err = serde_json::from_value::<Block>(value).unwrap_err();
        assert!(err.to_string().contains("durationMinutes (2000)"), "{err}");
    }

    #[test]
    fn clock_range_draft_wraps_overnight() {
        let draft = BlockDraft::from_clock_range("Sleep", "22:00", "06:00").unwrap();
        assert_eq!(draft.duration_minutes, 480);
        assert_eq!(draft.start_time, Some(1320));

        let full_day = BlockDraft::from_clock_range("Fast", "09:00", "09:00").unwrap();
        assert_eq!(full_day.duration_minutes, 1440);
    }

    #[test]
    fn end_clock_wraps_past_midnight() {
        let mut block = Block::new(Weekday::Sunday, "Late shift", 120);
        block.start_time = 23 * 60;
        assert_eq!(block.start_clock(), "23:00");
        assert_eq!(block.end_clock(), "01:00");
    }
}
