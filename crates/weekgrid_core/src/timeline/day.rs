//! Single-day timeline engine.
//!
//! # Responsibility
//! - Project one weekday out of the full block set as an ordered sequence.
//! - Produce a new, consistent block set for exactly one mutation.
//!
//! # Invariants
//! - Day order is `start_time` ascending; ties keep input order.
//! - A day's total `duration_minutes` never exceeds `MINUTES_PER_DAY` after
//!   any admitting operation; rejected operations return the error and leave
//!   the caller's input untouched.
//! - After `append_auto_packed` or `reorder` (with `from != to`) the day is
//!   packed: contiguous from minute 0 with no gaps or overlaps.
//! - `remove` never repacks, so deleting a block may leave a gap.

use crate::model::block::{Block, BlockId, BlockValidationError};
use crate::model::weekday::Weekday;
use crate::timeline::clock::{ClockParseError, MINUTES_PER_DAY};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TimelineResult<T> = Result<T, TimelineError>;

/// Rejections raised by timeline operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    Clock(ClockParseError),
    Validation(BlockValidationError),
    /// Admitting `requested_minutes` would push the day past 24 hours.
    CapacityExceeded {
        day: Weekday,
        scheduled_minutes: u32,
        requested_minutes: u32,
    },
    NotFound(BlockId),
    DuplicateId(BlockId),
    IndexOutOfRange {
        day: Weekday,
        index: usize,
        len: usize,
    },
}

impl Display for TimelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clock(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::CapacityExceeded {
                day,
                scheduled_minutes,
                requested_minutes,
            } => write!(
                f,
                "{day} would exceed 24 hours: {scheduled_minutes} min scheduled, {requested_minutes} min requested"
            ),
            Self::NotFound(id) => write!(f, "block not found: {id}"),
            Self::DuplicateId(id) => write!(f, "block id already scheduled: {id}"),
            Self::IndexOutOfRange { day, index, len } => write!(
                f,
                "index {index} is out of range for {day} with {len} block(s)"
            ),
        }
    }
}

impl Error for TimelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Clock(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ClockParseError> for TimelineError {
    fn from(value: ClockParseError) -> Self {
        Self::Clock(value)
    }
}

impl From<BlockValidationError> for TimelineError {
    fn from(value: BlockValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Ordered view of the blocks scheduled on one weekday.
///
/// Rebuilt from the full block set for every operation; it never outlives
/// the call that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTimeline {
    day: Weekday,
    blocks: Vec<Block>,
}

impl DayTimeline {
    /// Projects `day` out of the full week, sorted by start (stable).
    pub fn project(week: &[Block], day: Weekday) -> Self {
        let mut blocks: Vec<Block> = week.iter().filter(|b| b.day == day).cloned().collect();
        blocks.sort_by_key(|b| b.start_time);
        Self { day, blocks }
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn total_scheduled(&self) -> u32 {
        self.blocks.iter().map(|b| b.duration_minutes).sum()
    }

    pub fn free_minutes(&self) -> u32 {
        MINUTES_PER_DAY.saturating_sub(self.total_scheduled())
    }

    pub fn can_admit(&self, duration_minutes: u32) -> bool {
        fits_in_day(self.total_scheduled(), duration_minutes)
    }

    /// Largest end minute on the day, or 0 when empty.
    pub fn latest_end(&self) -> u32 {
        self.blocks.iter().map(Block::end_time).max().unwrap_or(0)
    }

    /// True when blocks are contiguous from midnight (the packed state).
    pub fn is_packed(&self) -> bool {
        let mut cursor = 0;
        for block in &self.blocks {
            if block.start_time != cursor {
                return false;
            }
            cursor += block.duration_minutes;
        }
        true
    }

    pub fn position_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Appends `block` right after the scheduled total (auto-packed add).
    pub fn with_appended(&self, mut block: Block) -> TimelineResult<Self> {
        self.ensure_capacity(0, block.duration_minutes)?;
        block.day = self.day;
        block.start_time = self.total_scheduled();
        let mut next = self.clone();
        next.blocks.push(block);
        Ok(next)
    }

    /// Inserts `block` at its own start time (free-form add).
    pub fn with_placed(&self, mut block: Block) -> TimelineResult<Self> {
        self.ensure_capacity(0, block.duration_minutes)?;
        block.day = self.day;
        let mut next = self.clone();
        next.blocks.push(block);
        next.sort();
        Ok(next)
    }

    /// Moves the block at `from` to `to` and repacks from midnight.
    ///
    /// `from == to` is a no-op that keeps existing start times.
    pub fn with_moved(&self, from: usize, to: usize) -> TimelineResult<Self> {
        self.ensure_index(from)?;
        self.ensure_index(to)?;
        if from == to {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let moved = next.blocks.remove(from);
        next.blocks.insert(to, moved);
        next.repack();
        Ok(next)
    }

    /// Moves one block to `requested_start`, clamped to keep it inside the day.
    ///
    /// Overlaps with neighbors are not checked.
    pub fn with_repositioned(&self, id: &BlockId, requested_start: i64) -> TimelineResult<Self> {
        let index = self
            .position_of(id)
            .ok_or_else(|| TimelineError::NotFound(id.clone()))?;

        let mut next = self.clone();
        let mut moved = next.blocks.remove(index);
        moved.start_time = clamp_start(requested_start, moved.duration_minutes);
        next.blocks.push(moved);
        next.sort();
        Ok(next)
    }

    pub fn without(&self, id: &BlockId) -> Self {
        let mut next = self.clone();
        next.blocks.retain(|b| &b.id != id);
        next
    }

    /// Rewrites every start by accumulating durations from minute 0.
    pub fn repack(&mut self) {
        let mut cursor = 0;
        for block in &mut self.blocks {
            block.start_time = cursor;
            cursor += block.duration_minutes;
        }
    }

    fn sort(&mut self) {
        self.blocks.sort_by_key(|b| b.start_time);
    }

    /// Checks that replacing `released` minutes with `requested` fits.
    fn ensure_capacity(&self, released: u32, requested: u32) -> TimelineResult<()> {
        let scheduled = self.total_scheduled().saturating_sub(released);
        if !fits_in_day(scheduled, requested) {
            return Err(TimelineError::CapacityExceeded {
                day: self.day,
                scheduled_minutes: scheduled,
                requested_minutes: requested,
            });
        }
        Ok(())
    }

    fn ensure_index(&self, index: usize) -> TimelineResult<()> {
        if index >= self.blocks.len() {
            return Err(TimelineError::IndexOutOfRange {
                day: self.day,
                index,
                len: self.blocks.len(),
            });
        }
        Ok(())
    }
}

/// Replaces the given days inside `week`.
///
/// Blocks of untouched days keep their relative order and come first; each
/// replaced day follows in its timeline order.
fn merge(week: &[Block], days: &[&DayTimeline]) -> Vec<Block> {
    let mut merged: Vec<Block> = week
        .iter()
        .filter(|b| days.iter().all(|d| d.day != b.day))
        .cloned()
        .collect();
    for day in days {
        merged.extend(day.blocks.iter().cloned());
    }
    merged
}

fn fits_in_day(scheduled: u32, requested: u32) -> bool {
    scheduled
        .checked_add(requested)
        .is_some_and(|total| total <= MINUTES_PER_DAY)
}

fn clamp_start(requested: i64, duration_minutes: u32) -> u32 {
    let latest = i64::from(MINUTES_PER_DAY.saturating_sub(duration_minutes));
    // The clamp keeps the value within 0..=1440, so the cast is lossless.
    requested.clamp(0, latest) as u32
}

fn find<'a>(week: &'a [Block], id: &BlockId) -> TimelineResult<&'a Block> {
    week.iter()
        .find(|b| &b.id == id)
        .ok_or_else(|| TimelineError::NotFound(id.clone()))
}

fn ensure_new_id(week: &[Block], id: &BlockId) -> TimelineResult<()> {
    if week.iter().any(|b| &b.id == id) {
        return Err(TimelineError::DuplicateId(id.clone()));
    }
    Ok(())
}

/// Blocks of `day` in start order.
pub fn list_ordered(week: &[Block], day: Weekday) -> Vec<Block> {
    DayTimeline::project(week, day).into_blocks()
}

pub fn total_scheduled(week: &[Block], day: Weekday) -> u32 {
    DayTimeline::project(week, day).total_scheduled()
}

pub fn can_admit(week: &[Block], day: Weekday, duration_minutes: u32) -> bool {
    DayTimeline::project(week, day).can_admit(duration_minutes)
}

/// Auto-packed add: starts `block` at the day's scheduled total.
pub fn append_auto_packed(week: &[Block], block: Block) -> TimelineResult<Vec<Block>> {
    block.validate()?;
    ensure_new_id(week, &block.id)?;
    let next = DayTimeline::project(week, block.day).with_appended(block)?;
    Ok(merge(week, &[&next]))
}

/// Start used for a free-form add that names none: right after the latest
/// end on the day, pulled back so the block still fits before midnight.
pub fn default_free_form_start(week: &[Block], day: Weekday, duration_minutes: u32) -> u32 {
    let latest_end = DayTimeline::project(week, day).latest_end();
    clamp_start(i64::from(latest_end), duration_minutes)
}

/// Free-form add: keeps the block's own start time.
pub fn place_free_form(week: &[Block], block: Block) -> TimelineResult<Vec<Block>> {
    block.validate()?;
    ensure_new_id(week, &block.id)?;
    let next = DayTimeline::project(week, block.day).with_placed(block)?;
    Ok(merge(week, &[&next]))
}

/// Moves the `from`-th block of `day` to index `to` and repacks the day.
pub fn reorder(week: &[Block], day: Weekday, from: usize, to: usize) -> TimelineResult<Vec<Block>> {
    if from == to {
        // Still reject bad indices, but never touch start times.
        DayTimeline::project(week, day).with_moved(from, to)?;
        return Ok(week.to_vec());
    }
    let next = DayTimeline::project(week, day).with_moved(from, to)?;
    Ok(merge(week, &[&next]))
}

/// Moves block `id` on `day` to `requested_start`, clamped into the day.
pub fn reposition_free_form(
    week: &[Block],
    day: Weekday,
    id: &BlockId,
    requested_start: i64,
) -> TimelineResult<Vec<Block>> {
    let next = DayTimeline::project(week, day).with_repositioned(id, requested_start)?;
    Ok(merge(week, &[&next]))
}

/// Auto-packed edit.
///
/// The stored start is kept whatever `updated` carries. A day change moves
/// the block to the end of the destination day and repacks both days; a
/// duration change repacks the block's day; other edits keep start times.
pub fn edit_in_place(week: &[Block], updated: Block) -> TimelineResult<Vec<Block>> {
    let current = find(week, &updated.id)?;

    let mut next_block = updated;
    next_block.start_time = current.start_time;
    next_block.validate()?;

    if next_block.day == current.day {
        let mut timeline = DayTimeline::project(week, current.day);
        timeline.ensure_capacity(current.duration_minutes, next_block.duration_minutes)?;
        let duration_changed = next_block.duration_minutes != current.duration_minutes;
        if let Some(index) = timeline.position_of(&next_block.id) {
            timeline.blocks[index] = next_block;
        }
        if duration_changed {
            timeline.repack();
        }
        return Ok(merge(week, &[&timeline]));
    }

    let mut source = DayTimeline::project(week, current.day).without(&next_block.id);
    let mut destination = DayTimeline::project(week, next_block.day);
    destination.ensure_capacity(0, next_block.duration_minutes)?;
    destination.blocks.push(next_block);
    source.repack();
    destination.repack();
    Ok(merge(week, &[&source, &destination]))
}

/// Free-form edit: replaces the whole record, clamping its start into the day.
pub fn edit_free_form(week: &[Block], updated: Block) -> TimelineResult<Vec<Block>> {
    let current = find(week, &updated.id)?;

    let mut next_block = updated;
    next_block.start_time = clamp_start(
        i64::from(next_block.start_time),
        next_block.duration_minutes,
    );
    next_block.validate()?;

    if next_block.day == current.day {
        let mut timeline = DayTimeline::project(week, current.day);
        timeline.ensure_capacity(current.duration_minutes, next_block.duration_minutes)?;
        if let Some(index) = timeline.position_of(&next_block.id) {
            timeline.blocks[index] = next_block;
        }
        timeline.sort();
        return Ok(merge(week, &[&timeline]));
    }

    let source = DayTimeline::project(week, current.day).without(&next_block.id);
    let destination = DayTimeline::project(week, next_block.day).with_placed(next_block)?;
    Ok(merge(week, &[&source, &destination]))
}

/// Drops block `id`. Remaining start times are left as they are.
pub fn remove(week: &[Block], id: &BlockId) -> Vec<Block> {
    week.iter().filter(|b| &b.id != id).cloned().collect()
}
