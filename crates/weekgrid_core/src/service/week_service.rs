//! Week schedule use-case service.
//!
//! # Responsibility
//! - Own the in-memory block set for one planner session.
//! - Route each user intent through the placement policy's timeline rule.
//! - Persist the full set through the key-value gateway on every change.
//!
//! # Invariants
//! - The new set is written to the store before it replaces memory; a
//!   rejection or a failed write leaves memory as it was.
//! - No day exceeds `MINUTES_PER_DAY` scheduled minutes.
//! - Titles are never logged.

use crate::model::block::{Block, BlockDraft, BlockId};
use crate::model::weekday::Weekday;
use crate::repo::block_repo::{load_blocks, save_blocks};
use crate::repo::kv_store::{KeyValueStore, StoreError};
use crate::service::drag::{DragPayload, DragSession, DropTarget};
use crate::timeline::clock::{format_duration, MINUTES_PER_DAY};
use crate::timeline::day::{self, DayTimeline, TimelineError};
use crate::timeline::placement::PlacementPolicy;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[derive(Debug)]
pub enum ScheduleError {
    /// The timeline rule rejected the intent.
    Timeline(TimelineError),
    /// The change was valid but could not be saved.
    Store(StoreError),
}

impl ScheduleError {
    /// Stable machine-readable code used in logs and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeline(TimelineError::Clock(_)) => "invalid_clock",
            Self::Timeline(TimelineError::Validation(_)) => "invalid_block",
            Self::Timeline(TimelineError::CapacityExceeded { .. }) => "capacity_exceeded",
            Self::Timeline(TimelineError::NotFound(_)) => "not_found",
            Self::Timeline(TimelineError::DuplicateId(_)) => "duplicate_id",
            Self::Timeline(TimelineError::IndexOutOfRange { .. }) => "index_out_of_range",
            Self::Store(_) => "store_failed",
        }
    }
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeline(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "failed to save schedule: {err}"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Timeline(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<TimelineError> for ScheduleError {
    fn from(value: TimelineError) -> Self {
        Self::Timeline(value)
    }
}

impl From<StoreError> for ScheduleError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Occupancy summary for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStats {
    pub day: Weekday,
    pub scheduled_minutes: u32,
    pub free_minutes: u32,
    /// `scheduled / 1440 * 100`, rounded half up.
    pub percent_scheduled: u32,
}

impl DayStats {
    pub fn for_timeline(timeline: &DayTimeline) -> Self {
        let scheduled = timeline.total_scheduled();
        Self {
            day: timeline.day(),
            scheduled_minutes: scheduled,
            free_minutes: timeline.free_minutes(),
            percent_scheduled: (scheduled * 100 + MINUTES_PER_DAY / 2) / MINUTES_PER_DAY,
        }
    }

    pub fn scheduled_label(&self) -> String {
        format_duration(self.scheduled_minutes)
    }

    pub fn free_label(&self) -> String {
        format_duration(self.free_minutes)
    }
}

/// Ordered blocks of one day together with its stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySnapshot {
    pub blocks: Vec<Block>,
    pub stats: DayStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekStats {
    /// Monday first.
    pub days: Vec<DayStats>,
    pub block_count: usize,
    pub scheduled_minutes: u32,
}

/// Planner session: one policy, one store, the current block set.
pub struct WeekSchedule<S: KeyValueStore> {
    store: S,
    policy: PlacementPolicy,
    blocks: Vec<Block>,
}

impl<S: KeyValueStore> WeekSchedule<S> {
    /// Opens a session from whatever the store holds; never fails.
    pub fn load(store: S, policy: PlacementPolicy) -> Self {
        let blocks = load_blocks(&store);
        info!(
            "event=schedule_load module=schedule status=ok policy={} count={}",
            policy,
            blocks.len()
        );
        Self {
            store,
            policy,
            blocks,
        }
    }

    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// Every block of the week, in storage order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn timeline(&self, day: Weekday) -> DayTimeline {
        DayTimeline::project(&self.blocks, day)
    }

    /// Creates a block from `draft` on `day`.
    ///
    /// Auto-packed placement ignores the draft's start and appends after the
    /// day's scheduled total. Free-form keeps the draft's start, or follows
    /// the latest block on the day when none is given.
    pub fn add_block(&mut self, day: Weekday, draft: BlockDraft) -> ScheduleResult<Block> {
        let requested_start = draft.start_time;
        let mut block = draft.into_block(day);
        let id = block.id.clone();

        let outcome = match self.policy {
            PlacementPolicy::AutoPacked => {
                block.start_time = 0;
                day::append_auto_packed(&self.blocks, block)
            }
            PlacementPolicy::FreeForm => {
                if requested_start.is_none() {
                    block.start_time =
                        day::default_free_form_start(&self.blocks, day, block.duration_minutes);
                }
                day::place_free_form(&self.blocks, block)
            }
        };
        let next = self.rejected_on("block_add", day, outcome)?;
        self.commit("block_add", day, next)?;
        self.stored(&id)
    }

    /// Replaces the block with the same id.
    ///
    /// Auto-packed keeps the stored start and repacks on duration or day
    /// changes. Free-form takes the submitted start, clamped into the day.
    pub fn edit_block(&mut self, updated: Block) -> ScheduleResult<Block> {
        let id = updated.id.clone();
        let day = updated.day;
        let outcome = match self.policy {
            PlacementPolicy::AutoPacked => day::edit_in_place(&self.blocks, updated),
            PlacementPolicy::FreeForm => day::edit_free_form(&self.blocks, updated),
        };
        let next = self.rejected_on("block_edit", day, outcome)?;
        self.commit("block_edit", day, next)?;
        self.stored(&id)
    }

    /// Removes `id`. Returns `false`, without writing, when it is absent.
    pub fn delete_block(&mut self, id: &BlockId) -> ScheduleResult<bool> {
        let Some(day) = self.blocks.iter().find(|b| &b.id == id).map(|b| b.day) else {
            info!("event=block_delete module=schedule status=noop reason=absent");
            return Ok(false);
        };
        let next = day::remove(&self.blocks, id);
        self.commit("block_delete", day, next)?;
        Ok(true)
    }

    /// Moves the `from`-th block of `day` to slot `to` and repacks the day.
    pub fn move_within_day(&mut self, day: Weekday, from: usize, to: usize) -> ScheduleResult<()> {
        let outcome = day::reorder(&self.blocks, day, from, to);
        let next = self.rejected_on("block_reorder", day, outcome)?;
        self.commit("block_reorder", day, next)
    }

    /// Moves block `id` to `target_minutes`, clamped so it ends by midnight.
    pub fn reposition_block(
        &mut self,
        day: Weekday,
        id: &BlockId,
        target_minutes: i64,
    ) -> ScheduleResult<Block> {
        let outcome = day::reposition_free_form(&self.blocks, day, id, target_minutes);
        let next = self.rejected_on("block_reposition", day, outcome)?;
        self.commit("block_reposition", day, next)?;
        self.stored(id)
    }

    pub fn day_stats(&self, day: Weekday) -> DayStats {
        DayStats::for_timeline(&self.timeline(day))
    }

    pub fn query_day(&self, day: Weekday) -> DaySnapshot {
        let timeline = self.timeline(day);
        DaySnapshot {
            stats: DayStats::for_timeline(&timeline),
            blocks: timeline.into_blocks(),
        }
    }

    pub fn week_stats(&self) -> WeekStats {
        let days: Vec<DayStats> = Weekday::ALL.iter().map(|d| self.day_stats(*d)).collect();
        WeekStats {
            block_count: self.blocks.len(),
            scheduled_minutes: days.iter().map(|d| d.scheduled_minutes).sum(),
            days,
        }
    }

    /// Starts dragging the `index`-th block of `day`.
    pub fn begin_drag(&self, day: Weekday, index: usize) -> ScheduleResult<DragSession> {
        let timeline = self.timeline(day);
        let block = timeline
            .blocks()
            .get(index)
            .ok_or(TimelineError::IndexOutOfRange {
                day,
                index,
                len: timeline.len(),
            })?;
        let payload = DragPayload::Block {
            day,
            index,
            id: block.id.clone(),
        };
        Ok(DragSession::new(payload, timeline))
    }

    /// Applies a drop.
    ///
    /// The dragged block is located again by id, so a session that outlived
    /// other edits still moves the right block, or fails with `NotFound`.
    pub fn commit_drag(&mut self, session: DragSession, target: DropTarget) -> ScheduleResult<()> {
        let day = session.payload().day();
        let id = session.payload().block_id().clone();
        match target {
            DropTarget::Index(to) => {
                let from = self
                    .timeline(day)
                    .position_of(&id)
                    .ok_or_else(|| TimelineError::NotFound(id.clone()))?;
                self.move_within_day(day, from, to)
            }
            DropTarget::Minute(minute) => self.reposition_block(day, &id, minute).map(|_| ()),
        }
    }

    fn rejected_on(
        &self,
        event: &str,
        day: Weekday,
        outcome: Result<Vec<Block>, TimelineError>,
    ) -> ScheduleResult<Vec<Block>> {
        outcome.map_err(|err| {
            let err = ScheduleError::from(err);
            warn!(
                "event={} module=schedule status=rejected policy={} day={} error_code={} error={}",
                event,
                self.policy,
                day,
                err.code(),
                err
            );
            err
        })
    }

    fn commit(&mut self, event: &str, day: Weekday, next: Vec<Block>) -> ScheduleResult<()> {
        if next == self.blocks {
            info!(
                "event={} module=schedule status=noop policy={} day={}",
                event, self.policy, day
            );
            return Ok(());
        }

        if let Err(err) = save_blocks(&mut self.store, &next) {
            error!(
                "event={} module=schedule status=error day={} error_code=store_failed error={}",
                event, day, err
            );
            return Err(err.into());
        }

        self.blocks = next;
        let stats = self.day_stats(day);
        info!(
            "event={} module=schedule status=ok policy={} day={} scheduled_min={} count={}",
            event,
            self.policy,
            day,
            stats.scheduled_minutes,
            self.blocks.len()
        );
        Ok(())
    }

    fn stored(&self, id: &BlockId) -> ScheduleResult<Block> {
        self.blocks
            .iter()
            .find(|b| &b.id == id)
            .cloned()
            .ok_or_else(|| TimelineError::NotFound(id.clone()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::{DayStats, WeekSchedule};
    use crate::model::block::{Block, BlockDraft};
    use crate::model::weekday::Weekday;
    use crate::repo::block_repo::WEEKLY_EVENTS_KEY;
    use crate::repo::kv_store::MemoryKeyValueStore;
    use crate::timeline::day::DayTimeline;
    use crate::timeline::placement::PlacementPolicy;

    fn stats_for(durations: &[u32]) -> DayStats {
        let week: Vec<Block> = durations
            .iter()
            .map(|d| Block::new(Weekday::Monday, "Slot", *d))
            .collect();
        DayStats::for_timeline(&DayTimeline::project(&week, Weekday::Monday))
    }

    #[test]
    fn percent_rounds_half_up() {
        let quarter = stats_for(&[360]);
        assert_eq!(quarter.percent_scheduled, 25);
        assert_eq!(quarter.free_minutes, 1080);
        assert_eq!(quarter.scheduled_label(), "6h");
        assert_eq!(quarter.free_label(), "18h");

        // One percent is 14.4 minutes, so the half-way point sits at 7.2.
        assert_eq!(stats_for(&[7]).percent_scheduled, 0);
        assert_eq!(stats_for(&[8]).percent_scheduled, 1);
        assert_eq!(stats_for(&[1440]).percent_scheduled, 100);
        assert_eq!(stats_for(&[]).percent_scheduled, 0);
    }

    #[test]
    fn unchanged_result_skips_write() {
        let mut schedule = WeekSchedule::load(MemoryKeyValueStore::new(), PlacementPolicy::AutoPacked);
        schedule
            .add_block(Weekday::Monday, BlockDraft::new("Read", 30))
            .expect("fits");
        let before = schedule.store().raw(WEEKLY_EVENTS_KEY).map(str::to_string);

        schedule
            .move_within_day(Weekday::Monday, 0, 0)
            .expect("same slot is allowed");
        assert_eq!(
            schedule.store().raw(WEEKLY_EVENTS_KEY).map(str::to_string),
            before
        );
    }

    #[test]
    fn free_form_add_without_start_follows_latest_block() {
        let mut schedule = WeekSchedule::load(MemoryKeyValueStore::new(), PlacementPolicy::FreeForm);
        let first = schedule
            .add_block(Weekday::Tuesday, BlockDraft::new("Gym", 60).starting_at(480))
            .expect("fits");
        assert_eq!(first.start_time, 480);

        let second = schedule
            .add_block(Weekday::Tuesday, BlockDraft::new("Shower", 15))
            .expect("fits");
        assert_eq!(second.start_time, 540);
    }

    #[test]
    fn auto_packed_add_ignores_draft_start() {
        let mut schedule = WeekSchedule::load(MemoryKeyValueStore::new(), PlacementPolicy::AutoPacked);
        let block = schedule
            .add_block(Weekday::Sunday, BlockDraft::new("Brunch", 90).starting_at(2000))
            .expect("draft start is not used");
        assert_eq!(block.start_time, 0);
    }
}
