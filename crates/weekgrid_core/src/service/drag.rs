//! Drag-and-drop session over one day's timeline.
//!
//! # Responsibility
//! - Carry a typed payload from drag start to drop.
//! - Keep a private reorder preview while the pointer hovers.
//!
//! # Invariants
//! - A session never mutates the schedule; only `WeekSchedule::commit_drag`
//!   does.
//! - Dropping a session without committing it is a cancel.

use crate::model::block::{Block, BlockId};
use crate::model::weekday::Weekday;
use crate::timeline::day::{DayTimeline, TimelineResult};

/// What is being dragged. Tagged so drop targets can reject foreign payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    Block {
        day: Weekday,
        index: usize,
        id: BlockId,
    },
}

impl DragPayload {
    pub fn day(&self) -> Weekday {
        match self {
            Self::Block { day, .. } => *day,
        }
    }

    pub fn block_id(&self) -> &BlockId {
        match self {
            Self::Block { id, .. } => id,
        }
    }
}

/// Where a payload is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Drop onto a list slot; commits as a reorder.
    Index(usize),
    /// Drop at a pointer offset in minutes; commits as a reposition.
    Minute(i64),
}

/// In-flight drag started by `WeekSchedule::begin_drag`.
#[derive(Debug, Clone)]
pub struct DragSession {
    payload: DragPayload,
    origin: DayTimeline,
    preview: DayTimeline,
    hover_index: usize,
}

impl DragSession {
    pub(crate) fn new(payload: DragPayload, origin: DayTimeline) -> Self {
        let hover_index = match &payload {
            DragPayload::Block { index, .. } => *index,
        };
        Self {
            preview: origin.clone(),
            payload,
            origin,
            hover_index,
        }
    }

    pub fn payload(&self) -> &DragPayload {
        &self.payload
    }

    pub fn hover_index(&self) -> usize {
        self.hover_index
    }

    /// Day order as it would look if the payload were dropped at the hovered slot.
    pub fn preview(&self) -> &[Block] {
        self.preview.blocks()
    }

    /// Recomputes the preview for `target_index`.
    ///
    /// The preview always derives from the day as it was at drag start, so
    /// hovering back and forth never accumulates moves. An out-of-range target
    /// is rejected and the previous preview kept.
    pub fn hover(&mut self, target_index: usize) -> TimelineResult<&[Block]> {
        let DragPayload::Block { index, .. } = &self.payload;
        let next = self.origin.with_moved(*index, target_index)?;
        self.preview = next;
        self.hover_index = target_index;
        Ok(self.preview.blocks())
    }
}
