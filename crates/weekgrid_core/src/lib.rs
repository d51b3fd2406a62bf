//! Core planner logic for Weekgrid.
//! This crate owns every scheduling invariant; FFI and CLI layers only adapt it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod settings;
pub mod timeline;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::block::{Block, BlockDraft, BlockId, BlockValidationError};
pub use model::checklist::{ChecklistTask, Goal, GoalHorizon};
pub use model::palette::BlockColor;
pub use model::weekday::Weekday;
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use service::checklist_service::{ChecklistError, ChecklistResult, ChecklistService};
pub use service::drag::{DragPayload, DragSession, DropTarget};
pub use service::week_service::{
    DaySnapshot, DayStats, ScheduleError, ScheduleResult, WeekSchedule, WeekStats,
};
pub use settings::{PlannerSettings, SettingsError};
pub use timeline::clock::{format_duration, to_clock_string, to_minutes, ClockParseError};
pub use timeline::day::{DayTimeline, TimelineError};
pub use timeline::placement::PlacementPolicy;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
