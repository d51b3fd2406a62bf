//! FFI use-case API for the planner UI.
//!
//! # Responsibility
//! - Expose the planner's presentation contract to Dart via FRB.
//! - Translate UI strings (days, colors, horizons) into core types.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Every call runs one load-mutate-save cycle under a process-wide lock,
//!   so concurrent host threads cannot interleave writes.
//! - Failures come back as envelopes with `ok = false`, never as errors.

use log::warn;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock, PoisonError};
use weekgrid_core::db::open_db;
use weekgrid_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Block, BlockColor, BlockDraft, BlockId, ChecklistService, ChecklistTask, Goal, GoalHorizon,
    PlannerSettings, SqliteKeyValueStore, WeekSchedule, Weekday,
};

static PLANNER_SETTINGS: OnceLock<Result<PlannerSettings, String>> = OnceLock::new();
static PLANNER_LOCK: Mutex<()> = Mutex::new(());

/// Health-check probe.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns an empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One block as the timeline view renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerBlockItem {
    pub id: String,
    pub title: String,
    /// Full weekday name, e.g. `Monday`.
    pub day: String,
    /// Minute-of-day offset.
    pub start_time: u32,
    pub duration_minutes: u32,
    /// Palette name, e.g. `blue`.
    pub color: String,
    /// `HH:MM` label of `start_time`.
    pub start_label: String,
    /// `HH:MM` label of the end, wrapping past midnight.
    pub end_label: String,
}

/// Envelope for block mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerActionResponse {
    pub ok: bool,
    /// Stable failure code (`capacity_exceeded`, `not_found`, `invalid_input`, ...).
    pub error_code: Option<String>,
    /// Block as stored after the mutation, when the call produced one.
    pub block: Option<PlannerBlockItem>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl PlannerActionResponse {
    fn success(message: impl Into<String>, block: Option<PlannerBlockItem>) -> Self {
        Self {
            ok: true,
            error_code: None,
            block,
            message: message.into(),
        }
    }

    fn failure(failure: PlannerFailure) -> Self {
        Self {
            ok: false,
            error_code: Some(failure.code.to_string()),
            block: None,
            message: failure.message,
        }
    }
}

/// Envelope for one day of the timeline view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerDayResponse {
    pub ok: bool,
    pub day: String,
    /// Blocks ordered by start time.
    pub blocks: Vec<PlannerBlockItem>,
    pub scheduled_minutes: u32,
    pub free_minutes: u32,
    pub percent_scheduled: u32,
    /// e.g. `2h 30m`.
    pub scheduled_label: String,
    pub free_label: String,
    pub message: String,
}

impl PlannerDayResponse {
    fn failure(day: String, message: String) -> Self {
        Self {
            ok: false,
            day,
            blocks: Vec::new(),
            scheduled_minutes: 0,
            free_minutes: 0,
            percent_scheduled: 0,
            scheduled_label: String::new(),
            free_label: String::new(),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub id: String,
    pub text: String,
    /// Always `false` for goals.
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarActionResponse {
    pub ok: bool,
    pub item: Option<SidebarItem>,
    pub message: String,
}

impl SidebarActionResponse {
    fn from_result(operation: &str, result: Result<SidebarItem, String>) -> Self {
        match result {
            Ok(item) => Self {
                ok: true,
                item: Some(item),
                message: String::new(),
            },
            Err(err) => Self {
                ok: false,
                item: None,
                message: format!("{operation} failed: {err}"),
            },
        }
    }

    fn from_removal(operation: &str, result: Result<bool, String>) -> Self {
        match result {
            Ok(removed) => Self {
                ok: true,
                item: None,
                message: if removed {
                    "Item deleted.".to_string()
                } else {
                    "Item already absent.".to_string()
                },
            },
            Err(err) => Self {
                ok: false,
                item: None,
                message: format!("{operation} failed: {err}"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarListResponse {
    pub ok: bool,
    pub items: Vec<SidebarItem>,
    pub message: String,
}

impl SidebarListResponse {
    fn from_result(operation: &str, result: Result<Vec<SidebarItem>, String>) -> Self {
        match result {
            Ok(items) => Self {
                ok: true,
                items,
                message: String::new(),
            },
            Err(err) => Self {
                ok: false,
                items: Vec::new(),
                message: format!("{operation} failed: {err}"),
            },
        }
    }
}

/// Submits the new-block dialog.
///
/// `start_time` is only honored under free-form placement. An empty `color`
/// selects the default palette entry.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Rejects with `capacity_exceeded` when the day cannot fit the block.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_submit_new_block(
    day: String,
    title: String,
    duration_minutes: u32,
    color: String,
    start_time: Option<u32>,
) -> PlannerActionResponse {
    let op = "planner_submit_new_block";
    match submit_new_block(op, &day, title, duration_minutes, &color, start_time) {
        Ok(block) => PlannerActionResponse::success("Block added.", Some(to_block_item(&block))),
        Err(failure) => PlannerActionResponse::failure(failure),
    }
}

/// Submits the edit-block dialog; replaces the block with the same `id`.
///
/// Under auto-packed placement the stored start wins over `start_time`.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_submit_edited_block(
    id: String,
    day: String,
    title: String,
    duration_minutes: u32,
    color: String,
    start_time: u32,
) -> PlannerActionResponse {
    let op = "planner_submit_edited_block";
    let result = parse_day(op, &day).and_then(|day| {
        let mut block = Block::with_id(
            BlockId::from(id.trim()),
            day,
            title.trim(),
            duration_minutes,
        );
        block.color = parse_color(op, &color)?;
        block.start_time = start_time;
        with_schedule(op, |schedule| schedule.edit_block(block))
    });
    match result {
        Ok(block) => PlannerActionResponse::success("Block updated.", Some(to_block_item(&block))),
        Err(failure) => PlannerActionResponse::failure(failure),
    }
}

/// Deletes a block. Unknown ids succeed without a write.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_request_delete(id: String) -> PlannerActionResponse {
    let op = "planner_request_delete";
    let id = BlockId::from(id.trim());
    match with_schedule(op, |schedule| schedule.delete_block(&id)) {
        Ok(true) => PlannerActionResponse::success("Block deleted.", None),
        Ok(false) => PlannerActionResponse::success("Block already absent.", None),
        Err(failure) => PlannerActionResponse::failure(failure),
    }
}

/// Moves the `from`-th block of `day` to slot `to` and repacks the day.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_request_reorder(day: String, from: u32, to: u32) -> PlannerActionResponse {
    let op = "planner_request_reorder";
    let result = parse_day(op, &day).and_then(|day| {
        with_schedule(op, |schedule| {
            schedule.move_within_day(day, from as usize, to as usize)
        })
    });
    match result {
        Ok(()) => PlannerActionResponse::success("Blocks reordered.", None),
        Err(failure) => PlannerActionResponse::failure(failure),
    }
}

/// Drops block `id` at the pointer offset, clamped so it ends by midnight.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_request_reposition(
    day: String,
    id: String,
    pointer_y_minutes: i64,
) -> PlannerActionResponse {
    let op = "planner_request_reposition";
    let id = BlockId::from(id.trim());
    let result = parse_day(op, &day).and_then(|day| {
        with_schedule(op, |schedule| {
            schedule.reposition_block(day, &id, pointer_y_minutes)
        })
    });
    match result {
        Ok(block) => PlannerActionResponse::success("Block moved.", Some(to_block_item(&block))),
        Err(failure) => PlannerActionResponse::failure(failure),
    }
}

/// Reads one day: ordered blocks plus occupancy stats.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_query_day(day: String) -> PlannerDayResponse {
    let op = "planner_query_day";
    let result = parse_day(op, &day)
        .and_then(|day| with_schedule(op, |schedule| Ok::<_, String>(schedule.query_day(day))));
    match result {
        Ok(snapshot) => PlannerDayResponse {
            ok: true,
            day: snapshot.stats.day.to_string(),
            blocks: snapshot.blocks.iter().map(to_block_item).collect(),
            scheduled_minutes: snapshot.stats.scheduled_minutes,
            free_minutes: snapshot.stats.free_minutes,
            percent_scheduled: snapshot.stats.percent_scheduled,
            scheduled_label: snapshot.stats.scheduled_label(),
            free_label: snapshot.stats.free_label(),
            message: String::new(),
        },
        Err(failure) => PlannerDayResponse::failure(day, failure.message),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_add_goal(horizon: String, text: String) -> SidebarActionResponse {
    let result = parse_horizon(&horizon).and_then(|horizon| {
        with_checklist(|checklist| checklist.add_goal(horizon, &text).map(goal_item))
    });
    SidebarActionResponse::from_result("sidebar_add_goal", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_list_goals(horizon: String) -> SidebarListResponse {
    let result = parse_horizon(&horizon).and_then(|horizon| {
        with_checklist(|checklist| {
            Ok::<_, String>(checklist.goals(horizon).into_iter().map(goal_item).collect())
        })
    });
    SidebarListResponse::from_result("sidebar_list_goals", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_rename_goal(horizon: String, id: String, text: String) -> SidebarActionResponse {
    let result = parse_horizon(&horizon).and_then(|horizon| {
        with_checklist(|checklist| {
            checklist
                .rename_goal(horizon, id.trim(), &text)
                .map(goal_item)
        })
    });
    SidebarActionResponse::from_result("sidebar_rename_goal", result)
}

/// Deletes a goal. Unknown ids succeed without a write.
#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_delete_goal(horizon: String, id: String) -> SidebarActionResponse {
    let result = parse_horizon(&horizon).and_then(|horizon| {
        with_checklist(|checklist| checklist.delete_goal(horizon, id.trim()))
    });
    SidebarActionResponse::from_removal("sidebar_delete_goal", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_add_task(text: String) -> SidebarActionResponse {
    let result = with_checklist(|checklist| checklist.add_task(&text).map(task_item));
    SidebarActionResponse::from_result("sidebar_add_task", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_list_tasks() -> SidebarListResponse {
    let result = with_checklist(|checklist| {
        Ok::<_, String>(checklist.tasks().into_iter().map(task_item).collect())
    });
    SidebarListResponse::from_result("sidebar_list_tasks", result)
}

/// Flips a task's completion flag.
#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_toggle_task(id: String) -> SidebarActionResponse {
    let result = with_checklist(|checklist| checklist.toggle_task(id.trim()).map(task_item));
    SidebarActionResponse::from_result("sidebar_toggle_task", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_delete_task(id: String) -> SidebarActionResponse {
    let result = with_checklist(|checklist| checklist.delete_task(id.trim()));
    SidebarActionResponse::from_removal("sidebar_delete_task", result)
}

fn submit_new_block(
    op: &str,
    day: &str,
    title: String,
    duration_minutes: u32,
    color: &str,
    start_time: Option<u32>,
) -> Result<Block, PlannerFailure> {
    let day = parse_day(op, day)?;
    let mut draft = BlockDraft::new(title, duration_minutes).with_color(parse_color(op, color)?);
    draft.start_time = start_time;
    with_schedule(op, |schedule| schedule.add_block(day, draft))
}

struct PlannerFailure {
    code: &'static str,
    message: String,
}

impl PlannerFailure {
    fn new(op: &str, code: &'static str, detail: impl std::fmt::Display) -> Self {
        Self {
            code,
            message: format!("{op} failed: {detail}"),
        }
    }
}

/// Lets `with_schedule` callers return either core errors or plain strings.
trait FailureCode: std::fmt::Display {
    fn failure_code(&self) -> &'static str;
}

impl FailureCode for weekgrid_core::ScheduleError {
    fn failure_code(&self) -> &'static str {
        self.code()
    }
}

impl FailureCode for String {
    fn failure_code(&self) -> &'static str {
        "internal"
    }
}

fn resolve_settings() -> Result<PlannerSettings, String> {
    PLANNER_SETTINGS
        .get_or_init(|| {
            PlannerSettings::from_env().map_err(|err| {
                warn!(
                    "event=settings_resolve module=ffi status=error error_code=invalid_settings error={}",
                    err
                );
                err.to_string()
            })
        })
        .clone()
}

fn with_schedule<T, E: FailureCode>(
    op: &str,
    f: impl FnOnce(&mut WeekSchedule<SqliteKeyValueStore<'_>>) -> Result<T, E>,
) -> Result<T, PlannerFailure> {
    // A panic in another call must not wedge the planner for the rest of the process.
    let _guard = PLANNER_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let settings =
        resolve_settings().map_err(|err| PlannerFailure::new(op, "invalid_settings", err))?;
    let conn = open_db(&settings.db_path)
        .map_err(|err| PlannerFailure::new(op, "db_open_failed", err))?;
    let store = SqliteKeyValueStore::try_new(&conn)
        .map_err(|err| PlannerFailure::new(op, "store_init_failed", err))?;
    let mut schedule = WeekSchedule::load(store, settings.placement);
    f(&mut schedule).map_err(|err| PlannerFailure::new(op, err.failure_code(), err))
}

fn with_checklist<T, E: std::fmt::Display>(
    f: impl FnOnce(&mut ChecklistService<SqliteKeyValueStore<'_>>) -> Result<T, E>,
) -> Result<T, String> {
    let _guard = PLANNER_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let settings = resolve_settings()?;
    let conn = open_db(&settings.db_path).map_err(|err| format!("planner DB open failed: {err}"))?;
    let store = SqliteKeyValueStore::try_new(&conn)
        .map_err(|err| format!("planner store init failed: {err}"))?;
    let mut checklist = ChecklistService::new(store);
    f(&mut checklist).map_err(|err| err.to_string())
}

fn parse_day(op: &str, raw: &str) -> Result<Weekday, PlannerFailure> {
    Weekday::from_str(raw).map_err(|err| PlannerFailure::new(op, "invalid_input", err))
}

fn parse_color(op: &str, raw: &str) -> Result<BlockColor, PlannerFailure> {
    if raw.trim().is_empty() {
        return Ok(BlockColor::default());
    }
    BlockColor::from_str(raw).map_err(|err| PlannerFailure::new(op, "invalid_input", err))
}

fn parse_horizon(raw: &str) -> Result<GoalHorizon, String> {
    GoalHorizon::parse(raw).ok_or_else(|| {
        format!(
            "unknown goal horizon `{}`; expected daily|weekly|monthly",
            raw.trim()
        )
    })
}

fn to_block_item(block: &Block) -> PlannerBlockItem {
    PlannerBlockItem {
        id: block.id.to_string(),
        title: block.title.clone(),
        day: block.day.to_string(),
        start_time: block.start_time,
        duration_minutes: block.duration_minutes,
        color: block.color.to_string(),
        start_label: block.start_clock(),
        end_label: block.end_clock(),
    }
}

fn goal_item(goal: Goal) -> SidebarItem {
    SidebarItem {
        id: goal.id,
        text: goal.text,
        completed: false,
    }
}

fn task_item(task: ChecklistTask) -> SidebarItem {
    SidebarItem {
        id: task.id,
        text: task.text,
        completed: task.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, planner_query_day, planner_request_delete,
        planner_request_reorder, planner_request_reposition, planner_submit_edited_block,
        planner_submit_new_block, sidebar_add_goal, sidebar_add_task, sidebar_delete_goal,
        sidebar_delete_task, sidebar_list_goals, sidebar_list_tasks, sidebar_rename_goal,
        sidebar_toggle_task, PLANNER_SETTINGS,
    };
    use weekgrid_core::PlannerSettings;

    /// Points every test in this process at one private database file.
    ///
    /// Tests run concurrently against it, so each test owns one weekday and
    /// removes the blocks it creates.
    fn use_test_database() {
        PLANNER_SETTINGS.get_or_init(|| {
            Ok(PlannerSettings {
                db_path: std::env::temp_dir().join(format!(
                    "weekgrid_ffi_test_{}.sqlite3",
                    std::process::id()
                )),
                ..PlannerSettings::default()
            })
        });
    }

    fn add(day: &str, title: &str, minutes: u32) -> String {
        let response = planner_submit_new_block(
            day.to_string(),
            title.to_string(),
            minutes,
            String::new(),
            None,
        );
        assert!(response.ok, "{}", response.message);
        response.block.expect("added block is returned").id
    }

    fn delete_all(ids: &[String]) {
        for id in ids {
            assert!(planner_request_delete(id.clone()).ok);
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn new_block_is_packed_and_labelled() {
        use_test_database();
        let first = add("monday", "Plan", 1);
        let response = planner_submit_new_block(
            "Monday".to_string(),
            "  Review  ".to_string(),
            1,
            "bg-green-500".to_string(),
            Some(900),
        );
        assert!(response.ok, "{}", response.message);
        let block = response.block.clone().expect("added block is returned");
        assert_eq!(block.title, "Review");
        assert_eq!(block.color, "green");
        assert_eq!(block.start_time, 1);
        assert_eq!(block.start_label, "00:01");
        assert_eq!(block.end_label, "00:02");

        delete_all(&[first, block.id]);
    }

    #[test]
    fn invalid_input_is_reported_in_envelope() {
        use_test_database();
        let bad_day =
            planner_submit_new_block("Funday".to_string(), "X".to_string(), 1, String::new(), None);
        assert!(!bad_day.ok);
        assert_eq!(bad_day.error_code.as_deref(), Some("invalid_input"));

        let bad_color = planner_submit_new_block(
            "Friday".to_string(),
            "X".to_string(),
            1,
            "plaid".to_string(),
            None,
        );
        assert_eq!(bad_color.error_code.as_deref(), Some("invalid_input"));

        let too_long = planner_submit_new_block(
            "Friday".to_string(),
            "X".to_string(),
            1441,
            String::new(),
            None,
        );
        assert_eq!(too_long.error_code.as_deref(), Some("invalid_block"));

        let missing = planner_submit_edited_block(
            "no-such-block".to_string(),
            "Friday".to_string(),
            "X".to_string(),
            1,
            String::new(),
            0,
        );
        assert_eq!(missing.error_code.as_deref(), Some("not_found"));

        assert!(planner_request_delete("no-such-block".to_string()).ok);
        assert!(!planner_query_day("Someday".to_string()).ok);
    }

    #[test]
    fn reorder_and_query_day_reflect_new_order() {
        use_test_database();
        let a = add("Wednesday", "A", 2);
        let b = add("Wednesday", "B", 1);

        let response = planner_request_reorder("Wednesday".to_string(), 1, 0);
        assert!(response.ok, "{}", response.message);

        let day = planner_query_day("wednesday".to_string());
        assert!(day.ok, "{}", day.message);
        assert_eq!(day.day, "Wednesday");
        let order: Vec<(&str, u32)> = day
            .blocks
            .iter()
            .map(|item| (item.title.as_str(), item.start_time))
            .collect();
        assert_eq!(order, vec![("B", 0), ("A", 1)]);
        assert_eq!(day.scheduled_minutes, 3);
        assert_eq!(day.scheduled_label, "3m");

        let out_of_range = planner_request_reorder("Wednesday".to_string(), 0, 9);
        assert_eq!(out_of_range.error_code.as_deref(), Some("index_out_of_range"));

        delete_all(&[a, b]);
    }

    #[test]
    fn edit_and_reposition_update_stored_block() {
        use_test_database();
        let id = add("Thursday", "Draft", 1);

        let edited = planner_submit_edited_block(
            id.clone(),
            "Thursday".to_string(),
            "Final".to_string(),
            1,
            "purple".to_string(),
            0,
        );
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(edited.block.as_ref().map(|b| b.title.as_str()), Some("Final"));

        let moved = planner_request_reposition("Thursday".to_string(), id.clone(), 99_999);
        assert!(moved.ok, "{}", moved.message);
        let moved_block = moved.block.expect("repositioned block is returned");
        assert_eq!(moved_block.start_time, 1439);
        assert_eq!(moved_block.color, "purple");

        delete_all(&[id]);
    }

    #[test]
    fn sidebar_round_trip() {
        use_test_database();
        let goal = sidebar_add_goal("weekly".to_string(), "  Ship beta ".to_string());
        assert!(goal.ok, "{}", goal.message);
        let goal = goal.item.expect("added goal is returned");
        assert_eq!(goal.text, "Ship beta");

        let listed = sidebar_list_goals("Weekly".to_string());
        assert!(listed.ok, "{}", listed.message);
        assert!(listed.items.iter().any(|item| item.id == goal.id));
        assert!(!sidebar_list_goals("yearly".to_string()).ok);
        assert!(!sidebar_add_goal("daily".to_string(), "   ".to_string()).ok);

        let task = sidebar_add_task("Book venue".to_string())
            .item
            .expect("added task is returned");
        let toggled = sidebar_toggle_task(task.id.clone());
        assert!(toggled.ok, "{}", toggled.message);
        assert!(toggled.item.expect("toggled task is returned").completed);
        assert!(!sidebar_toggle_task("missing".to_string()).ok);
    }

    #[test]
    fn sidebar_rename_and_delete() {
        use_test_database();
        let goal = sidebar_add_goal("monthly".to_string(), "Read two books".to_string())
            .item
            .expect("added goal is returned");

        let renamed = sidebar_rename_goal(
            "monthly".to_string(),
            goal.id.clone(),
            " Read three books ".to_string(),
        );
        assert!(renamed.ok, "{}", renamed.message);
        assert_eq!(
            renamed.item.map(|item| item.text).as_deref(),
            Some("Read three books")
        );
        assert!(!sidebar_rename_goal("monthly".to_string(), goal.id.clone(), " ".to_string()).ok);
        assert!(!sidebar_rename_goal("daily".to_string(), goal.id.clone(), "x".to_string()).ok);

        let deleted = sidebar_delete_goal("monthly".to_string(), goal.id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert_eq!(deleted.message, "Item deleted.");
        let again = sidebar_delete_goal("monthly".to_string(), goal.id.clone());
        assert!(again.ok);
        assert_eq!(again.message, "Item already absent.");
        assert!(!sidebar_list_goals("monthly".to_string())
            .items
            .iter()
            .any(|item| item.id == goal.id));

        let task = sidebar_add_task("Return library card".to_string())
            .item
            .expect("added task is returned");
        assert!(sidebar_delete_task(task.id.clone()).ok);
        assert!(!sidebar_list_tasks()
            .items
            .iter()
            .any(|item| item.id == task.id));
        assert!(!sidebar_delete_goal("yearly".to_string(), goal.id).ok);
    }
}
