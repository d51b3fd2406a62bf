//! Sidebar checklist codec over the key-value gateway.
//!
//! Each goal horizon and the task list live under their own key so one list
//! can be rewritten without touching the others.

use crate::model::checklist::{ChecklistTask, Goal, GoalHorizon};
use crate::repo::kv_store::{KeyValueStore, StoreResult};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const DAILY_GOALS_KEY: &str = "daily-goals";
pub const WEEKLY_GOALS_KEY: &str = "weekly-goals";
pub const MONTHLY_GOALS_KEY: &str = "monthly-goals";
pub const TASKS_KEY: &str = "tasks";

pub fn goals_key(horizon: GoalHorizon) -> &'static str {
    match horizon {
        GoalHorizon::Daily => DAILY_GOALS_KEY,
        GoalHorizon::Weekly => WEEKLY_GOALS_KEY,
        GoalHorizon::Monthly => MONTHLY_GOALS_KEY,
    }
}

pub fn load_goals<S: KeyValueStore>(store: &S, horizon: GoalHorizon) -> Vec<Goal> {
    load_list(store, goals_key(horizon))
}

pub fn save_goals<S: KeyValueStore>(
    store: &mut S,
    horizon: GoalHorizon,
    goals: &[Goal],
) -> StoreResult<()> {
    save_list(store, goals_key(horizon), goals)
}

pub fn load_tasks<S: KeyValueStore>(store: &S) -> Vec<ChecklistTask> {
    load_list(store, TASKS_KEY)
}

pub fn save_tasks<S: KeyValueStore>(store: &mut S, tasks: &[ChecklistTask]) -> StoreResult<()> {
    save_list(store, TASKS_KEY, tasks)
}

fn load_list<S: KeyValueStore, T: DeserializeOwned>(store: &S, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(
                "event=checklist_load module=repo status=degraded key={} error_code=store_read_failed error={}",
                key, err
            );
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(
            "event=checklist_load module=repo status=degraded key={} error_code=unparsable_blob error={}",
            key, err
        );
        Vec::new()
    })
}

fn save_list<S: KeyValueStore, T: Serialize>(
    store: &mut S,
    key: &str,
    items: &[T],
) -> StoreResult<()> {
    let encoded = serde_json::to_string(items)?;
    store.set(key, &encoded)
}
