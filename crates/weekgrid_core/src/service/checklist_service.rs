//! Sidebar checklist use-case service.
//!
//! # Responsibility
//! - Add, rename, toggle and delete horizon goals and tasks.
//!
//! # Invariants
//! - Stored text is trimmed and never blank.
//! - Each mutation rewrites only the key of the list it touches.
//! - Deleting an unknown id is a no-op without a write.

use crate::model::checklist::{ChecklistTask, Goal, GoalHorizon};
use crate::repo::checklist_repo::{load_goals, load_tasks, save_goals, save_tasks};
use crate::repo::kv_store::{KeyValueStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ChecklistResult<T> = Result<T, ChecklistError>;

#[derive(Debug)]
pub enum ChecklistError {
    EmptyText,
    NotFound(String),
    Store(StoreError),
}

impl Display for ChecklistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text cannot be empty"),
            Self::NotFound(id) => write!(f, "checklist item not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ChecklistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ChecklistError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub struct ChecklistService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ChecklistService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn goals(&self, horizon: GoalHorizon) -> Vec<Goal> {
        load_goals(&self.store, horizon)
    }

    pub fn tasks(&self) -> Vec<ChecklistTask> {
        load_tasks(&self.store)
    }

    pub fn add_goal(&mut self, horizon: GoalHorizon, text: &str) -> ChecklistResult<Goal> {
        let goal = Goal::new(normalize_text(text)?);
        let mut goals = self.goals(horizon);
        goals.push(goal.clone());
        save_goals(&mut self.store, horizon, &goals)?;
        info!(
            "event=goal_add module=checklist status=ok horizon={} count={}",
            horizon.as_str(),
            goals.len()
        );
        Ok(goal)
    }

    pub fn rename_goal(
        &mut self,
        horizon: GoalHorizon,
        id: &str,
        text: &str,
    ) -> ChecklistResult<Goal> {
        let text = normalize_text(text)?;
        let mut goals = self.goals(horizon);
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| ChecklistError::NotFound(id.to_string()))?;
        goal.text = text;
        let renamed = goal.clone();
        save_goals(&mut self.store, horizon, &goals)?;
        info!(
            "event=goal_rename module=checklist status=ok horizon={}",
            horizon.as_str()
        );
        Ok(renamed)
    }

    /// Returns whether a goal was removed.
    pub fn delete_goal(&mut self, horizon: GoalHorizon, id: &str) -> ChecklistResult<bool> {
        let mut goals = self.goals(horizon);
        let before = goals.len();
        goals.retain(|g| g.id != id);
        if goals.len() == before {
            return Ok(false);
        }
        save_goals(&mut self.store, horizon, &goals)?;
        info!(
            "event=goal_delete module=checklist status=ok horizon={} count={}",
            horizon.as_str(),
            goals.len()
        );
        Ok(true)
    }

    pub fn add_task(&mut self, text: &str) -> ChecklistResult<ChecklistTask> {
        let task = ChecklistTask::new(normalize_text(text)?);
        let mut tasks = self.tasks();
        tasks.push(task.clone());
        save_tasks(&mut self.store, &tasks)?;
        info!(
            "event=task_add module=checklist status=ok count={}",
            tasks.len()
        );
        Ok(task)
    }

    /// Flips `completed` and returns the updated task.
    pub fn toggle_task(&mut self, id: &str) -> ChecklistResult<ChecklistTask> {
        let mut tasks = self.tasks();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ChecklistError::NotFound(id.to_string()))?;
        task.completed = !task.completed;
        let toggled = task.clone();
        save_tasks(&mut self.store, &tasks)?;
        info!(
            "event=task_toggle module=checklist status=ok completed={}",
            toggled.completed
        );
        Ok(toggled)
    }

    pub fn delete_task(&mut self, id: &str) -> ChecklistResult<bool> {
        let mut tasks = self.tasks();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        save_tasks(&mut self.store, &tasks)?;
        info!(
            "event=task_delete module=checklist status=ok count={}",
            tasks.len()
        );
        Ok(true)
    }
}

fn normalize_text(text: &str) -> ChecklistResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ChecklistError::EmptyText);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{ChecklistError, ChecklistService};
    use crate::model::checklist::GoalHorizon;
    use crate::repo::checklist_repo::{DAILY_GOALS_KEY, TASKS_KEY, WEEKLY_GOALS_KEY};
    use crate::repo::kv_store::MemoryKeyValueStore;

    #[test]
    fn goals_are_trimmed_and_kept_per_horizon() {
        let mut service = ChecklistService::new(MemoryKeyValueStore::new());
        let goal = service
            .add_goal(GoalHorizon::Weekly, "  Ship release  ")
            .expect("non-blank goal");
        assert_eq!(goal.text, "Ship release");
        assert_eq!(service.goals(GoalHorizon::Weekly), vec![goal]);
        assert!(service.goals(GoalHorizon::Daily).is_empty());

        let store = service.into_store();
        assert!(store.raw(WEEKLY_GOALS_KEY).is_some());
        assert!(store.raw(DAILY_GOALS_KEY).is_none());
    }

    #[test]
    fn blank_text_is_rejected_without_write() {
        let mut service = ChecklistService::new(MemoryKeyValueStore::new());
        assert!(matches!(
            service.add_task("   "),
            Err(ChecklistError::EmptyText)
        ));
        assert!(service.into_store().is_empty());
    }

    #[test]
    fn rename_and_toggle_require_known_ids() {
        let mut service = ChecklistService::new(MemoryKeyValueStore::new());
        assert!(matches!(
            service.rename_goal(GoalHorizon::Daily, "missing", "x"),
            Err(ChecklistError::NotFound(_))
        ));
        assert!(matches!(
            service.toggle_task("missing"),
            Err(ChecklistError::NotFound(_))
        ));

        let goal = service
            .add_goal(GoalHorizon::Daily, "Walk")
            .expect("non-blank goal");
        let renamed = service
            .rename_goal(GoalHorizon::Daily, &goal.id, " Run ")
            .expect("goal exists");
        assert_eq!(renamed.text, "Run");
        assert_eq!(renamed.id, goal.id);
    }

    #[test]
    fn toggle_flips_and_delete_is_noop_for_unknown() {
        let mut service = ChecklistService::new(MemoryKeyValueStore::new());
        let task = service.add_task("Email").expect("non-blank task");
        assert!(service.toggle_task(&task.id).expect("task exists").completed);
        assert!(!service.toggle_task(&task.id).expect("task exists").completed);

        assert!(!service.delete_task("missing").expect("noop delete"));
        assert!(service.delete_task(&task.id).expect("delete"));
        assert!(service.tasks().is_empty());

        let store = service.into_store();
        assert_eq!(store.raw(TASKS_KEY), Some("[]"));
    }
}
