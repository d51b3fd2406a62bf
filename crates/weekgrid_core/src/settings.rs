//! Process settings resolved from the environment.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - An unrecognized placement value is an error, not a silent default.

use crate::logging::default_log_level;
use crate::timeline::placement::PlacementPolicy;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "WEEKGRID_DB_PATH";
pub const PLACEMENT_ENV: &str = "WEEKGRID_PLACEMENT";
pub const LOG_LEVEL_ENV: &str = "WEEKGRID_LOG_LEVEL";
pub const DEFAULT_DB_FILE_NAME: &str = "weekgrid_planner.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    InvalidPlacement(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPlacement(value) => write!(
                f,
                "unsupported {PLACEMENT_ENV} `{value}`; expected auto_packed|free_form"
            ),
        }
    }
}

impl Error for SettingsError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerSettings {
    pub db_path: PathBuf,
    pub placement: PlacementPolicy,
    pub log_level: String,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            placement: PlacementPolicy::default(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl PlannerSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut settings = Self::default();

        if let Some(path) = read(DB_PATH_ENV) {
            settings.db_path = PathBuf::from(path);
        }
        if let Some(raw) = read(PLACEMENT_ENV) {
            settings.placement =
                PlacementPolicy::parse(&raw).ok_or(SettingsError::InvalidPlacement(raw))?;
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            settings.log_level = level;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlannerSettings, SettingsError, DEFAULT_DB_FILE_NAME};
    use crate::timeline::placement::PlacementPolicy;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let settings = PlannerSettings::from_lookup(lookup(&[("WEEKGRID_DB_PATH", "  ")]))
            .expect("defaults are valid");
        assert!(settings.db_path.ends_with(DEFAULT_DB_FILE_NAME));
        assert_eq!(settings.placement, PlacementPolicy::AutoPacked);
        assert!(!settings.log_level.is_empty());
    }

    #[test]
    fn overrides_are_read() {
        let settings = PlannerSettings::from_lookup(lookup(&[
            ("WEEKGRID_DB_PATH", "/var/lib/weekgrid/plan.sqlite3"),
            ("WEEKGRID_PLACEMENT", "free-form"),
            ("WEEKGRID_LOG_LEVEL", "warn"),
        ]))
        .expect("valid overrides");
        assert_eq!(settings.db_path, PathBuf::from("/var/lib/weekgrid/plan.sqlite3"));
        assert_eq!(settings.placement, PlacementPolicy::FreeForm);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn unknown_placement_is_rejected() {
        let err = PlannerSettings::from_lookup(lookup(&[("WEEKGRID_PLACEMENT", "diagonal")]))
            .expect_err("diagonal is not a policy");
        assert_eq!(err, SettingsError::InvalidPlacement("diagonal".to_string()));
    }
}
