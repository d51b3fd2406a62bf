//! CLI probe for the planner core.
//!
//! # Responsibility
//! - Verify `weekgrid_core` linkage without the Flutter runtime.
//! - Print a read-only weekly occupancy summary of the configured database.

use std::process::ExitCode;
use weekgrid_core::db::open_db;
use weekgrid_core::{PlannerSettings, SqliteKeyValueStore, WeekSchedule};

fn main() -> ExitCode {
    println!("weekgrid_core ping={}", weekgrid_core::ping());
    println!("weekgrid_core version={}", weekgrid_core::core_version());

    match print_week_summary() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("weekgrid: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_week_summary() -> Result<(), String> {
    let settings = PlannerSettings::from_env().map_err(|err| err.to_string())?;
    let conn = open_db(&settings.db_path).map_err(|err| {
        format!(
            "cannot open planner database `{}`: {err}",
            settings.db_path.display()
        )
    })?;
    let store = SqliteKeyValueStore::try_new(&conn).map_err(|err| err.to_string())?;
    let schedule = WeekSchedule::load(store, settings.placement);
    let week = schedule.week_stats();

    println!(
        "db={} placement={} blocks={}",
        settings.db_path.display(),
        schedule.policy(),
        week.block_count
    );
    for day in &week.days {
        println!(
            "{:<9} scheduled={:>7} free={:>7} {:>3}%",
            day.day.as_str(),
            day.scheduled_label(),
            day.free_label(),
            day.percent_scheduled
        );
    }
    Ok(())
}
