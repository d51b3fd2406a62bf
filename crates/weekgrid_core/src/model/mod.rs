//! Planner domain model.
//!
//! # Responsibility
//! - Define the canonical block record and its draft form.
//! - Define fixed vocabularies (weekdays, palette, goal horizons).
//!
//! # Invariants
//! - Every block is identified by a stable `BlockId` unique across the week.
//! - Model types are plain data; scheduling rules live in `timeline`.

pub mod block;
pub mod checklist;
pub mod palette;
pub mod weekday;
