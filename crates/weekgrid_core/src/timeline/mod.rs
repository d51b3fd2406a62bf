//! Timeline scheduling engine.
//!
//! # Responsibility
//! - Convert between clock strings and minute offsets (`clock`).
//! - Maintain the ordered per-day block sequence (`day`).
//! - Name the placement modes a schedule can run under (`placement`).
//!
//! # Invariants
//! - Everything here is pure: inputs are borrowed, results are new values.
//! - No operation performs I/O or logging.

pub mod clock;
pub mod day;
pub mod placement;
