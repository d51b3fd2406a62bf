//! FRB-facing bindings for the Weekgrid planner.

pub mod api;
