//! Planner use-case services.
//!
//! # Responsibility
//! - Turn user intents into timeline operations plus a persistence write.
//! - Keep FFI/CLI layers decoupled from storage details.

pub mod checklist_service;
pub mod drag;
pub mod week_service;
