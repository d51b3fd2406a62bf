//! Persistence gateway and the codecs that write through it.
//!
//! # Responsibility
//! - Define the key-value store port and its SQLite / in-memory adapters.
//! - Keep JSON encoding of planner aggregates out of the service layer.
//!
//! # Invariants
//! - Loads never fail: absent or corrupt values decode to empty collections.
//! - Saves always overwrite the full value for their key.

pub mod block_repo;
pub mod checklist_repo;
pub mod kv_store;
