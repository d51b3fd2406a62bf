//! Block set codec over the key-value gateway.
//!
//! # Responsibility
//! - Encode the full week as one JSON array under `weekly-events`.
//! - Decode stored arrays tolerantly so startup never fails.
//!
//! # Invariants
//! - Absent or unparsable values decode to an empty week.
//! - Decoded sets hold valid blocks only, ids unique, and no day over
//!   capacity; offending records are skipped in stored order.

use crate::model::block::{Block, BlockId};
use crate::model::weekday::Weekday;
use crate::repo::kv_store::{KeyValueStore, StoreResult};
use crate::timeline::clock::MINUTES_PER_DAY;
use log::{info, warn};
use std::collections::{HashMap, HashSet};

/// Store key holding the week's block array.
pub const WEEKLY_EVENTS_KEY: &str = "weekly-events";

/// Outcome of decoding a stored block array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedBlocks {
    pub blocks: Vec<Block>,
    /// Records dropped because they were invalid, duplicated or over capacity.
    pub skipped: usize,
}

/// Decodes a JSON block array, skipping records that break week invariants.
pub fn decode_blocks(raw: &str) -> Result<DecodedBlocks, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut decoded = DecodedBlocks::default();
    let mut seen_ids: HashSet<BlockId> = HashSet::with_capacity(values.len());
    let mut day_totals: HashMap<Weekday, u32> = HashMap::new();

    for value in values {
        let Ok(block) = serde_json::from_value::<Block>(value) else {
            decoded.skipped += 1;
            continue;
        };
        let total = day_totals.entry(block.day).or_insert(0);
        if *total + block.duration_minutes > MINUTES_PER_DAY || seen_ids.contains(&block.id) {
            decoded.skipped += 1;
            continue;
        }
        *total += block.duration_minutes;
        seen_ids.insert(block.id.clone());
        decoded.blocks.push(block);
    }

    Ok(decoded)
}

pub fn encode_blocks(blocks: &[Block]) -> Result<String, serde_json::Error> {
    serde_json::to_string(blocks)
}

/// Loads the stored week; any read or decode failure yields an empty week.
pub fn load_blocks<S: KeyValueStore>(store: &S) -> Vec<Block> {
    let raw = match store.get(WEEKLY_EVENTS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=blocks_load module=repo status=ok source=absent count=0");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=blocks_load module=repo status=degraded error_code=store_read_failed error={}",
                err
            );
            return Vec::new();
        }
    };

    match decode_blocks(&raw) {
        Ok(decoded) => {
            if decoded.skipped > 0 {
                warn!(
                    "event=blocks_load module=repo status=degraded count={} skipped={}",
                    decoded.blocks.len(),
                    decoded.skipped
                );
            } else {
                info!(
                    "event=blocks_load module=repo status=ok count={}",
                    decoded.blocks.len()
                );
            }
            decoded.blocks
        }
        Err(err) => {
            warn!(
                "event=blocks_load module=repo status=degraded error_code=unparsable_blob bytes={} error={}",
                raw.len(),
                err
            );
            Vec::new()
        }
    }
}

/// Overwrites the stored week with `blocks`.
pub fn save_blocks<S: KeyValueStore>(store: &mut S, blocks: &[Block]) -> StoreResult<()> {
    let encoded = encode_blocks(blocks)?;
    store.set(WEEKLY_EVENTS_KEY, &encoded)
}
