//! History record shapes.
//!
//! # Responsibility
//! - Define the persisted calculation and conversion records.
//! - Provide the shared epoch-millisecond clock helper.
//!
//! # Invariants
//! - Entries are immutable once created; engines replace, never edit.
//! - `id` values are unique within one engine's history, including across
//!   rehydration (engines seed their counter above the largest loaded id).

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One completed calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Human-readable trace, e.g. `5 + 3` or `sqrt(9)`.
    pub expression: String,
    /// Formatted numeric result.
    pub result: f64,
    /// Unix epoch milliseconds at creation.
    pub timestamp: i64,
    /// Monotonic per-engine id; used for delete/recall.
    pub id: u64,
}

/// One recorded unit conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Category key, e.g. `length`.
    pub category: String,
    pub input_value: f64,
    /// Unit key within the category, e.g. `meter`.
    pub input_unit: String,
    pub output_value: f64,
    pub output_unit: String,
    /// Unix epoch milliseconds at creation.
    pub timestamp: i64,
    /// Monotonic per-engine id.
    pub id: u64,
}

/// Current wall clock as Unix epoch milliseconds.
///
/// Clamps to 0 if the system clock reads before the epoch; timestamps are
/// display metadata, never control flow.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
