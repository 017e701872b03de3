//! Versioned read views of a cell

use chrono::{DateTime, Utc};
use evercount_core::Value;
use serde::{Deserialize, Serialize};

/// Point-in-time view of a cell
///
/// Captures the value together with the cell's version and last-write
/// timestamp, all read under one lock acquisition so the three fields
/// are mutually consistent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Value at snapshot time
    pub value: Value,
    /// Version number (monotonically increasing, starts at 1)
    pub version: u64,
    /// Timestamp of the last committed write
    pub updated_at: DateTime<Utc>,
}
