use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Queue contents partitioned by retry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QueueCounts {
    pub pending: u32,
    pub failed: u32,
}

/// Point-in-time view of the driver, computed on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub is_online: bool,
    pub is_syncing: bool,
    pub last_sync_at: Option<DateTime<Utc>>,
    pub pending_operations: u32,
    pub failed_operations: u32,
}
