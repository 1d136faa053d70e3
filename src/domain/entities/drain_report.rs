use crate::domain::entities::collection_refresh::CollectionRefresh;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrainOutcome {
    /// No attempt was made; the device was offline.
    Offline,
    /// Nothing to do: queue empty, only terminal records, or a drain was
    /// already in progress.
    Idle,
    /// Every attempted record was delivered.
    Complete,
    /// Some records succeeded, some remain queued or went terminal.
    Partial,
}

impl DrainOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            DrainOutcome::Offline => "offline",
            DrainOutcome::Idle => "idle",
            DrainOutcome::Complete => "complete",
            DrainOutcome::Partial => "partial",
        }
    }
}

impl fmt::Display for DrainOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one drain cycle. `processed` counts delivered records,
/// `failed` counts records newly moved to the terminal failed state,
/// `retried` counts records kept for the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainReport {
    pub processed: u32,
    pub failed: u32,
    pub retried: u32,
    pub outcome: DrainOutcome,
}

impl DrainReport {
    pub fn offline() -> Self {
        Self {
            processed: 0,
            failed: 0,
            retried: 0,
            outcome: DrainOutcome::Offline,
        }
    }

    pub fn idle() -> Self {
        Self {
            processed: 0,
            failed: 0,
            retried: 0,
            outcome: DrainOutcome::Idle,
        }
    }

    pub fn from_counts(processed: u32, failed: u32, retried: u32) -> Self {
        let outcome = if processed + failed + retried == 0 {
            DrainOutcome::Idle
        } else if failed == 0 && retried == 0 {
            DrainOutcome::Complete
        } else {
            DrainOutcome::Partial
        };
        Self {
            processed,
            failed,
            retried,
            outcome,
        }
    }
}

/// Outcome of a forced full resync: the drain that preceded it plus the
/// collections re-fetched from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceSyncReport {
    pub drain: DrainReport,
    pub refreshed: Vec<CollectionRefresh>,
}

/// Outcome of re-admitting terminal-failed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryReport {
    pub reset: u32,
    pub drain: Option<DrainReport>,
}
