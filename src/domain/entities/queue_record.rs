use crate::domain::value_objects::{
    CollectionName, OperationKind, OperationPayload, RecordId, RecordStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One pending mutation awaiting delivery to the portal backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueRecord {
    pub id: RecordId,
    pub operation: OperationKind,
    pub collection: CollectionName,
    pub payload: OperationPayload,
    pub status: RecordStatus,
    pub retry_count: u32,
    pub max_retries: u32,
    pub enqueued_at: DateTime<Utc>,
    pub last_error: Option<String>,
}

impl QueueRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RecordId,
        operation: OperationKind,
        collection: CollectionName,
        payload: OperationPayload,
        status: RecordStatus,
        retry_count: u32,
        max_retries: u32,
        enqueued_at: DateTime<Utc>,
        last_error: Option<String>,
    ) -> Self {
        Self {
            id,
            operation,
            collection,
            payload,
            status,
            retry_count,
            max_retries,
            enqueued_at,
            last_error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Bookkeeping for one failed delivery attempt. Moves the record into
    /// the terminal failed state once the retry budget is exhausted.
    pub fn register_failure(&mut self, message: String) {
        self.retry_count += 1;
        self.last_error = Some(message);
        if self.retry_count >= self.max_retries {
            self.status = RecordStatus::Failed;
        }
    }

    /// Re-admit a terminal record to automatic drains.
    pub fn reset_budget(&mut self) {
        self.retry_count = 0;
        self.status = RecordStatus::Pending;
        self.last_error = None;
    }
}
