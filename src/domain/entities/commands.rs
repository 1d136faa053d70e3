use crate::domain::value_objects::{CollectionName, OperationKind, OperationPayload};
use serde::{Deserialize, Serialize};

/// Draft used when enqueueing a mutation. `max_retries` falls back to the
/// configured default when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueRecordDraft {
    pub operation: OperationKind,
    pub collection: CollectionName,
    pub payload: OperationPayload,
    pub max_retries: Option<u32>,
}

impl QueueRecordDraft {
    pub fn new(
        operation: OperationKind,
        collection: CollectionName,
        payload: OperationPayload,
        max_retries: Option<u32>,
    ) -> Self {
        Self {
            operation,
            collection,
            payload,
            max_retries,
        }
    }
}
