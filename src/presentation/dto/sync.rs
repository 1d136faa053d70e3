use crate::presentation::dto::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueOperationRequest {
    pub operation: String,
    pub collection: String,
    pub payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

impl Validate for QueueOperationRequest {
    fn validate(&self) -> Result<(), String> {
        if self.operation.is_empty() {
            return Err("Operation is required".to_string());
        }
        if self.collection.is_empty() {
            return Err("Collection is required".to_string());
        }
        if self.payload.is_null() {
            return Err("Payload is required".to_string());
        }
        let size = serde_json::to_string(&self.payload)
            .map(|s| s.len())
            .unwrap_or(0);
        if size > 200_000 {
            return Err("Payload is too large (max 200KB)".to_string());
        }
        if let Some(retries) = self.max_retries {
            if retries == 0 || retries > 10 {
                return Err("maxRetries must be between 1 and 10".to_string());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedOperation {
    pub record_id: String,
    pub operation: String,
    pub collection: String,
    pub status: String,
    pub retry_count: u32,
    pub max_retries: u32,
    pub enqueued_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrainReportResponse {
    pub processed: u32,
    pub failed: u32,
    pub outcome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusResponse {
    pub is_online: bool,
    pub is_syncing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync_at: Option<i64>,
    pub pending_operations: u32,
    pub failed_operations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryFailedResponse {
    pub reset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drain: Option<DrainReportResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRefreshEntry {
    pub collection: String,
    pub refreshed_at: i64,
    pub record_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceSyncResponse {
    pub drain: DrainReportResponse,
    pub refreshed: Vec<CollectionRefreshEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearFailedResponse {
    pub removed: u32,
}
