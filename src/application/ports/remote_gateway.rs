use crate::domain::entities::QueueRecord;
use crate::domain::value_objects::CollectionName;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Delivery side of the portal backend. Delivery is expected to be
/// idempotent from the endpoint's perspective: a crash between delivery and
/// queue persistence replays the record on the next cycle.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn deliver(&self, record: &QueueRecord) -> Result<(), AppError>;

    async fn fetch_collection(&self, collection: &CollectionName) -> Result<Vec<Value>, AppError>;
}
