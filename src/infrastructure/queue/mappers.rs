use crate::domain::entities::{CollectionRefresh, QueueRecord};
use crate::domain::value_objects::{
    CollectionName, OperationKind, OperationPayload, RecordId, RecordStatus,
};
use crate::infrastructure::queue::rows::{CollectionRefreshRow, SyncQueueRow};
use crate::shared::error::AppError;
use chrono::DateTime;

pub(crate) fn record_from_row(row: SyncQueueRow) -> Result<QueueRecord, AppError> {
    let id = RecordId::new(row.record_id).map_err(AppError::Storage)?;
    let operation = OperationKind::parse(&row.operation).map_err(AppError::Storage)?;
    let collection = CollectionName::new(row.collection_name).map_err(AppError::Storage)?;
    let payload = OperationPayload::from_json_str(&row.payload).map_err(AppError::Storage)?;
    let status = RecordStatus::from(row.status.as_str());
    let enqueued_at = DateTime::from_timestamp_millis(row.enqueued_at)
        .ok_or_else(|| AppError::Storage(format!("Invalid enqueued_at: {}", row.enqueued_at)))?;

    Ok(QueueRecord::new(
        id,
        operation,
        collection,
        payload,
        status,
        row.retry_count as u32,
        row.max_retries as u32,
        enqueued_at,
        row.last_error,
    ))
}

pub(crate) fn refresh_from_row(row: CollectionRefreshRow) -> Result<CollectionRefresh, AppError> {
    let collection = CollectionName::new(row.collection_name).map_err(AppError::Storage)?;
    let refreshed_at = DateTime::from_timestamp_millis(row.refreshed_at)
        .ok_or_else(|| AppError::Storage(format!("Invalid refreshed_at: {}", row.refreshed_at)))?;

    Ok(CollectionRefresh::new(
        collection,
        refreshed_at,
        row.record_count as u32,
    ))
}
