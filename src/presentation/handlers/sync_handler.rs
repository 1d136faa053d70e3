use crate::application::services::sync_service::SyncServiceTrait;
use crate::domain::entities::{
    CollectionRefresh, DrainReport, ForceSyncReport, QueueRecord, QueueRecordDraft, RetryReport,
    SyncSnapshot,
};
use crate::domain::value_objects::{CollectionName, OperationKind, OperationPayload};
use crate::presentation::dto::sync::{
    ClearFailedResponse, CollectionRefreshEntry, DrainReportResponse, ForceSyncResponse,
    QueueOperationRequest, QueuedOperation, RetryFailedResponse, SyncStatusResponse,
};
use crate::presentation::dto::{ApiResponse, Validate};
use crate::shared::error::AppError;
use std::sync::Arc;

/// Facade consumed by the portal shell. Every method resolves to an
/// `ApiResponse`; failures are carried in the response, never raised.
pub struct SyncHandler {
    service: Arc<dyn SyncServiceTrait>,
}

impl SyncHandler {
    pub fn new(service: Arc<dyn SyncServiceTrait>) -> Self {
        Self { service }
    }

    pub async fn queue_operation(
        &self,
        request: QueueOperationRequest,
    ) -> ApiResponse<QueuedOperation> {
        let draft = match build_draft(request) {
            Ok(draft) => draft,
            Err(err) => return ApiResponse::from_app_error(err),
        };

        ApiResponse::from_result(self.service.queue_operation(draft).await.map(map_record))
    }

    pub async fn process_sync_queue(&self) -> ApiResponse<DrainReportResponse> {
        ApiResponse::from_result(self.service.process_sync_queue().await.map(map_drain))
    }

    pub async fn force_sync_all(&self) -> ApiResponse<ForceSyncResponse> {
        ApiResponse::from_result(self.service.force_sync_all().await.map(map_force_sync))
    }

    pub async fn sync_status(&self) -> ApiResponse<SyncStatusResponse> {
        ApiResponse::from_result(self.service.sync_status().await.map(map_snapshot))
    }

    pub async fn retry_failed_operations(&self) -> ApiResponse<RetryFailedResponse> {
        ApiResponse::from_result(self.service.retry_failed_operations().await.map(map_retry))
    }

    pub async fn clear_failed_operations(&self) -> ApiResponse<ClearFailedResponse> {
        ApiResponse::from_result(
            self.service
                .clear_failed_operations()
                .await
                .map(|removed| ClearFailedResponse { removed }),
        )
    }
}

fn build_draft(request: QueueOperationRequest) -> Result<QueueRecordDraft, AppError> {
    request.validate().map_err(AppError::Validation)?;

    let operation = OperationKind::parse(&request.operation).map_err(AppError::Validation)?;
    let collection = CollectionName::new(request.collection).map_err(AppError::Validation)?;
    let payload = OperationPayload::new(request.payload).map_err(AppError::Validation)?;

    Ok(QueueRecordDraft::new(
        operation,
        collection,
        payload,
        request.max_retries,
    ))
}

fn map_record(record: QueueRecord) -> QueuedOperation {
    QueuedOperation {
        record_id: record.id.to_string(),
        operation: record.operation.to_string(),
        collection: record.collection.to_string(),
        status: record.status.to_string(),
        retry_count: record.retry_count,
        max_retries: record.max_retries,
        enqueued_at: record.enqueued_at.timestamp_millis(),
    }
}

fn map_drain(report: DrainReport) -> DrainReportResponse {
    DrainReportResponse {
        processed: report.processed,
        failed: report.failed,
        outcome: report.outcome.to_string(),
    }
}

fn map_snapshot(snapshot: SyncSnapshot) -> SyncStatusResponse {
    SyncStatusResponse {
        is_online: snapshot.is_online,
        is_syncing: snapshot.is_syncing,
        last_sync_at: snapshot.last_sync_at.map(|at| at.timestamp_millis()),
        pending_operations: snapshot.pending_operations,
        failed_operations: snapshot.failed_operations,
    }
}

fn map_retry(report: RetryReport) -> RetryFailedResponse {
    RetryFailedResponse {
        reset: report.reset,
        drain: report.drain.map(map_drain),
    }
}

fn map_refresh(refresh: CollectionRefresh) -> CollectionRefreshEntry {
    CollectionRefreshEntry {
        collection: refresh.collection.to_string(),
        refreshed_at: refresh.refreshed_at.timestamp_millis(),
        record_count: refresh.record_count,
    }
}

fn map_force_sync(report: ForceSyncReport) -> ForceSyncResponse {
    ForceSyncResponse {
        drain: map_drain(report.drain),
        refreshed: report.refreshed.into_iter().map(map_refresh).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DrainOutcome, SyncSnapshot};
    use async_trait::async_trait;
    use serde_json::json;

    struct StubService {
        snapshot: SyncSnapshot,
    }

    impl StubService {
        fn new() -> Self {
            Self {
                snapshot: SyncSnapshot {
                    is_online: true,
                    is_syncing: false,
                    last_sync_at: None,
                    pending_operations: 2,
                    failed_operations: 1,
                },
            }
        }
    }

    #[async_trait]
    impl SyncServiceTrait for StubService {
        async fn queue_operation(
            &self,
            draft: QueueRecordDraft,
        ) -> Result<QueueRecord, AppError> {
            use crate::domain::value_objects::{RecordId, RecordStatus};
            Ok(QueueRecord::new(
                RecordId::generate(chrono::Utc::now()),
                draft.operation,
                draft.collection,
                draft.payload,
                RecordStatus::Pending,
                0,
                draft.max_retries.unwrap_or(3),
                chrono::Utc::now(),
                None,
            ))
        }

        async fn process_sync_queue(&self) -> Result<DrainReport, AppError> {
            Ok(DrainReport::from_counts(2, 0, 0))
        }

        async fn force_sync_all(&self) -> Result<ForceSyncReport, AppError> {
            Err(AppError::Offline)
        }

        async fn sync_status(&self) -> Result<SyncSnapshot, AppError> {
            Ok(self.snapshot.clone())
        }

        async fn retry_failed_operations(&self) -> Result<RetryReport, AppError> {
            Ok(RetryReport {
                reset: 1,
                drain: Some(DrainReport::from_counts(1, 0, 0)),
            })
        }

        async fn clear_failed_operations(&self) -> Result<u32, AppError> {
            Ok(1)
        }
    }

    fn handler() -> SyncHandler {
        SyncHandler::new(Arc::new(StubService::new()))
    }

    #[tokio::test]
    async fn queue_operation_rejects_invalid_request() {
        let response = handler()
            .queue_operation(QueueOperationRequest {
                operation: "upsert".to_string(),
                collection: "attendance".to_string(),
                payload: json!({"present": true}),
                max_retries: None,
            })
            .await;

        assert!(!response.success);
        assert_eq!(response.error_code.as_deref(), Some("VALIDATION"));
    }

    #[tokio::test]
    async fn queue_operation_maps_record_to_dto() {
        let response = handler()
            .queue_operation(QueueOperationRequest {
                operation: "create".to_string(),
                collection: "attendance".to_string(),
                payload: json!({"present": true}),
                max_retries: Some(5),
            })
            .await;

        assert!(response.success);
        let queued = response.data.unwrap();
        assert_eq!(queued.operation, "create");
        assert_eq!(queued.collection, "attendance");
        assert_eq!(queued.max_retries, 5);
        assert_eq!(queued.status, "pending");
    }

    #[tokio::test]
    async fn force_sync_offline_is_a_structured_failure() {
        let response = handler().force_sync_all().await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Device is offline"));
        assert_eq!(response.error_code.as_deref(), Some("OFFLINE"));
    }

    #[tokio::test]
    async fn process_sync_queue_reports_outcome_string() {
        let response = handler().process_sync_queue().await;

        assert!(response.success);
        let report = response.data.unwrap();
        assert_eq!(report.processed, 2);
        assert_eq!(report.outcome, DrainOutcome::Complete.to_string());
    }
}
