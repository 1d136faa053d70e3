mod common;

use common::{draft, setup};
use maktab_sync::application::ports::QueueStore;
use maktab_sync::application::services::SyncServiceTrait;
use maktab_sync::domain::entities::DrainOutcome;
use maktab_sync::presentation::SyncHandler;
use maktab_sync::presentation::dto::sync::QueueOperationRequest;
use maktab_sync::shared::error::AppError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn status_reflects_connectivity_and_counts() {
    let harness = setup().await;

    let status = harness.service.sync_status().await.expect("status");
    assert!(!status.is_online);
    assert!(!status.is_syncing);
    assert!(status.last_sync_at.is_none());
    assert_eq!(status.pending_operations, 0);
    assert_eq!(status.failed_operations, 0);

    harness
        .service
        .queue_operation(draft("create", "attendance", None))
        .await
        .expect("enqueue");
    harness.connectivity.set_online(true);

    let status = harness.service.sync_status().await.expect("status");
    assert!(status.is_online);
    assert_eq!(status.pending_operations, 1);
}

#[tokio::test]
async fn retry_failed_resets_budget_and_drains_in_the_same_call() {
    let harness = setup().await;
    harness.gateway.fail_collection("exam-results");

    let record = harness
        .service
        .queue_operation(draft("update", "exam-results", Some(1)))
        .await
        .expect("enqueue");
    harness.connectivity.set_online(true);
    harness.service.process_sync_queue().await.expect("drain");
    assert_eq!(
        harness.service.sync_status().await.unwrap().failed_operations,
        1
    );

    // The backend recovers; the failed record is re-admitted and delivered
    // within the retry call itself.
    harness.gateway.restore_collection("exam-results");
    let report = harness
        .service
        .retry_failed_operations()
        .await
        .expect("retry failed");
    assert_eq!(report.reset, 1);
    let drain = report.drain.expect("drain ran");
    assert_eq!(drain.processed, 1);
    assert_eq!(drain.outcome, DrainOutcome::Complete);

    let status = harness.service.sync_status().await.expect("status");
    assert_eq!(status.pending_operations, 0);
    assert_eq!(status.failed_operations, 0);
    assert_eq!(harness.gateway.delivered(), vec![record.id.to_string()]);
}

#[tokio::test]
async fn retry_failed_while_offline_only_resets() {
    let harness = setup().await;
    harness.gateway.fail_collection("attendance");

    harness
        .service
        .queue_operation(draft("create", "attendance", Some(1)))
        .await
        .expect("enqueue");
    harness.connectivity.set_online(true);
    harness.service.process_sync_queue().await.expect("drain");

    harness.connectivity.set_online(false);
    let report = harness
        .service
        .retry_failed_operations()
        .await
        .expect("retry failed");
    assert_eq!(report.reset, 1);
    assert!(report.drain.is_none());

    let status = harness.service.sync_status().await.expect("status");
    assert_eq!(status.pending_operations, 1);
    assert_eq!(status.failed_operations, 0);
}

#[tokio::test]
async fn clear_failed_drops_terminal_records() {
    let harness = setup().await;
    harness.gateway.fail_collection("attendance");

    harness
        .service
        .queue_operation(draft("create", "attendance", Some(1)))
        .await
        .expect("enqueue");
    harness
        .service
        .queue_operation(draft("update", "exam-results", None))
        .await
        .expect("enqueue");
    harness.connectivity.set_online(true);
    harness.service.process_sync_queue().await.expect("drain");

    let removed = harness
        .service
        .clear_failed_operations()
        .await
        .expect("clear failed");
    assert_eq!(removed, 1);

    let status = harness.service.sync_status().await.expect("status");
    assert_eq!(status.failed_operations, 0);
    assert_eq!(status.pending_operations, 0);
}

#[tokio::test]
async fn force_sync_offline_is_a_structured_failure() {
    let harness = setup().await;

    let result = harness.service.force_sync_all().await;
    assert!(matches!(result, Err(AppError::Offline)));
}

#[tokio::test]
async fn force_sync_drains_then_refreshes_known_collections() {
    let harness = setup().await;
    harness.gateway.set_fetch_size("attendance", 4);
    harness.gateway.set_fetch_size("exam-results", 2);

    harness
        .service
        .queue_operation(draft("create", "attendance", None))
        .await
        .expect("enqueue");
    harness
        .service
        .queue_operation(draft("update", "exam-results", None))
        .await
        .expect("enqueue");
    harness.connectivity.set_online(true);

    let report = harness.service.force_sync_all().await.expect("force sync");
    assert_eq!(report.drain.processed, 2);

    let mut refreshed: Vec<(String, u32)> = report
        .refreshed
        .iter()
        .map(|entry| (entry.collection.to_string(), entry.record_count))
        .collect();
    refreshed.sort();
    assert_eq!(
        refreshed,
        vec![
            ("attendance".to_string(), 4),
            ("exam-results".to_string(), 2)
        ]
    );

    let history = harness.store.refresh_history().await.expect("history");
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn connectivity_listener_drains_on_reconnect() {
    let harness = setup().await;
    let listener = harness.service.spawn_connectivity_listener();

    harness
        .service
        .queue_operation(draft("create", "attendance", None))
        .await
        .expect("enqueue");
    assert_eq!(
        harness.service.sync_status().await.unwrap().pending_operations,
        1
    );

    harness.connectivity.set_online(true);

    let mut drained = false;
    for _ in 0..40 {
        if harness.service.sync_status().await.unwrap().pending_operations == 0 {
            drained = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(drained, "listener did not drain after reconnect");
    assert_eq!(harness.gateway.delivered().len(), 1);

    listener.abort();
}

#[tokio::test]
async fn handler_facade_never_raises_across_the_boundary() {
    let harness = setup().await;
    let handler = SyncHandler::new(Arc::new(harness.service.clone()));

    let response = handler
        .queue_operation(QueueOperationRequest {
            operation: "create".to_string(),
            collection: "attendance".to_string(),
            payload: json!({ "present": true }),
            max_retries: None,
        })
        .await;
    assert!(response.success);
    let queued = response.data.expect("queued dto");
    assert_eq!(queued.collection, "attendance");
    assert_eq!(queued.status, "pending");

    let offline = handler.force_sync_all().await;
    assert!(!offline.success);
    assert_eq!(offline.error.as_deref(), Some("Device is offline"));
    assert_eq!(offline.error_code.as_deref(), Some("OFFLINE"));
    assert!(offline.timestamp > 0);

    harness.connectivity.set_online(true);
    let drained = handler.process_sync_queue().await;
    assert!(drained.success);
    let report = drained.data.expect("drain dto");
    assert_eq!(report.processed, 1);
    assert_eq!(report.outcome, "complete");

    let status = handler.sync_status().await;
    assert!(status.success);
    let status = status.data.expect("status dto");
    assert!(status.is_online);
    assert_eq!(status.pending_operations, 0);
}
