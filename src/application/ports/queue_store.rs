use crate::domain::entities::{CollectionRefresh, QueueCounts, QueueRecord, QueueRecordDraft};
use crate::domain::value_objects::CollectionName;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Which records a purge removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeFilter {
    FailedOnly,
    All,
}

/// Durable, ordered persistence of queue records. The store is read once at
/// drain-cycle start and rewritten once at cycle end; it is never subject to
/// partial writes from two concurrent drains.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Insert one record at the tail of the queue.
    async fn append(&self, draft: QueueRecordDraft, max_retries: u32)
        -> Result<QueueRecord, AppError>;

    /// Full queue in insertion order. Corrupt rows are skipped, not fatal.
    async fn load_all(&self) -> Result<Vec<QueueRecord>, AppError>;

    /// Transactionally replace the entire stored queue.
    async fn replace_all(&self, records: &[QueueRecord]) -> Result<(), AppError>;

    /// Re-admit every terminal-failed record; returns how many were reset.
    async fn reset_failed(&self) -> Result<u32, AppError>;

    /// Remove failed records, or everything, on forced reset.
    async fn purge(&self, filter: PurgeFilter) -> Result<u32, AppError>;

    async fn counts(&self) -> Result<QueueCounts, AppError>;

    async fn last_sync_at(&self) -> Result<Option<DateTime<Utc>>, AppError>;

    async fn record_sync(&self, at: DateTime<Utc>) -> Result<(), AppError>;

    async fn record_refresh(
        &self,
        collection: &CollectionName,
        record_count: u32,
        at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Latest refresh per collection.
    async fn refresh_history(&self) -> Result<Vec<CollectionRefresh>, AppError>;
}
