use crate::application::ports::queue_store::{PurgeFilter, QueueStore};
use crate::domain::entities::{CollectionRefresh, QueueCounts, QueueRecord, QueueRecordDraft};
use crate::domain::value_objects::{CollectionName, RecordId, RecordStatus};
use crate::infrastructure::queue::mappers::{record_from_row, refresh_from_row};
use crate::infrastructure::queue::rows::{CollectionRefreshRow, SyncQueueRow};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

pub struct SqliteQueueStore {
    pool: Pool<Sqlite>,
}

impl SqliteQueueStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueStore for SqliteQueueStore {
    async fn append(
        &self,
        draft: QueueRecordDraft,
        max_retries: u32,
    ) -> Result<QueueRecord, AppError> {
        let enqueued_at = Utc::now();
        let id = RecordId::generate(enqueued_at);
        let payload = serde_json::to_string(draft.payload.as_json())?;

        sqlx::query(
            r#"
            INSERT INTO sync_queue (
                record_id, operation, collection_name, payload,
                status, retry_count, max_retries, enqueued_at
            ) VALUES (?1, ?2, ?3, ?4, 'pending', 0, ?5, ?6)
            "#,
        )
        .bind(id.as_str())
        .bind(draft.operation.as_str())
        .bind(draft.collection.as_str())
        .bind(&payload)
        .bind(max_retries as i64)
        .bind(enqueued_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(QueueRecord::new(
            id,
            draft.operation,
            draft.collection,
            draft.payload,
            RecordStatus::Pending,
            0,
            max_retries,
            enqueued_at,
            None,
        ))
    }

    async fn load_all(&self) -> Result<Vec<QueueRecord>, AppError> {
        let rows = sqlx::query_as::<_, SyncQueueRow>("SELECT * FROM sync_queue ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let row_id = row.id;
            match record_from_row(row) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(row_id, "skipping corrupt sync queue row: {err}");
                }
            }
        }
        Ok(records)
    }

    async fn replace_all(&self, records: &[QueueRecord]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sync_queue")
            .execute(&mut *tx)
            .await?;

        for record in records {
            let payload = serde_json::to_string(record.payload.as_json())?;
            sqlx::query(
                r#"
                INSERT INTO sync_queue (
                    record_id, operation, collection_name, payload,
                    status, retry_count, max_retries, enqueued_at, last_error
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(record.id.as_str())
            .bind(record.operation.as_str())
            .bind(record.collection.as_str())
            .bind(&payload)
            .bind(record.status.as_str())
            .bind(record.retry_count as i64)
            .bind(record.max_retries as i64)
            .bind(record.enqueued_at.timestamp_millis())
            .bind(&record.last_error)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn reset_failed(&self) -> Result<u32, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE sync_queue
            SET retry_count = 0, status = 'pending', last_error = NULL
            WHERE status = 'failed'
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() as u32)
    }

    async fn purge(&self, filter: PurgeFilter) -> Result<u32, AppError> {
        let result = match filter {
            PurgeFilter::FailedOnly => {
                sqlx::query("DELETE FROM sync_queue WHERE status = 'failed'")
                    .execute(&self.pool)
                    .await?
            }
            PurgeFilter::All => {
                sqlx::query("DELETE FROM sync_queue")
                    .execute(&self.pool)
                    .await?
            }
        };

        Ok(result.rows_affected() as u32)
    }

    async fn counts(&self) -> Result<QueueCounts, AppError> {
        let (pending,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sync_queue WHERE status != 'failed'")
                .fetch_one(&self.pool)
                .await?;
        let (failed,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sync_queue WHERE status = 'failed'")
                .fetch_one(&self.pool)
                .await?;

        Ok(QueueCounts {
            pending: pending as u32,
            failed: failed as u32,
        })
    }

    async fn last_sync_at(&self) -> Result<Option<DateTime<Utc>>, AppError> {
        let row: Option<(Option<i64>,)> =
            sqlx::query_as("SELECT last_sync_at FROM sync_watermark WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;

        match row.and_then(|(value,)| value) {
            Some(millis) => {
                let at = DateTime::from_timestamp_millis(millis)
                    .ok_or_else(|| AppError::Storage(format!("Invalid sync watermark: {millis}")))?;
                Ok(Some(at))
            }
            None => Ok(None),
        }
    }

    async fn record_sync(&self, at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO sync_watermark (id, last_sync_at) VALUES (1, ?1)
            ON CONFLICT(id) DO UPDATE SET last_sync_at = excluded.last_sync_at
            "#,
        )
        .bind(at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn record_refresh(
        &self,
        collection: &CollectionName,
        record_count: u32,
        at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO collection_refresh (collection_name, refreshed_at, record_count)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(collection.as_str())
        .bind(at.timestamp_millis())
        .bind(record_count as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn refresh_history(&self) -> Result<Vec<CollectionRefresh>, AppError> {
        let rows = sqlx::query_as::<_, CollectionRefreshRow>(
            r#"
            SELECT
                collection_name,
                MAX(refreshed_at) AS refreshed_at,
                record_count
            FROM collection_refresh
            GROUP BY collection_name
            ORDER BY collection_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(refresh_from_row).collect()
    }
}
