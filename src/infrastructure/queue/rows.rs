use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct SyncQueueRow {
    pub id: i64,
    pub record_id: String,
    pub operation: String,
    pub collection_name: String,
    pub payload: String,
    pub status: String,
    pub retry_count: i64,
    pub max_retries: i64,
    pub enqueued_at: i64,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CollectionRefreshRow {
    pub collection_name: String,
    pub refreshed_at: i64,
    pub record_count: i64,
}
