use crate::application::ports::{ConnectivityMonitor, PurgeFilter, QueueStore, RemoteGateway};
use crate::domain::entities::{
    CollectionRefresh, DrainReport, ForceSyncReport, QueueRecord, QueueRecordDraft, RetryReport,
    SyncSnapshot,
};
use crate::domain::value_objects::CollectionName;
use crate::shared::config::SyncConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

#[async_trait]
pub trait SyncServiceTrait: Send + Sync {
    /// Enqueue one mutation. Opportunistically triggers a drain when online.
    async fn queue_operation(&self, draft: QueueRecordDraft) -> Result<QueueRecord, AppError>;
    /// Manual drain trigger; a no-op while a drain is already in progress.
    async fn process_sync_queue(&self) -> Result<DrainReport, AppError>;
    /// Drain the local queue, then re-fetch known collections from the
    /// backend. Fails with `AppError::Offline` when unreachable.
    async fn force_sync_all(&self) -> Result<ForceSyncReport, AppError>;
    async fn sync_status(&self) -> Result<SyncSnapshot, AppError>;
    /// Reset terminal-failed records' budgets and, when online, drain again
    /// within the same call.
    async fn retry_failed_operations(&self) -> Result<RetryReport, AppError>;
    /// Drop terminal-failed records; returns how many were removed.
    async fn clear_failed_operations(&self) -> Result<u32, AppError>;
}

pub struct SyncService {
    store: Arc<dyn QueueStore>,
    gateway: Arc<dyn RemoteGateway>,
    connectivity: Arc<dyn ConnectivityMonitor>,
    config: SyncConfig,
    syncing: Arc<RwLock<bool>>,
}

impl SyncService {
    pub fn new(
        store: Arc<dyn QueueStore>,
        gateway: Arc<dyn RemoteGateway>,
        connectivity: Arc<dyn ConnectivityMonitor>,
        config: SyncConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            connectivity,
            config,
            syncing: Arc::new(RwLock::new(false)),
        }
    }

    /// One drain pass. The `syncing` flag makes overlapping requests no-ops:
    /// the store is read once at cycle start and written once at cycle end,
    /// never by two drains at once.
    pub async fn drain(&self) -> Result<DrainReport, AppError> {
        {
            let mut syncing = self.syncing.write().await;
            if *syncing {
                return Ok(DrainReport::idle());
            }
            *syncing = true;
        }

        let report = self.drain_cycle().await;
        *self.syncing.write().await = false;
        Ok(report)
    }

    async fn drain_cycle(&self) -> DrainReport {
        if !self.connectivity.is_online().await {
            tracing::debug!("drain skipped: device is offline");
            return DrainReport::offline();
        }

        let snapshot = match self.store.load_all().await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!("failed to load sync queue: {err}");
                return DrainReport::idle();
            }
        };

        let pending_total = snapshot.iter().filter(|r| !r.is_terminal()).count();
        if pending_total == 0 {
            return DrainReport::idle();
        }

        let batch_limit = self.config.batch_size as usize;
        if pending_total > batch_limit {
            tracing::info!(
                pending = pending_total,
                batch_size = batch_limit,
                "queue exceeds batch size; remainder deferred to next cycle"
            );
        }

        let mut survivors = Vec::with_capacity(snapshot.len());
        let mut processed = 0u32;
        let mut newly_failed = 0u32;
        let mut retried = 0u32;
        let mut attempted = 0usize;

        for mut record in snapshot {
            if record.is_terminal() {
                survivors.push(record);
                continue;
            }
            if attempted >= batch_limit {
                retried += 1;
                survivors.push(record);
                continue;
            }
            attempted += 1;
            match self.gateway.deliver(&record).await {
                Ok(()) => {
                    processed += 1;
                    tracing::debug!(
                        record_id = %record.id,
                        collection = %record.collection,
                        "record delivered"
                    );
                }
                Err(err) => {
                    record.register_failure(err.to_string());
                    if record.is_terminal() {
                        newly_failed += 1;
                        tracing::warn!(
                            record_id = %record.id,
                            retries = record.retry_count,
                            "record exhausted its retry budget: {err}"
                        );
                    } else {
                        retried += 1;
                    }
                    survivors.push(record);
                }
            }
        }

        self.apply_retention(&mut survivors);

        if let Err(err) = self.store.replace_all(&survivors).await {
            // Next cycle replays this snapshot; delivery is idempotent.
            tracing::error!("failed to persist sync queue after drain: {err}");
        }

        if processed > 0 {
            if let Err(err) = self.store.record_sync(Utc::now()).await {
                tracing::error!("failed to record sync watermark: {err}");
            }
        }

        let report = DrainReport::from_counts(processed, newly_failed, retried);
        tracing::info!(
            processed,
            failed = newly_failed,
            retried,
            outcome = %report.outcome,
            "drain cycle finished"
        );
        report
    }

    fn apply_retention(&self, records: &mut Vec<QueueRecord>) {
        let cap = self.config.failed_retention as usize;
        if cap == 0 {
            return;
        }
        let failed_total = records.iter().filter(|r| r.is_terminal()).count();
        if failed_total <= cap {
            return;
        }
        // Records are in insertion order, so the first matches are oldest.
        let mut to_drop = failed_total - cap;
        records.retain(|record| {
            if to_drop > 0 && record.is_terminal() {
                to_drop -= 1;
                return false;
            }
            true
        });
        tracing::warn!(
            dropped = failed_total - cap,
            retained = cap,
            "pruned oldest failed records beyond retention cap"
        );
    }

    /// Re-drain whenever the host reports an offline→online edge.
    pub fn spawn_connectivity_listener(&self) -> tokio::task::JoinHandle<()> {
        let service = self.clone();
        let mut rx = self.connectivity.subscribe();
        tokio::spawn(async move {
            let mut was_online = *rx.borrow();
            while rx.changed().await.is_ok() {
                let online = *rx.borrow();
                if online && !was_online {
                    tracing::info!("connectivity restored; draining sync queue");
                    if let Err(err) = service.drain().await {
                        tracing::error!("reconnect drain failed: {err}");
                    }
                } else if !online && was_online {
                    tracing::info!("connectivity lost; drains paused");
                }
                was_online = online;
            }
        })
    }

    /// Periodic drain loop, gated by `SyncConfig::auto_sync`.
    pub fn schedule_drains(&self) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.auto_sync {
            return None;
        }
        let service = self.clone();
        let period = std::time::Duration::from_secs(self.config.sync_interval);
        Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(err) = service.drain().await {
                    tracing::error!("scheduled drain failed: {err}");
                }
            }
        }))
    }
}

#[async_trait]
impl SyncServiceTrait for SyncService {
    async fn queue_operation(&self, draft: QueueRecordDraft) -> Result<QueueRecord, AppError> {
        let max_retries = draft.max_retries.unwrap_or(self.config.max_retries).max(1);
        let record = self.store.append(draft, max_retries).await?;
        tracing::debug!(
            record_id = %record.id,
            collection = %record.collection,
            "operation queued"
        );

        if self.connectivity.is_online().await {
            let service = self.clone();
            tokio::spawn(async move {
                if let Err(err) = service.drain().await {
                    tracing::error!("opportunistic drain failed: {err}");
                }
            });
        }

        Ok(record)
    }

    async fn process_sync_queue(&self) -> Result<DrainReport, AppError> {
        self.drain().await
    }

    async fn force_sync_all(&self) -> Result<ForceSyncReport, AppError> {
        if !self.connectivity.is_online().await {
            return Err(AppError::Offline);
        }

        // Snapshot the interesting collections before draining empties the
        // queue: everything currently queued plus everything seen before.
        let mut collections: Vec<CollectionName> = Vec::new();
        for record in self.store.load_all().await? {
            if !collections.contains(&record.collection) {
                collections.push(record.collection);
            }
        }
        for refresh in self.store.refresh_history().await? {
            if !collections.contains(&refresh.collection) {
                collections.push(refresh.collection);
            }
        }

        let drain = self.drain().await?;

        let mut refreshed = Vec::with_capacity(collections.len());
        for collection in collections {
            match self.gateway.fetch_collection(&collection).await {
                Ok(items) => {
                    let now = Utc::now();
                    let count = items.len() as u32;
                    if let Err(err) = self.store.record_refresh(&collection, count, now).await {
                        tracing::error!(collection = %collection, "failed to record refresh: {err}");
                    }
                    refreshed.push(CollectionRefresh::new(collection, now, count));
                }
                Err(err) => {
                    tracing::warn!(collection = %collection, "collection refresh failed: {err}");
                }
            }
        }

        Ok(ForceSyncReport { drain, refreshed })
    }

    async fn sync_status(&self) -> Result<SyncSnapshot, AppError> {
        let is_online = self.connectivity.is_online().await;
        let is_syncing = *self.syncing.read().await;
        let counts = self.store.counts().await?;
        let last_sync_at = self.store.last_sync_at().await?;

        Ok(SyncSnapshot {
            is_online,
            is_syncing,
            last_sync_at,
            pending_operations: counts.pending,
            failed_operations: counts.failed,
        })
    }

    async fn retry_failed_operations(&self) -> Result<RetryReport, AppError> {
        let reset = self.store.reset_failed().await?;
        if reset > 0 {
            tracing::info!(reset, "failed operations re-admitted to the queue");
        }

        let drain = if self.connectivity.is_online().await {
            Some(self.drain().await?)
        } else {
            None
        };

        Ok(RetryReport { reset, drain })
    }

    async fn clear_failed_operations(&self) -> Result<u32, AppError> {
        let removed = self.store.purge(PurgeFilter::FailedOnly).await?;
        if removed > 0 {
            tracing::info!(removed, "cleared failed operations from the queue");
        }
        Ok(removed)
    }
}

impl Clone for SyncService {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            gateway: self.gateway.clone(),
            connectivity: self.connectivity.clone(),
            config: self.config.clone(),
            syncing: self.syncing.clone(),
        }
    }
}
