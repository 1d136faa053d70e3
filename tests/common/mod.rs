#![allow(dead_code)]

use async_trait::async_trait;
use maktab_sync::application::ports::RemoteGateway;
use maktab_sync::application::services::SyncService;
use maktab_sync::domain::entities::{QueueRecord, QueueRecordDraft};
use maktab_sync::domain::value_objects::{CollectionName, OperationKind, OperationPayload};
use maktab_sync::infrastructure::database::ConnectionPool;
use maktab_sync::infrastructure::network::WatchConnectivity;
use maktab_sync::infrastructure::queue::SqliteQueueStore;
use maktab_sync::shared::config::SyncConfig;
use maktab_sync::shared::error::AppError;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Gateway double with per-collection scripted outcomes.
pub struct ScriptedGateway {
    failing: Mutex<HashSet<String>>,
    delivered: Mutex<Vec<String>>,
    attempts: Mutex<HashMap<String, u32>>,
    fetch_sizes: Mutex<HashMap<String, u32>>,
    fetches: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            failing: Mutex::new(HashSet::new()),
            delivered: Mutex::new(Vec::new()),
            attempts: Mutex::new(HashMap::new()),
            fetch_sizes: Mutex::new(HashMap::new()),
            fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_collection(&self, name: &str) {
        self.failing.lock().unwrap().insert(name.to_string());
    }

    pub fn restore_collection(&self, name: &str) {
        self.failing.lock().unwrap().remove(name);
    }

    pub fn set_fetch_size(&self, name: &str, size: u32) {
        self.fetch_sizes
            .lock()
            .unwrap()
            .insert(name.to_string(), size);
    }

    /// Record ids in delivery order.
    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn attempts_for(&self, record_id: &str) -> u32 {
        self.attempts
            .lock()
            .unwrap()
            .get(record_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn fetched_collections(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteGateway for ScriptedGateway {
    async fn deliver(&self, record: &QueueRecord) -> Result<(), AppError> {
        *self
            .attempts
            .lock()
            .unwrap()
            .entry(record.id.to_string())
            .or_insert(0) += 1;

        if self
            .failing
            .lock()
            .unwrap()
            .contains(record.collection.as_str())
        {
            return Err(AppError::Network("endpoint rejected record".to_string()));
        }

        self.delivered.lock().unwrap().push(record.id.to_string());
        Ok(())
    }

    async fn fetch_collection(&self, collection: &CollectionName) -> Result<Vec<Value>, AppError> {
        self.fetches
            .lock()
            .unwrap()
            .push(collection.as_str().to_string());
        let size = self
            .fetch_sizes
            .lock()
            .unwrap()
            .get(collection.as_str())
            .copied()
            .unwrap_or(1);
        Ok((0..size).map(|i| json!({ "index": i })).collect())
    }
}

pub struct Harness {
    pub service: SyncService,
    pub gateway: Arc<ScriptedGateway>,
    pub store: Arc<SqliteQueueStore>,
    pub connectivity: WatchConnectivity,
    pub pool: ConnectionPool,
}

/// Engine over an in-memory database and scripted gateway, initially offline.
pub async fn setup() -> Harness {
    setup_with(SyncConfig::default()).await
}

pub async fn setup_with(config: SyncConfig) -> Harness {
    let pool = ConnectionPool::from_memory().await.expect("in-memory pool");
    pool.migrate().await.expect("apply migrations");

    let store = Arc::new(SqliteQueueStore::new(pool.get_pool().clone()));
    let gateway = Arc::new(ScriptedGateway::new());
    let connectivity = WatchConnectivity::offline();

    let service = SyncService::new(
        store.clone(),
        gateway.clone(),
        Arc::new(connectivity.clone()),
        config,
    );

    Harness {
        service,
        gateway,
        store,
        connectivity,
        pool,
    }
}

pub fn draft(operation: &str, collection: &str, max_retries: Option<u32>) -> QueueRecordDraft {
    QueueRecordDraft::new(
        OperationKind::parse(operation).expect("operation kind"),
        CollectionName::new(collection.into()).expect("collection name"),
        OperationPayload::new(json!({ "student": "s-102", "value": 1 })).expect("payload"),
        max_retries,
    )
}
