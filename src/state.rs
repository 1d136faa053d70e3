use crate::application::services::{SyncService, SyncServiceTrait};
use crate::infrastructure::database::ConnectionPool;
use crate::infrastructure::network::WatchConnectivity;
use crate::infrastructure::queue::SqliteQueueStore;
use crate::infrastructure::remote::HttpRemoteGateway;
use crate::presentation::handlers::SyncHandler;
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Fully wired engine for the portal shell: connection pool, sqlite queue
/// store, HTTP gateway, connectivity monitor and driver, plus the facade.
/// The engine starts offline; the shell reports reachability changes
/// through `set_online`.
pub struct SyncEngine {
    pub config: AppConfig,
    pub pool: ConnectionPool,
    pub connectivity: WatchConnectivity,
    pub service: Arc<SyncService>,
    pub handler: SyncHandler,
}

impl SyncEngine {
    pub async fn bootstrap(config: AppConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::Configuration)?;

        let pool = ConnectionPool::connect(&config.database).await?;
        pool.migrate().await?;

        let store = Arc::new(SqliteQueueStore::new(pool.get_pool().clone()));
        let gateway = Arc::new(HttpRemoteGateway::new(&config.remote)?);
        let connectivity = WatchConnectivity::offline();

        let service = Arc::new(SyncService::new(
            store,
            gateway,
            Arc::new(connectivity.clone()),
            config.sync.clone(),
        ));
        service.spawn_connectivity_listener();
        service.schedule_drains();

        let handler = SyncHandler::new(service.clone() as Arc<dyn SyncServiceTrait>);

        Ok(Self {
            config,
            pool,
            connectivity,
            service,
            handler,
        })
    }

    pub fn set_online(&self, online: bool) {
        self.connectivity.set_online(online);
    }

    pub async fn shutdown(&self) {
        self.pool.close().await;
    }
}
