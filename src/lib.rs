pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;
mod state;

pub use application::services::{SyncService, SyncServiceTrait};
pub use domain::entities::{
    DrainOutcome, DrainReport, ForceSyncReport, QueueRecord, QueueRecordDraft, RetryReport,
    SyncSnapshot,
};
pub use domain::value_objects::{CollectionName, OperationKind, OperationPayload, RecordId};
pub use presentation::{ApiResponse, SyncHandler};
pub use shared::{AppConfig, AppError, Result};
pub use state::SyncEngine;

pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maktab_sync=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
