pub mod collection_refresh;
pub mod commands;
pub mod drain_report;
pub mod queue_record;
pub mod sync_snapshot;

pub use collection_refresh::CollectionRefresh;
pub use commands::QueueRecordDraft;
pub use drain_report::{DrainOutcome, DrainReport, ForceSyncReport, RetryReport};
pub use queue_record::QueueRecord;
pub use sync_snapshot::{QueueCounts, SyncSnapshot};
