pub mod entities;
pub mod value_objects;

pub use entities::{
    CollectionRefresh, DrainOutcome, DrainReport, ForceSyncReport, QueueCounts, QueueRecord,
    QueueRecordDraft, RetryReport, SyncSnapshot,
};
pub use value_objects::{CollectionName, OperationKind, OperationPayload, RecordId, RecordStatus};
