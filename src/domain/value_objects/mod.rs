pub mod collection_name;
pub mod operation_kind;
pub mod operation_payload;
pub mod record_id;
pub mod record_status;

pub use collection_name::CollectionName;
pub use operation_kind::OperationKind;
pub use operation_payload::OperationPayload;
pub use record_id::RecordId;
pub use record_status::RecordStatus;
