pub mod dto;
pub mod handlers;

pub use dto::ApiResponse;
pub use handlers::SyncHandler;
