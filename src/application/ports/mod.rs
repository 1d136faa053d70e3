pub mod connectivity;
pub mod queue_store;
pub mod remote_gateway;

pub use connectivity::ConnectivityMonitor;
pub use queue_store::{PurgeFilter, QueueStore};
pub use remote_gateway::RemoteGateway;
