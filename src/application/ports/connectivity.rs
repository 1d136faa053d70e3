use async_trait::async_trait;
use tokio::sync::watch;

/// Host-reported network reachability. The driver treats an offline→online
/// edge on the subscription as an invitation to drain.
#[async_trait]
pub trait ConnectivityMonitor: Send + Sync {
    async fn is_online(&self) -> bool;

    fn subscribe(&self) -> watch::Receiver<bool>;
}
