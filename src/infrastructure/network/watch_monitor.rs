use crate::application::ports::connectivity::ConnectivityMonitor;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

/// Connectivity monitor backed by a watch channel. The host shell feeds it
/// from the platform reachability signal via `set_online`; the driver
/// observes the current value and subscribes to edges.
#[derive(Clone)]
pub struct WatchConnectivity {
    sender: Arc<watch::Sender<bool>>,
}

impl WatchConnectivity {
    pub fn new(initially_online: bool) -> Self {
        let (sender, _receiver) = watch::channel(initially_online);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn online() -> Self {
        Self::new(true)
    }

    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_online(&self, online: bool) {
        self.sender.send_replace(online);
    }
}

#[async_trait]
impl ConnectivityMonitor for WatchConnectivity {
    async fn is_online(&self) -> bool {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}
