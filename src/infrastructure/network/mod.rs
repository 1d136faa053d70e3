pub mod watch_monitor;

pub use watch_monitor::WatchConnectivity;
