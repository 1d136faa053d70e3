use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub auto_sync: bool,
    pub sync_interval: u64,
    pub max_retries: u32,
    pub batch_size: u32,
    /// Upper bound on retained terminal-failed records; 0 disables pruning.
    pub failed_retention: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub request_timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite:data/maktab.db".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            sync: SyncConfig::default(),
            remote: RemoteConfig {
                base_url: "https://portal.maktab.example".to_string(),
                request_timeout: 30,
            },
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            auto_sync: true,
            sync_interval: 300, // 5 minutes
            max_retries: 3,
            batch_size: 100,
            failed_retention: 200,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("MAKTAB_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.database.url = v;
            }
        }
        if let Ok(v) = std::env::var("MAKTAB_DB_MAX_CONNECTIONS") {
            if let Some(value) = parse_u32(&v) {
                cfg.database.max_connections = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("MAKTAB_DB_CONNECTION_TIMEOUT") {
            if let Some(value) = parse_u64(&v) {
                cfg.database.connection_timeout = value.max(1);
            }
        }

        if let Ok(v) = std::env::var("MAKTAB_AUTO_SYNC") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Ok(v) = std::env::var("MAKTAB_SYNC_INTERVAL") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.sync_interval = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("MAKTAB_MAX_RETRIES") {
            if let Some(value) = parse_u32(&v) {
                cfg.sync.max_retries = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("MAKTAB_BATCH_SIZE") {
            if let Some(value) = parse_u32(&v) {
                cfg.sync.batch_size = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("MAKTAB_FAILED_RETENTION") {
            if let Some(value) = parse_u32(&v) {
                cfg.sync.failed_retention = value;
            }
        }

        if let Ok(v) = std::env::var("MAKTAB_REMOTE_BASE_URL") {
            if !v.trim().is_empty() {
                cfg.remote.base_url = v;
            }
        }
        if let Ok(v) = std::env::var("MAKTAB_REQUEST_TIMEOUT") {
            if let Some(value) = parse_u64(&v) {
                cfg.remote.request_timeout = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.trim().is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.sync.max_retries == 0 {
            return Err("Sync max_retries must be greater than 0".to_string());
        }
        if self.sync.batch_size == 0 {
            return Err("Sync batch_size must be greater than 0".to_string());
        }
        if self.sync.auto_sync && self.sync.sync_interval == 0 {
            return Err("Sync sync_interval must be greater than 0".to_string());
        }
        if self.remote.base_url.trim().is_empty() {
            return Err("Remote base_url must not be empty".to_string());
        }
        if self.remote.request_timeout == 0 {
            return Err("Remote request_timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}
