use crate::domain::value_objects::CollectionName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping row left by a forced full resync: when a collection was
/// last re-fetched from the backend and how many records came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRefresh {
    pub collection: CollectionName,
    pub refreshed_at: DateTime<Utc>,
    pub record_count: u32,
}

impl CollectionRefresh {
    pub fn new(collection: CollectionName, refreshed_at: DateTime<Utc>, record_count: u32) -> Self {
        Self {
            collection,
            refreshed_at,
            record_count,
        }
    }
}
