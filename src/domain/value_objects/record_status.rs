use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Pending,
    Failed,
    Unknown(String),
}

impl RecordStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Failed => "failed",
            RecordStatus::Unknown(value) => value.as_str(),
        }
    }

    /// Terminal records have exhausted their retry budget and are excluded
    /// from automatic drains.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordStatus::Failed)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for RecordStatus {
    fn from(value: &str) -> Self {
        match value {
            "pending" => RecordStatus::Pending,
            "failed" => RecordStatus::Failed,
            other => RecordStatus::Unknown(other.to_string()),
        }
    }
}
