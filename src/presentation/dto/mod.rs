pub mod sync;

use crate::shared::error::AppError;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Uniform result shape crossing the facade boundary. Callers check
/// `success` instead of handling errors; nothing throws past this point.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_code: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn from_app_error(error: AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.user_message()),
            error_code: Some(error.code().to_string()),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn from_result(result: crate::shared::Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_app_error(err),
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
