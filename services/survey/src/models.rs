//! REST API models and request/response types

use demand_core::Submission;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::service::DemandReport;

/// Body of `POST /api/v1/submissions`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// Raw price as typed; truncated to a whole unit
    pub price: f64,
}

/// Answer to a successful submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Row the store wrote
    pub submission: Submission,
    /// Views recomputed after the write
    pub report: DemandReport,
}

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    pub data: Option<T>,
    /// Error details (if failed)
    pub error: Option<ErrorResponse>,
    /// Response timestamp
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    /// Create a successful API response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Create an error API response
    #[must_use]
    pub fn error(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Error payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Message suitable for the respondent
    pub message: String,
    /// Extra context, e.g. the violated bound
    pub details: Option<FxHashMap<String, String>>,
}

impl ErrorResponse {
    /// Error without details
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Attach one detail entry
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details
            .get_or_insert_with(FxHashMap::default)
            .insert(key.into(), value.into());
        self
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Store adapter in use
    pub store: String,
    /// Whether the store answered a read
    pub store_healthy: bool,
    /// Service version
    pub version: String,
    /// Seconds since startup
    pub uptime_seconds: u64,
}
