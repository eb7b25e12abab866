//! Request and response bodies for the HTTP API
//!
//! Bodies are decoded from raw bytes here rather than through warp's JSON
//! filter so that every malformed request maps to the same 422 response.

use crate::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Request to classify one coding task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Description of the coding task
    pub task_description: String,
    /// Additional context for classification
    #[serde(default)]
    pub context: Option<HashMap<String, String>>,
    /// File paths that will be changed
    #[serde(default)]
    pub files_changed: Option<Vec<String>>,
}

impl ClassificationRequest {
    pub fn new<S: Into<String>>(task_description: S) -> Self {
        Self {
            task_description: task_description.into(),
            context: None,
            files_changed: None,
        }
    }

    /// Reject descriptions that are empty or only whitespace
    pub fn validate(&self) -> ServiceResult<()> {
        if self.task_description.trim().is_empty() {
            return Err(ServiceError::invalid_request(
                "task_description must not be empty",
            ));
        }
        Ok(())
    }
}

/// Decode and validate a single classification request
pub fn parse_request(body: &[u8]) -> ServiceResult<ClassificationRequest> {
    let request: ClassificationRequest = serde_json::from_slice(body)
        .map_err(|e| ServiceError::invalid_request(format!("malformed request body: {e}")))?;
    request.validate()?;
    Ok(request)
}

/// Decode and validate a batch, enforcing the size limit
pub fn parse_batch(body: &[u8], max_items: usize) -> ServiceResult<Vec<ClassificationRequest>> {
    let requests: Vec<ClassificationRequest> = serde_json::from_slice(body)
        .map_err(|e| ServiceError::invalid_request(format!("malformed batch body: {e}")))?;

    if requests.len() > max_items {
        return Err(ServiceError::batch_too_large(requests.len(), max_items));
    }

    for (index, request) in requests.iter().enumerate() {
        request.validate().map_err(|e| match e {
            ServiceError::InvalidRequest { message } => {
                ServiceError::invalid_request(format!("item {index}: {message}"))
            }
            other => other,
        })?;
    }

    Ok(requests)
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: u64,
    pub uptime_seconds: u64,
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub service: String,
    pub version: String,
    pub status: String,
    pub description: String,
    pub endpoints: BTreeMap<String, String>,
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: u64,
}
