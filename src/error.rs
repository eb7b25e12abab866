//! Error types for the classification service
//!
//! Maps internal failures onto HTTP status codes and client-safe messages.

use crate::classifier::ClassifierError;
use crate::config::ConfigError;
use thiserror::Error;
use warp::http::StatusCode;

const MAX_CLIENT_MESSAGE_LEN: usize = 500;

/// Main error type for service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Batch of {size} tasks exceeds maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("Request body of {size} bytes exceeds maximum of {max}")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Classification failed: {0}")]
    Classification(#[from] ClassifierError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Create invalid request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create batch size error
    pub fn batch_too_large(size: usize, max: usize) -> Self {
        Self::BatchTooLarge { size, max }
    }

    /// Create request body size error
    pub fn payload_too_large(size: usize, max: usize) -> Self {
        Self::PayloadTooLarge { size, max }
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidRequest { .. } | ServiceError::BatchTooLarge { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServiceError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ServiceError::Classification(_) | ServiceError::Config(_) | ServiceError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the caller, not the service, is at fault
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Message suitable for an HTTP response body
    pub fn client_message(&self) -> String {
        truncate_message(&self.to_string())
    }
}

/// Cap a message at 500 bytes, cutting on a char boundary
fn truncate_message(message: &str) -> String {
    if message.len() <= MAX_CLIENT_MESSAGE_LEN {
        return message.to_string();
    }

    let suffix = "...[truncated]";
    let mut cut = MAX_CLIENT_MESSAGE_LEN - suffix.len();
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &message[..cut], suffix)
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
