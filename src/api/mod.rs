//! HTTP boundary for the classifier
//!
//! Validates requests, invokes the shared [`Classifier`](crate::classifier::Classifier)
//! and maps outcomes onto HTTP responses.

pub mod schema;
pub mod server;
pub mod service;

pub use schema::{ClassificationRequest, ErrorResponse, HealthResponse, ServiceInfoResponse};
pub use server::{routes, serve};
pub use service::{ClassificationService, SERVICE_NAME, SERVICE_VERSION};
