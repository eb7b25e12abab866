//! Request handling logic behind the HTTP routes
//!
//! Keeps validation, classification, logging and metrics independent of warp
//! so the behavior can be exercised directly.

use super::schema::{parse_batch, parse_request, ClassificationRequest};
use crate::classifier::{ClassificationResult, Classifier};
use crate::classify_span;
use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::observability::metrics::metrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Human-readable service name reported by the status endpoints
pub const SERVICE_NAME: &str = "ML Classifier";
/// Service version reported by the status endpoints
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVICE_DESCRIPTION: &str = "Task classification service using heuristic keyword matching";

const LOG_PREVIEW_CHARS: usize = 50;

/// Classification service shared by all request handlers
pub struct ClassificationService {
    classifier: Arc<dyn Classifier>,
    config: ServiceConfig,
}

impl ClassificationService {
    pub fn new(classifier: Arc<dyn Classifier>, config: ServiceConfig) -> Self {
        Self { classifier, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Decode, validate and classify a single request body
    pub fn classify_body(&self, body: &[u8]) -> ServiceResult<ClassificationResult> {
        metrics().request_received(false);
        self.check_body_size(body)?;

        let request = parse_request(body).map_err(|e| {
            warn!("Rejected classification request: {}", e);
            metrics().request_rejected();
            e
        })?;

        self.classify_request(&request)
    }

    /// Classify an already validated request
    pub fn classify_request(
        &self,
        request: &ClassificationRequest,
    ) -> ServiceResult<ClassificationResult> {
        let span = classify_span!(classifier = self.classifier.name());
        let _enter = span.enter();

        info!(
            "Classifying task: {}...",
            preview(&request.task_description, LOG_PREVIEW_CHARS)
        );
        log_request_extras(request);

        let started = Instant::now();
        let result = self
            .classifier
            .classify(&request.task_description)
            .map_err(|e| {
                error!("Classification failed: {}", e);
                metrics().classification_failed();
                e
            })?;
        metrics().classification_completed(&result, started.elapsed());

        info!(
            "Classification complete: type={}, complexity={}, confidence={:.2}",
            result.task_type, result.complexity, result.confidence
        );

        Ok(result)
    }

    /// Decode, validate and classify a batch body, preserving input order
    pub fn classify_batch_body(&self, body: &[u8]) -> ServiceResult<Vec<ClassificationResult>> {
        metrics().request_received(true);
        self.check_body_size(body)?;

        let requests = parse_batch(body, self.config.batch.max_items).map_err(|e| {
            warn!("Rejected batch classification request: {}", e);
            metrics().request_rejected();
            e
        })?;

        self.classify_requests(&requests)
    }

    /// Enforce `server.max_body_bytes` on the received body, chunked or not
    fn check_body_size(&self, body: &[u8]) -> ServiceResult<()> {
        let max = self.config.server.max_body_bytes as usize;
        if body.len() > max {
            warn!("Rejected request body of {} bytes (max {})", body.len(), max);
            metrics().request_rejected();
            return Err(ServiceError::payload_too_large(body.len(), max));
        }
        Ok(())
    }

    /// Classify validated requests one after another
    pub fn classify_requests(
        &self,
        requests: &[ClassificationRequest],
    ) -> ServiceResult<Vec<ClassificationResult>> {
        info!("Batch classifying {} tasks...", requests.len());

        let results = requests
            .iter()
            .map(|request| self.classify_request(request))
            .collect::<ServiceResult<Vec<_>>>()
            .map_err(|e| {
                error!("Batch classification failed: {}", e);
                e
            })?;

        info!(
            "Batch classification complete: {} tasks processed",
            results.len()
        );
        Ok(results)
    }
}

fn log_request_extras(request: &ClassificationRequest) {
    if let Some(context) = &request.context {
        debug!(context_keys = context.len(), "request context supplied");
    }
    if let Some(files) = &request.files_changed {
        debug!(files_changed = files.len(), "changed files supplied");
    }
}

/// First `max_chars` characters of `text`
fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
