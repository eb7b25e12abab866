//! HTTP server exposing the classification service
//!
//! Routes:
//! - `POST /classify` - classify one task
//! - `POST /classify/batch` - classify a list of tasks, order preserved
//! - `GET /health` - liveness and service identity
//! - `GET /metrics` - classification counters
//! - `GET /` - service metadata and endpoint listing

use super::schema::{ErrorResponse, HealthResponse, ServiceInfoResponse};
use super::service::{ClassificationService, SERVICE_DESCRIPTION, SERVICE_NAME, SERVICE_VERSION};
use crate::error::{ServiceError, ServiceResult};
use crate::observability::metrics::{current_timestamp, metrics};
use crate::request_span;
use bytes::Bytes;
use serde::Serialize;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

/// Build the complete route tree for a service
pub fn routes(
    service: Arc<ClassificationService>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let classify_route = warp::path("classify")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::bytes())
        .and(with_service(service.clone()))
        .and_then(handle_classify);

    let batch_route = warp::path!("classify" / "batch")
        .and(warp::post())
        .and(warp::body::bytes())
        .and(with_service(service.clone()))
        .and_then(handle_classify_batch);

    let health_route = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handle_health);

    let metrics_route = warp::path("metrics")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handle_metrics);

    let root_route = warp::path::end()
        .and(warp::get())
        .and(with_service(service))
        .and_then(handle_root);

    classify_route
        .or(batch_route)
        .or(health_route)
        .or(metrics_route)
        .or(root_route)
        .with(
            warp::cors()
                .allow_any_origin()
                .allow_methods(vec!["GET", "POST"])
                .allow_headers(vec!["content-type"]),
        )
}

/// Serve `routes` until `shutdown` resolves
pub async fn serve<F>(service: Arc<ClassificationService>, shutdown: F) -> ServiceResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = service.config().bind_addr()?;
    let (bound, server) = warp::serve(routes(service))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|e| {
            ServiceError::Io(std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("failed to bind {addr}: {e}"),
            ))
        })?;

    tracing::info!("Classification server listening on {}", bound);
    server.await;
    tracing::info!("Classification server stopped");

    Ok(())
}

fn with_service(
    service: Arc<ClassificationService>,
) -> impl Filter<Extract = (Arc<ClassificationService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

async fn handle_classify(
    body: Bytes,
    service: Arc<ClassificationService>,
) -> Result<warp::reply::WithStatus<warp::reply::Json>, Infallible> {
    let span = request_span!(route = "/classify", bytes = body.len());

    Ok(span.in_scope(|| match service.classify_body(&body) {
        Ok(result) => json_reply(&result, StatusCode::OK),
        Err(e) => error_reply(&e),
    }))
}

async fn handle_classify_batch(
    body: Bytes,
    service: Arc<ClassificationService>,
) -> Result<warp::reply::WithStatus<warp::reply::Json>, Infallible> {
    let span = request_span!(route = "/classify/batch", bytes = body.len());

    Ok(span.in_scope(|| match service.classify_batch_body(&body) {
        Ok(results) => json_reply(&results, StatusCode::OK),
        Err(ServiceError::Classification(e)) => {
            let response = ErrorResponse {
                error: format!("Batch classification failed: {e}"),
                timestamp: current_timestamp(),
            };
            json_reply(&response, StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => error_reply(&e),
    }))
}

async fn handle_health() -> Result<warp::reply::Json, Infallible> {
    Ok(warp::reply::json(&health_response()))
}

async fn handle_metrics() -> Result<warp::reply::Json, Infallible> {
    Ok(warp::reply::json(&metrics().get_metrics()))
}

async fn handle_root(service: Arc<ClassificationService>) -> Result<warp::reply::Json, Infallible> {
    Ok(warp::reply::json(&service_info(service.classifier_name())))
}

/// Liveness payload; independent of classifier state
pub fn health_response() -> HealthResponse {
    HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        timestamp: current_timestamp(),
        uptime_seconds: metrics().uptime_seconds(),
    }
}

fn service_info(classifier: &str) -> ServiceInfoResponse {
    let mut endpoints = BTreeMap::new();
    endpoints.insert(
        "POST /classify".to_string(),
        format!("Classify a single task ({classifier} classifier)"),
    );
    endpoints.insert(
        "POST /classify/batch".to_string(),
        "Classify a list of tasks, preserving order".to_string(),
    );
    endpoints.insert(
        "GET /health".to_string(),
        "Service liveness and version".to_string(),
    );
    endpoints.insert(
        "GET /metrics".to_string(),
        "Classification counters".to_string(),
    );

    ServiceInfoResponse {
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        status: "running".to_string(),
        description: SERVICE_DESCRIPTION.to_string(),
        endpoints,
    }
}

fn json_reply<T: Serialize>(
    body: &T,
    status: StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(body), status)
}

fn error_reply(error: &ServiceError) -> warp::reply::WithStatus<warp::reply::Json> {
    let response = ErrorResponse {
        error: error.client_message(),
        timestamp: current_timestamp(),
    };
    json_reply(&response, error.status_code())
}
