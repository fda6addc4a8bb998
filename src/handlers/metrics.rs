use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, instrument};

use super::error_body;
use crate::observability::{Metrics, MetricsError};

/// Prometheus text exposition of the HTTP and cart counters
#[instrument(name = "metrics_handler", skip(metrics))]
pub async fn metrics_handler(
    State(metrics): State<Arc<Metrics>>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let body = metrics.encode().map_err(metrics_error_response)?;

    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static(prometheus::TEXT_FORMAT))],
        body,
    )
        .into_response())
}

fn metrics_error_response(err: MetricsError) -> (StatusCode, Json<Value>) {
    error!(error = %err, "Failed to encode metrics");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error_body("Failed to encode metrics")),
    )
}
