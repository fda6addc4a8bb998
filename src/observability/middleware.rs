use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::{sync::Arc, time::Instant};
use tracing::{error, info, instrument, warn, Instrument};
use uuid::Uuid;

use super::{get_current_trace_id, Metrics};

/// Middleware for request tracing and HTTP metrics collection
pub async fn observability_middleware(metrics: Arc<Metrics>, request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();

    // Group by route template when the router matched one
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched_path| matched_path.as_str().to_string())
        .unwrap_or_else(|| uri.clone());

    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let span_name = format!("{} {}", method, endpoint);
    let span = tracing::info_span!(
        target: "ecommerce_cart::http",
        "request",
        otel.name = %span_name,
        otel.kind = "server",
        request_id = %Uuid::new_v4(),
        http.method = %method,
        http.route = %endpoint,
        http.url = %uri,
        http.user_agent = %user_agent,
        http.status_code = tracing::field::Empty,
    );

    async {
        metrics.increment_in_flight(&method, &endpoint);
        let trace_id = get_current_trace_id().unwrap_or_default();

        info!(trace_id = %trace_id, "Processing request");

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let status_code = response.status().as_u16();
        tracing::Span::current().record("http.status_code", status_code);

        metrics.record_http_request(&method, &endpoint, status_code, duration.as_secs_f64());
        metrics.decrement_in_flight(&method, &endpoint);

        let duration_ms = duration.as_millis();
        if status_code >= 500 {
            error!(trace_id = %trace_id, status_code, duration_ms, "Request failed");
        } else if status_code >= 400 {
            warn!(trace_id = %trace_id, status_code, duration_ms, "Request rejected");
        } else {
            info!(trace_id = %trace_id, status_code, duration_ms, "Request completed successfully");
        }

        response
    }
    .instrument(span)
    .await
}

/// Records timing and outcome metrics around cart operations
#[derive(Clone)]
pub struct CartOperationTracer {
    metrics: Arc<Metrics>,
}

impl CartOperationTracer {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }

    /// Trace a cart operation, counting it as success or error
    #[instrument(skip_all, fields(operation = %operation, username = %username))]
    pub async fn trace<F, T, E>(&self, operation: &str, username: &str, copies: usize, future: F) -> Result<T, E>
    where
        F: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let start_time = Instant::now();

        match future.await {
            Ok(result) => {
                self.metrics.record_cart_operation(operation, true, copies);
                info!(
                    duration_ms = start_time.elapsed().as_millis(),
                    "Cart operation completed successfully"
                );
                Ok(result)
            }
            Err(error) => {
                self.metrics.record_cart_operation(operation, false, copies);
                warn!(
                    error = %error,
                    duration_ms = start_time.elapsed().as_millis(),
                    "Cart operation failed"
                );
                Err(error)
            }
        }
    }
}
