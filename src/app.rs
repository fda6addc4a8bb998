use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use std::{future::Future, io, sync::Arc};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};
use tracing::{error, info};

use crate::config::{ServerConfig, StoreConfig};
use crate::handlers::{
    create_cart_router, health_check, metrics_handler, request_validation_middleware,
    security_headers_middleware, CartHandlerState,
};
use crate::models::RepositoryResult;
use crate::observability::{observability_middleware, CartOperationTracer, Metrics};
use crate::repositories::InMemoryStore;
use crate::services::CartService;

/// Password given to users registered through `ECOMMERCE_DEMO_USERS`
pub const DEMO_PASSWORD: &str = "changeme";

/// Build the store described by `config`, registering any demo users
pub async fn bootstrap_store(config: &StoreConfig) -> RepositoryResult<Arc<InMemoryStore>> {
    let store = if config.seed_catalog {
        InMemoryStore::with_catalog()
    } else {
        InMemoryStore::new()
    };

    for username in config.demo_usernames() {
        store.create_user(&username, DEMO_PASSWORD).await?;
    }

    info!(
        users = store.user_count().await,
        seeded_catalog = config.seed_catalog,
        "Store initialized"
    );
    Ok(Arc::new(store))
}

/// Resolve once Ctrl+C is received
pub async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolve when `signal` fires. Never resolves if the signal could not be
/// installed.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Wire a cart service into the service's HTTP router
pub fn create_app(cart_service: Arc<CartService>, metrics: Arc<Metrics>, server: &ServerConfig) -> Router {
    let metrics_for_middleware = metrics.clone();
    let max_request_size = server.max_request_size;

    let cart_state = CartHandlerState {
        cart_service,
        tracer: CartOperationTracer::new(metrics.clone()),
    };

    Router::new()
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        .merge(create_cart_router(cart_state))
        // Layers run outermost last: observability sees every response
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(middleware::from_fn(move |req, next| {
            request_validation_middleware(max_request_size, req, next)
        }))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}
