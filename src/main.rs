use anyhow::Context;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tokio::net::TcpListener;
use tracing::info;

use ecommerce_cart::{
    bootstrap_store, create_app, init_observability, services::CartService,
    shutdown_observability, shutdown_signal, Config, Metrics,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is not up yet, so configuration errors surface through anyhow
    let config = Config::from_environment().context("Failed to load configuration")?;

    init_observability(&config.observability).context("Failed to initialize observability")?;

    info!("Starting ecommerce-cart service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );

    let metrics = Arc::new(Metrics::new().context("Failed to initialize metrics")?);
    info!("Metrics initialized successfully");

    let store = bootstrap_store(&config.store)
        .await
        .context("Failed to initialize store")?;

    let cart_service = Arc::new(
        CartService::new(store.clone(), store.clone(), store)
            .with_max_quantity(config.server.max_quantity),
    );
    info!("Services initialized successfully");

    let app = create_app(cart_service, metrics, &config.server);

    let host = config
        .server
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid server host: {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    let shutdown = async {
        shutdown_signal().await;
        shutdown_observability().await;
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
