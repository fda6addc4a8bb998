use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio::net::TcpListener;

use ecommerce_cart::{bootstrap_store, create_app, services::CartService, Config, Metrics};

pub const TEST_USER: &str = "john";
pub const TEST_MAX_QUANTITY: i32 = 50;

pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
}

impl TestEnvironment {
    /// Serve the full router on an ephemeral port with the widget catalog
    /// and `TEST_USER` registered
    pub async fn new() -> Self {
        let config = Config::from_map(HashMap::from([
            ("ECOMMERCE_DEMO_USERS".to_string(), TEST_USER.to_string()),
            ("ECOMMERCE_MAX_QUANTITY".to_string(), TEST_MAX_QUANTITY.to_string()),
        ]))
        .expect("Failed to build test configuration");

        let store = bootstrap_store(&config.store)
            .await
            .expect("Failed to initialize store");
        let cart_service = Arc::new(
            CartService::new(store.clone(), store.clone(), store)
                .with_max_quantity(config.server.max_quantity),
        );
        let metrics = Arc::new(Metrics::new().expect("Failed to create metrics"));
        let app = create_app(cart_service, metrics, &config.server);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to serve app");
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a cart modification and return the status code with the JSON body
    pub async fn modify(&self, action: &str, username: &str, item_id: i64, quantity: i32) -> (u16, Value) {
        let response = self
            .client
            .post(self.url(&format!("/api/cart/{}", action)))
            .json(&serde_json::json!({
                "username": username,
                "itemId": item_id,
                "quantity": quantity,
            }))
            .send()
            .await
            .expect("Failed to send request");

        let status = response.status().as_u16();
        let body = response.json().await.unwrap_or(Value::Null);
        (status, body)
    }
}
