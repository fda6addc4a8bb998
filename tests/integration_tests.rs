use ecommerce_cart::models::Cart;
use rust_decimal_macros::dec;

mod common;
use common::*;

#[tokio::test]
async fn test_add_then_remove_round_trip() {
    let test_env = TestEnvironment::new().await;

    let (status, body) = test_env.modify("addToCart", TEST_USER, 1, 3).await;
    assert_eq!(status, 200);
    let cart: Cart = serde_json::from_value(body).expect("Failed to parse cart");
    assert_eq!(cart.count_of(1), 3);
    assert_eq!(cart.total, dec!(8.97));
    assert_eq!(cart.user.as_ref().map(|owner| owner.username.as_str()), Some(TEST_USER));

    let (status, body) = test_env.modify("addToCart", TEST_USER, 2, 1).await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], "10.96");

    let (status, body) = test_env.modify("removeFromCart", TEST_USER, 1, 2).await;
    assert_eq!(status, 200);
    let cart: Cart = serde_json::from_value(body).expect("Failed to parse cart");
    assert_eq!(cart.count_of(1), 1);
    assert_eq!(cart.count_of(2), 1);
    assert_eq!(cart.total, dec!(4.98));
}

#[tokio::test]
async fn test_cart_persists_between_requests() {
    let test_env = TestEnvironment::new().await;

    test_env.modify("addToCart", TEST_USER, 2, 2).await;
    let (status, body) = test_env.modify("addToCart", TEST_USER, 2, 0).await;

    assert_eq!(status, 200);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["total"], "3.98");
}

#[tokio::test]
async fn test_removing_more_than_held_empties_cart() {
    let test_env = TestEnvironment::new().await;

    test_env.modify("addToCart", TEST_USER, 1, 2).await;
    let (status, body) = test_env.modify("removeFromCart", TEST_USER, 1, 5).await;

    assert_eq!(status, 200);
    let cart: Cart = serde_json::from_value(body).expect("Failed to parse cart");
    assert!(cart.is_empty());
    assert_eq!(cart.total, dec!(0));
}

#[tokio::test]
async fn test_unknown_user_returns_not_found() {
    let test_env = TestEnvironment::new().await;

    for action in ["addToCart", "removeFromCart"] {
        let (status, body) = test_env.modify(action, "nobody", 1, 1).await;
        assert_eq!(status, 404);
        assert_eq!(body["error"], "User not found: nobody");
    }
}

#[tokio::test]
async fn test_unknown_item_returns_not_found() {
    let test_env = TestEnvironment::new().await;

    let (status, body) = test_env.modify("addToCart", TEST_USER, 42, 1).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Item not found: 42");

    // The failed request must not have touched the cart
    let (_, body) = test_env.modify("addToCart", TEST_USER, 1, 0).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_quantity_over_limit_rejected() {
    let test_env = TestEnvironment::new().await;

    let (status, body) = test_env.modify("addToCart", TEST_USER, 1, i32::MAX).await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        format!("Quantity {} exceeds the limit of {}", i32::MAX, TEST_MAX_QUANTITY)
    );

    let (status, _) = test_env
        .modify("removeFromCart", TEST_USER, 1, TEST_MAX_QUANTITY + 1)
        .await;
    assert_eq!(status, 400);

    // The limit itself is accepted and the rejected requests left the cart alone
    let (status, body) = test_env.modify("addToCart", TEST_USER, 1, TEST_MAX_QUANTITY).await;
    assert_eq!(status, 200);
    assert_eq!(
        body["items"].as_array().map(Vec::len),
        Some(TEST_MAX_QUANTITY as usize)
    );
}

#[tokio::test]
async fn test_non_json_body_rejected() {
    let test_env = TestEnvironment::new().await;

    let response = test_env
        .client
        .post(test_env.url("/api/cart/addToCart"))
        .header("content-type", "text/plain")
        .body("username=john")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 415);
    assert_eq!(
        response.headers().get("x-frame-options").map(|v| v.as_bytes()),
        Some(&b"DENY"[..])
    );
}

#[tokio::test]
async fn test_malformed_request_rejected() {
    let test_env = TestEnvironment::new().await;

    let response = test_env
        .client
        .post(test_env.url("/api/cart/addToCart"))
        .json(&serde_json::json!({"username": TEST_USER}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn test_health_endpoint() {
    let test_env = TestEnvironment::new().await;

    let response = test_env
        .client
        .get(test_env.url("/health/status"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ecommerce-cart");
}

#[tokio::test]
async fn test_metrics_endpoint_counts_cart_operations() {
    let test_env = TestEnvironment::new().await;

    test_env.modify("addToCart", TEST_USER, 1, 4).await;
    test_env.modify("addToCart", "nobody", 1, 1).await;

    let response = test_env
        .client
        .get(test_env.url("/metrics"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.expect("Failed to read metrics");
    assert!(body.contains("cart_operations_total{operation=\"add_to_cart\",status=\"success\"} 1"));
    assert!(body.contains("cart_operations_total{operation=\"add_to_cart\",status=\"error\"} 1"));
    assert!(body.contains("cart_items_moved_total{operation=\"add_to_cart\"} 4"));
    assert!(body.contains("http_requests_total"));
}
