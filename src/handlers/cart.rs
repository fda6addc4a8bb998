use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::models::{Cart, ModifyCartRequest, RepositoryError, ServiceError};
use super::error_body;
use crate::observability::CartOperationTracer;
use crate::services::CartService;

/// State for cart handlers
#[derive(Clone)]
pub struct CartHandlerState {
    pub cart_service: Arc<CartService>,
    pub tracer: CartOperationTracer,
}

/// Create cart router with the modification endpoints
pub fn create_cart_router(state: CartHandlerState) -> Router {
    Router::new()
        .route("/api/cart/addToCart", post(add_to_cart))
        .route("/api/cart/removeFromCart", post(remove_from_cart))
        .with_state(state)
}

/// Add copies of an item to a user's cart
#[instrument(name = "add_to_cart", skip(state, request), fields(
    username = %request.username,
    item_id = request.item_id,
    quantity = request.quantity,
))]
pub async fn add_to_cart(
    State(state): State<CartHandlerState>,
    Json(request): Json<ModifyCartRequest>,
) -> Result<Json<Cart>, (StatusCode, Json<Value>)> {
    let username = request.username.clone();
    let copies = request.copies();

    let result = state
        .tracer
        .trace("add_to_cart", &username, copies, state.cart_service.add_to_cart(request))
        .await;

    match result {
        Ok(cart) => {
            info!("Cart now holds {} items", cart.len());
            Ok(Json(cart))
        }
        Err(err) => Err(service_error_to_response(err)),
    }
}

/// Remove copies of an item from a user's cart
#[instrument(name = "remove_from_cart", skip(state, request), fields(
    username = %request.username,
    item_id = request.item_id,
    quantity = request.quantity,
))]
pub async fn remove_from_cart(
    State(state): State<CartHandlerState>,
    Json(request): Json<ModifyCartRequest>,
) -> Result<Json<Cart>, (StatusCode, Json<Value>)> {
    let username = request.username.clone();
    let copies = request.copies();

    let result = state
        .tracer
        .trace(
            "remove_from_cart",
            &username,
            copies,
            state.cart_service.remove_from_cart(request),
        )
        .await;

    match result {
        Ok(cart) => {
            info!("Cart now holds {} items", cart.len());
            Ok(Json(cart))
        }
        Err(err) => Err(service_error_to_response(err)),
    }
}

/// Convert ServiceError to HTTP response
pub(crate) fn service_error_to_response(err: ServiceError) -> (StatusCode, Json<Value>) {
    let (status, message) = match &err {
        ServiceError::UserNotFound { .. } | ServiceError::ItemNotFound { .. } => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        ServiceError::QuantityTooLarge { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Repository { source } => match source {
            RepositoryError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
            RepositoryError::ConnectionFailed => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Database connection failed".to_string(),
            ),
            RepositoryError::Timeout => (StatusCode::REQUEST_TIMEOUT, "Request timeout".to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        },
    };

    if status.is_server_error() {
        error!(status = status.as_u16(), "Cart request failed: {}", err);
    } else {
        warn!(status = status.as_u16(), "Cart request rejected: {}", err);
    }

    (status, Json(error_body(&message)))
}
