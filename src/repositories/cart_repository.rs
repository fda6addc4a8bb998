use async_trait::async_trait;

use crate::models::{Cart, RepositoryResult};

/// Trait defining the interface for cart persistence
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Save a cart, replacing the stored copy with the same id
    async fn save(&self, cart: Cart) -> RepositoryResult<Cart>;

    /// Find a cart by its identifier
    async fn find_cart(&self, cart_id: i64) -> RepositoryResult<Option<Cart>>;
}
