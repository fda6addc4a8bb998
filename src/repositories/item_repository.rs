use async_trait::async_trait;

use crate::models::{Item, RepositoryResult};

/// Trait defining the interface for catalog item data access
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Find an item by its identifier
    async fn find_by_id(&self, item_id: i64) -> RepositoryResult<Option<Item>>;

    /// Get every item in the catalog, ordered by id
    async fn find_all(&self) -> RepositoryResult<Vec<Item>>;

    /// Find all items with the given name
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Item>>;
}
