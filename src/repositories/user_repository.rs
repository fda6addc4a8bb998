use async_trait::async_trait;

use crate::models::{RepositoryResult, User};

/// Trait defining the interface for user lookups
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user, with its current cart, by username
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
}
