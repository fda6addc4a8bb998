use thiserror::Error;

/// Service-level errors that can occur in business logic
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("User not found: {username}")]
    UserNotFound { username: String },

    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: i64 },

    #[error("Quantity {quantity} exceeds the limit of {max_quantity}")]
    QuantityTooLarge { quantity: i32, max_quantity: u32 },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },
}

impl ServiceError {
    /// Whether the error is one of the lookup failures reported as 404
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::UserNotFound { .. }
                | ServiceError::ItemNotFound { .. }
                | ServiceError::Repository {
                    source: RepositoryError::NotFound
                }
        )
    }
}

/// Repository-level errors for data access operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database connection failed")]
    ConnectionFailed,

    #[error("Record not found")]
    NotFound,

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Timeout occurred during operation")]
    Timeout,
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
