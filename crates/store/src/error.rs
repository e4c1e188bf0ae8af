use common::{CustomerId, MenuId, RestaurantId};
use thiserror::Error;

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced menu item does not exist.
    #[error("Menu not found: {0}")]
    MenuNotFound(MenuId),

    /// The referenced restaurant does not exist.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),

    /// No customer exists with the given ID.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// The username is already registered.
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
