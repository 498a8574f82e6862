//! Storage trait for user rows

use async_trait::async_trait;

use crate::models::User;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Insert or update would duplicate a unique `name`.
    #[error("name '{0}' already exists")]
    UniqueViolation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Single-statement operations over the user table.
///
/// `rename` and `delete` report affected row counts; zero means the row
/// vanished after the caller's existence check.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn insert(&self, name: &str) -> Result<(), StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, StoreError>;

    async fn rename(&self, old: &str, new: &str) -> Result<u64, StoreError>;

    async fn delete(&self, name: &str) -> Result<u64, StoreError>;

    /// Round-trip to the backend without touching user rows.
    async fn ping(&self) -> Result<(), StoreError>;
}
