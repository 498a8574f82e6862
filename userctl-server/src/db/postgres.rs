//! Postgres-backed user store

use async_trait::async_trait;
use sqlx::PgPool;

use super::store::{StoreError, UserStore};
use crate::models::User;

/// User store over a shared sqlx pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translate the driver's unique-violation signal; everything else stays a
/// plain database error.
fn map_write_error(err: sqlx::Error, name: &str) -> StoreError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            StoreError::UniqueViolation(name.to_owned())
        }
        other => StoreError::Database(other),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, name: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO namestable (name) VALUES ($1)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, name))?;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        let user: Option<User> =
            sqlx::query_as("SELECT id, name FROM namestable WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    async fn rename(&self, old: &str, new: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE namestable SET name = $1 WHERE name = $2")
            .bind(new)
            .bind(old)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, new))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, name: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM namestable WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
