//! Schema bootstrap for the user table

use sqlx::PgPool;

/// Table holding user rows.
pub const TABLE_NAME: &str = "namestable";

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS namestable (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) UNIQUE
    )
"#;

/// Create the user table if it does not exist yet. Idempotent.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!(table = TABLE_NAME, "Ensuring schema");

    sqlx::query(CREATE_TABLE_SQL).execute(pool).await?;

    tracing::info!(table = TABLE_NAME, "Schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_schema_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");

        ensure_schema(&pool).await.expect("first run");
        ensure_schema(&pool).await.expect("second run");

        pool.close().await;
    }
}
