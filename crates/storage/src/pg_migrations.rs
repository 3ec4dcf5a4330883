//! PostgreSQL schema migrations for recipe-cache storage.

use sqlx::PgPool;

use crate::error::StorageError;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            id BIGSERIAL PRIMARY KEY,
            external_id BIGINT UNIQUE,
            title TEXT NOT NULL,
            image TEXT,
            instructions TEXT NOT NULL DEFAULT '',
            ingredients TEXT NOT NULL DEFAULT '',
            cached BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::Migration(format!("recipes table: {e}")))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_title_lower ON recipes (LOWER(title))")
        .execute(pool)
        .await
        .map_err(|e| StorageError::Migration(format!("recipes title index: {e}")))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS similar_recipes (
            id BIGSERIAL PRIMARY KEY,
            recipe_id BIGINT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            similar_external_id BIGINT NOT NULL,
            title TEXT NOT NULL,
            image TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (recipe_id, similar_external_id)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::Migration(format!("similar_recipes table: {e}")))?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_similar_recipes_owner ON similar_recipes (recipe_id)",
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::Migration(format!("similar_recipes owner index: {e}")))?;

    tracing::info!("PostgreSQL schema up to date");
    Ok(())
}
