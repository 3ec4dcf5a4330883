//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod recipes;
mod similarity;
mod stats;

use chrono::{DateTime, Utc};
use recipe_cache_core::{
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS, Recipe,
    SimilarityEdge,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::error::StorageError;

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

pub(crate) const RECIPE_COLUMNS: &str =
    "id, external_id, title, image, instructions, ingredients, cached, created_at";

pub(crate) const EDGE_COLUMNS: &str =
    "id, recipe_id, similar_external_id, title, image, created_at";

pub(crate) fn row_to_recipe(row: &sqlx::postgres::PgRow) -> Result<Recipe, StorageError> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(Recipe {
        id: row.try_get("id")?,
        external_id: row.try_get("external_id")?,
        title: row.try_get("title")?,
        image: row.try_get("image")?,
        instructions: row.try_get("instructions")?,
        ingredients: row.try_get("ingredients")?,
        cached: row.try_get("cached")?,
        created_at,
    })
}

pub(crate) fn row_to_edge(row: &sqlx::postgres::PgRow) -> Result<SimilarityEdge, StorageError> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(SimilarityEdge {
        id: row.try_get("id")?,
        owner_recipe_id: row.try_get("recipe_id")?,
        similar_external_id: row.try_get("similar_external_id")?,
        title: row.try_get("title")?,
        image: row.try_get("image")?,
        created_at,
    })
}
