//! StatsStore implementation for PgStorage.

use super::*;

use crate::traits::StatsStore;
use crate::types::StorageStats;
use crate::usize_to_i64;
use async_trait::async_trait;

#[async_trait]
impl StatsStore for PgStorage {
    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        let row = sqlx::query(
            "SELECT
                (SELECT COUNT(*) FROM recipes) AS recipes,
                (SELECT COUNT(*) FROM recipes WHERE cached) AS cached_recipes,
                (SELECT COUNT(*) FROM similar_recipes) AS similarity_edges",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(StorageStats {
            recipes: u64::try_from(row.try_get::<i64, _>("recipes")?).unwrap_or(0),
            cached_recipes: u64::try_from(row.try_get::<i64, _>("cached_recipes")?).unwrap_or(0),
            similarity_edges: u64::try_from(row.try_get::<i64, _>("similarity_edges")?)
                .unwrap_or(0),
        })
    }

    async fn list_recipes(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Recipe>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(usize_to_i64(limit))
        .bind(usize_to_i64(offset))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_recipe).collect()
    }
}
