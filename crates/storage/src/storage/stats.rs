use recipe_cache_core::Recipe;
use rusqlite::params;

use super::{RECIPE_COLUMNS, Storage, get_conn, map_recipe};
use crate::error::StorageError;
use crate::types::StorageStats;
use crate::usize_to_i64;

impl Storage {
    /// # Errors
    /// Returns error if the query fails.
    pub fn get_stats(&self) -> Result<StorageStats, StorageError> {
        let conn = get_conn(&self.pool)?;
        let (recipes, cached_recipes, similarity_edges): (i64, i64, i64) = conn.query_row(
            "SELECT
                (SELECT COUNT(*) FROM recipes),
                (SELECT COUNT(*) FROM recipes WHERE cached = 1),
                (SELECT COUNT(*) FROM similar_recipes)",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        Ok(StorageStats {
            recipes: u64::try_from(recipes).unwrap_or(0),
            cached_recipes: u64::try_from(cached_recipes).unwrap_or(0),
            similarity_edges: u64::try_from(similarity_edges).unwrap_or(0),
        })
    }

    /// # Errors
    /// Returns error if the query fails.
    pub fn list_recipes(&self, offset: usize, limit: usize) -> Result<Vec<Recipe>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY id ASC LIMIT ?1 OFFSET ?2"
        ))?;
        let rows =
            stmt.query_map(params![usize_to_i64(limit), usize_to_i64(offset)], map_recipe)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
