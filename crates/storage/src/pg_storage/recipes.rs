//! RecipeStore implementation for PgStorage.

use super::*;

use crate::traits::RecipeStore;
use crate::{escape_like, usize_to_i64};
use async_trait::async_trait;
use recipe_cache_core::NewRecipe;
use sqlx::PgConnection;

/// Single-statement insert-or-merge keyed by `external_id`.
pub(crate) async fn upsert_recipe_in(
    conn: &mut PgConnection,
    candidate: &NewRecipe,
) -> Result<Recipe, StorageError> {
    let row = sqlx::query(&format!(
        "INSERT INTO recipes (external_id, title, image, instructions, ingredients, cached, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         ON CONFLICT (external_id) DO UPDATE SET
             image = COALESCE(recipes.image, EXCLUDED.image),
             instructions = CASE WHEN recipes.instructions = ''
                                 THEN EXCLUDED.instructions ELSE recipes.instructions END,
             ingredients = CASE WHEN recipes.ingredients = ''
                                THEN EXCLUDED.ingredients ELSE recipes.ingredients END
         RETURNING {RECIPE_COLUMNS}"
    ))
    .bind(candidate.external_id)
    .bind(&candidate.title)
    .bind(&candidate.image)
    .bind(&candidate.instructions)
    .bind(&candidate.ingredients)
    .bind(candidate.cached)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;
    row_to_recipe(&row)
}

#[async_trait]
impl RecipeStore for PgStorage {
    async fn find_recipes_by_title(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<Recipe>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes
             WHERE title ILIKE '%' || $1 || '%' ESCAPE '\\'
             ORDER BY id ASC
             LIMIT $2"
        ))
        .bind(escape_like(fragment))
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_recipe).collect()
    }

    async fn find_recipe_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<Recipe>, StorageError> {
        let row = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE external_id = $1"))
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_recipe).transpose()
    }

    async fn upsert_recipe(&self, candidate: &NewRecipe) -> Result<Recipe, StorageError> {
        let mut conn = self.pool.acquire().await?;
        upsert_recipe_in(&mut conn, candidate).await
    }

    /// Rows are written in `external_id` order so concurrent batches lock
    /// shared rows in the same sequence; results come back in input order.
    async fn upsert_recipes(&self, candidates: &[NewRecipe]) -> Result<Vec<Recipe>, StorageError> {
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(candidates.len());
        for (position, candidate) in lock_order(candidates) {
            saved.push((position, upsert_recipe_in(&mut tx, candidate).await?));
        }
        tx.commit().await?;
        tracing::debug!(count = saved.len(), "Upserted recipe batch");
        Ok(restore_input_order(saved))
    }
}

/// Pair each candidate with its input position, sorted by `external_id`.
fn lock_order(candidates: &[NewRecipe]) -> Vec<(usize, &NewRecipe)> {
    let mut ordered: Vec<_> = candidates.iter().enumerate().collect();
    ordered.sort_by_key(|(_, candidate)| candidate.external_id);
    ordered
}

fn restore_input_order(mut saved: Vec<(usize, Recipe)>) -> Vec<Recipe> {
    saved.sort_by_key(|(position, _)| *position);
    saved.into_iter().map(|(_, recipe)| recipe).collect()
}
