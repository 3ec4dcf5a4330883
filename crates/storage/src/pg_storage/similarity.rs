//! SimilarityStore implementation for PgStorage.

use super::*;

use super::recipes::upsert_recipe_in;
use crate::traits::SimilarityStore;
use async_trait::async_trait;
use recipe_cache_core::{NewRecipe, NewSimilarityEdge, RecipeWithSimilar, dedup_edges};
use sqlx::PgConnection;

async fn edges_for_owner(
    conn: &mut PgConnection,
    owner_recipe_id: i64,
) -> Result<Vec<SimilarityEdge>, StorageError> {
    let rows = sqlx::query(&format!(
        "SELECT {EDGE_COLUMNS} FROM similar_recipes WHERE recipe_id = $1 ORDER BY id ASC"
    ))
    .bind(owner_recipe_id)
    .fetch_all(conn)
    .await?;
    rows.iter().map(row_to_edge).collect()
}

#[async_trait]
impl SimilarityStore for PgStorage {
    async fn find_similarity_edges(
        &self,
        owner_recipe_id: i64,
    ) -> Result<Vec<SimilarityEdge>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        edges_for_owner(&mut conn, owner_recipe_id).await
    }

    async fn append_similarity_edge(
        &self,
        edge: &NewSimilarityEdge,
    ) -> Result<SimilarityEdge, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO similar_recipes (recipe_id, similar_external_id, title, image, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {EDGE_COLUMNS}"
        ))
        .bind(edge.owner_recipe_id)
        .bind(edge.similar_external_id)
        .bind(&edge.title)
        .bind(&edge.image)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        row_to_edge(&row)
    }

    async fn save_similarity_set(
        &self,
        owner: &NewRecipe,
        edges: &[NewSimilarityEdge],
    ) -> Result<RecipeWithSimilar, StorageError> {
        let mut tx = self.pool.begin().await?;

        let recipe = upsert_recipe_in(&mut tx, owner).await?;
        let now = Utc::now();
        let mut inserted = 0u64;
        for edge in dedup_edges(edges.to_vec()) {
            let result = sqlx::query(
                "INSERT INTO similar_recipes (recipe_id, similar_external_id, title, image, created_at)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT (recipe_id, similar_external_id) DO NOTHING",
            )
            .bind(recipe.id)
            .bind(edge.similar_external_id)
            .bind(&edge.title)
            .bind(&edge.image)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        let similar = edges_for_owner(&mut tx, recipe.id).await?;
        tx.commit().await?;

        tracing::debug!(
            owner_recipe_id = recipe.id,
            inserted,
            total = similar.len(),
            "Saved similarity set"
        );
        Ok(RecipeWithSimilar { recipe, similar })
    }
}
