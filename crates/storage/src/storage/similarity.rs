use chrono::Utc;
use recipe_cache_core::{
    NewRecipe, NewSimilarityEdge, RecipeWithSimilar, SimilarityEdge, dedup_edges,
};
use rusqlite::{Connection, TransactionBehavior, params};

use super::recipes::upsert_recipe_in;
use super::{EDGE_COLUMNS, Storage, get_conn, map_edge};
use crate::error::StorageError;

fn edges_for_owner(conn: &Connection, owner_recipe_id: i64) -> rusqlite::Result<Vec<SimilarityEdge>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EDGE_COLUMNS} FROM similar_recipes WHERE recipe_id = ?1 ORDER BY id ASC"
    ))?;
    let rows = stmt.query_map(params![owner_recipe_id], map_edge)?;
    rows.collect()
}

impl Storage {
    /// # Errors
    /// Returns error if the query fails.
    pub fn find_similarity_edges(
        &self,
        owner_recipe_id: i64,
    ) -> Result<Vec<SimilarityEdge>, StorageError> {
        let conn = get_conn(&self.pool)?;
        Ok(edges_for_owner(&conn, owner_recipe_id)?)
    }

    /// # Errors
    /// Returns `Duplicate` if the owner already has an edge to the same recipe.
    pub fn append_similarity_edge(
        &self,
        edge: &NewSimilarityEdge,
    ) -> Result<SimilarityEdge, StorageError> {
        let conn = get_conn(&self.pool)?;
        let saved = conn.query_row(
            &format!(
                "INSERT INTO similar_recipes (recipe_id, similar_external_id, title, image, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {EDGE_COLUMNS}"
            ),
            params![
                edge.owner_recipe_id,
                edge.similar_external_id,
                edge.title,
                edge.image,
                Utc::now()
            ],
            map_edge,
        )?;
        Ok(saved)
    }

    /// # Errors
    /// Returns error if any statement fails; nothing is committed in that case.
    pub fn save_similarity_set(
        &self,
        owner: &NewRecipe,
        edges: &[NewSimilarityEdge],
    ) -> Result<RecipeWithSimilar, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let recipe = upsert_recipe_in(&tx, owner)?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO similar_recipes (recipe_id, similar_external_id, title, image, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(recipe_id, similar_external_id) DO NOTHING",
            )?;
            let now = Utc::now();
            for edge in dedup_edges(edges.to_vec()) {
                inserted += stmt.execute(params![
                    recipe.id,
                    edge.similar_external_id,
                    edge.title,
                    edge.image,
                    now
                ])?;
            }
        }
        let similar = edges_for_owner(&tx, recipe.id)?;
        tx.commit()?;

        tracing::debug!(
            owner_recipe_id = recipe.id,
            inserted,
            total = similar.len(),
            "Saved similarity set"
        );
        Ok(RecipeWithSimilar { recipe, similar })
    }
}
