use chrono::Utc;
use recipe_cache_core::{NewRecipe, Recipe};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

use super::{RECIPE_COLUMNS, Storage, get_conn, map_recipe};
use crate::error::StorageError;
use crate::{escape_like, usize_to_i64};

/// Single-statement insert-or-merge keyed by `external_id`.
///
/// The unique index makes concurrent callers serialize on the row; the loser
/// takes the `DO UPDATE` branch and gets the winner's row back.
pub(crate) fn upsert_recipe_in(conn: &Connection, candidate: &NewRecipe) -> rusqlite::Result<Recipe> {
    conn.query_row(
        &format!(
            "INSERT INTO recipes (external_id, title, image, instructions, ingredients, cached, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(external_id) DO UPDATE SET
                 image = COALESCE(recipes.image, excluded.image),
                 instructions = CASE WHEN recipes.instructions = ''
                                     THEN excluded.instructions ELSE recipes.instructions END,
                 ingredients = CASE WHEN recipes.ingredients = ''
                                    THEN excluded.ingredients ELSE recipes.ingredients END
             RETURNING {RECIPE_COLUMNS}"
        ),
        params![
            candidate.external_id,
            candidate.title,
            candidate.image,
            candidate.instructions,
            candidate.ingredients,
            candidate.cached,
            Utc::now(),
        ],
        map_recipe,
    )
}

impl Storage {
    /// Case-insensitive substring match on title, oldest first.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn find_recipes_by_title(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<Recipe>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes
             WHERE fold_case(title) LIKE '%' || fold_case(?1) || '%' ESCAPE '\\'
             ORDER BY id ASC
             LIMIT ?2"
        ))?;
        let rows = stmt.query_map(params![escape_like(fragment), usize_to_i64(limit)], map_recipe)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// # Errors
    /// Returns error if the query fails.
    pub fn find_recipe_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<Recipe>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let recipe = conn
            .query_row(
                &format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE external_id = ?1"),
                params![external_id],
                map_recipe,
            )
            .optional()?;
        Ok(recipe)
    }

    /// # Errors
    /// Returns error if the statement fails.
    pub fn upsert_recipe(&self, candidate: &NewRecipe) -> Result<Recipe, StorageError> {
        let conn = get_conn(&self.pool)?;
        Ok(upsert_recipe_in(&conn, candidate)?)
    }

    /// Upsert all candidates in one immediate transaction.
    ///
    /// # Errors
    /// Returns error if any statement fails; nothing is committed in that case.
    pub fn upsert_recipes(&self, candidates: &[NewRecipe]) -> Result<Vec<Recipe>, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut saved = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            saved.push(upsert_recipe_in(&tx, candidate)?);
        }
        tx.commit()?;
        tracing::debug!(count = saved.len(), "Upserted recipe batch");
        Ok(saved)
    }
}
