use async_trait::async_trait;
use recipe_cache_core::{NewRecipe, Recipe};

use crate::error::StorageError;

/// Recipe lookup and idempotent upsert.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Case-insensitive containment match on title, in insertion order.
    async fn find_recipes_by_title(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<Recipe>, StorageError>;

    /// Get recipe by upstream identifier.
    async fn find_recipe_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<Recipe>, StorageError>;

    /// Insert, or merge into the row that already holds `external_id`.
    ///
    /// Existing rows keep their identity and non-empty fields; only empty
    /// fields are filled from the candidate.
    async fn upsert_recipe(&self, candidate: &NewRecipe) -> Result<Recipe, StorageError>;

    /// Upsert a batch in one transaction. Output order matches input order.
    async fn upsert_recipes(&self, candidates: &[NewRecipe]) -> Result<Vec<Recipe>, StorageError>;
}
