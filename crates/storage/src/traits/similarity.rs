use async_trait::async_trait;
use recipe_cache_core::{NewRecipe, NewSimilarityEdge, RecipeWithSimilar, SimilarityEdge};

use crate::error::StorageError;

/// Similarity edge operations.
#[async_trait]
pub trait SimilarityStore: Send + Sync {
    /// All edges owned by a recipe, in insertion order.
    async fn find_similarity_edges(
        &self,
        owner_recipe_id: i64,
    ) -> Result<Vec<SimilarityEdge>, StorageError>;

    /// Always inserts. A repeated (owner, similar id) pair is `Duplicate`.
    async fn append_similarity_edge(
        &self,
        edge: &NewSimilarityEdge,
    ) -> Result<SimilarityEdge, StorageError>;

    /// Upsert `owner` and add every edge not yet stored for it, atomically.
    ///
    /// `owner_recipe_id` on the incoming edges is ignored; the upserted
    /// owner's id is used. Returns the owner with all of its stored edges.
    async fn save_similarity_set(
        &self,
        owner: &NewRecipe,
        edges: &[NewSimilarityEdge],
    ) -> Result<RecipeWithSimilar, StorageError>;
}
