use async_trait::async_trait;
use recipe_cache_core::RecipeSummary;

use crate::error::UpstreamError;

/// The three query shapes the upstream provider answers.
///
/// An empty result is a successful call; deciding that it means "not found"
/// is left to the caller.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Recipes whose title matches `query`.
    async fn search_by_title(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<RecipeSummary>, UpstreamError>;

    /// Recipes that use the given ingredients, as the provider's raw JSON.
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        count: usize,
    ) -> Result<serde_json::Value, UpstreamError>;

    /// Recipes the provider considers similar to `external_id`.
    async fn similar_to(
        &self,
        external_id: i64,
        count: usize,
    ) -> Result<Vec<RecipeSummary>, UpstreamError>;
}
