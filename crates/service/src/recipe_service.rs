use std::collections::HashMap;
use std::sync::Arc;

use recipe_cache_core::{
    NewRecipe, NewSimilarityEdge, Recipe, RecipeWithSimilar, dedup_edges,
};
use recipe_cache_storage::{
    RecipeStore, SimilarityStore, StatsStore, StorageBackend, StorageStats,
};
use recipe_cache_upstream::{RecipeProvider, UpstreamError};

use crate::ServiceError;
use crate::upsert::upsert_all_or_refetch;

/// Reconciles local recipe storage with the upstream provider.
///
/// Every successful upstream read is persisted before it is returned, so
/// later lookups are answered (at least partly) from the local store.
pub struct RecipeService {
    storage: Arc<StorageBackend>,
    provider: Arc<dyn RecipeProvider>,
}

impl RecipeService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, provider: Arc<dyn RecipeProvider>) -> Self {
        Self { storage, provider }
    }

    #[must_use]
    pub fn storage(&self) -> &StorageBackend {
        &self.storage
    }

    /// Local matches plus fresh upstream results, one entry per recipe.
    ///
    /// The upstream provider is always consulted. An empty upstream answer is
    /// `NotFound` even when local rows matched.
    pub async fn search_by_title(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<Vec<Recipe>, ServiceError> {
        let title = require_title(title)?;
        let local = self.storage.find_recipes_by_title(title, limit).await?;
        tracing::debug!(title, local = local.len(), "local title lookup");

        let mut listings =
            self.provider.search_by_title(title, limit).await.map_err(upstream_failure)?;
        listings.truncate(limit);
        if listings.is_empty() {
            return Err(ServiceError::NotFound(format!("no recipes match title '{title}'")));
        }

        let candidates: Vec<NewRecipe> = listings.iter().map(NewRecipe::from_listing).collect();
        let upserted = upsert_all_or_refetch(self.storage.as_ref(), &candidates).await?;
        tracing::info!(title, local = local.len(), upstream = upserted.len(), "title search");

        Ok(union_by_merge_key(local, upserted))
    }

    /// Recipe matching `title` together with its similar recipes.
    ///
    /// Served entirely from the store when the first local match already has
    /// edges. Otherwise the first upstream hit becomes the owner and the
    /// provider's similar list is persisted for it in one transaction.
    pub async fn similar_recipes(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<RecipeWithSimilar, ServiceError> {
        let title = require_title(title)?;

        if let Some(local) = self.storage.find_recipes_by_title(title, 1).await?.into_iter().next() {
            let similar = self.storage.find_similarity_edges(local.id).await?;
            if !similar.is_empty() {
                tracing::debug!(title, owner_recipe_id = local.id, edges = similar.len(), "similar cache hit");
                return Ok(RecipeWithSimilar { recipe: local, similar });
            }
            tracing::debug!(title, owner_recipe_id = local.id, "local match without edges");
        }

        let canonical = self
            .provider
            .search_by_title(title, 1)
            .await
            .map_err(upstream_failure)?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound(format!("no recipes match title '{title}'")))?;

        let mut similar =
            self.provider.similar_to(canonical.id, limit).await.map_err(upstream_failure)?;
        similar.truncate(limit);
        if similar.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "no similar recipes for external id {}",
                canonical.id
            )));
        }

        let owner = NewRecipe::from_listing(&canonical);
        let edges = dedup_edges(
            similar.iter().map(|s| NewSimilarityEdge::from_summary(0, s)).collect(),
        );

        let saved = match self.storage.save_similarity_set(&owner, &edges).await {
            Err(e) if e.is_duplicate() => {
                tracing::warn!(external_id = canonical.id, error = %e, "similarity set raced, retrying");
                self.storage.save_similarity_set(&owner, &edges).await?
            },
            other => other?,
        };
        tracing::info!(
            title,
            external_id = canonical.id,
            owner_recipe_id = saved.recipe.id,
            edges = saved.similar.len(),
            "similar recipes stored"
        );
        Ok(saved)
    }

    /// Pass-through ingredient search. Nothing is persisted.
    pub async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        limit: usize,
    ) -> Result<serde_json::Value, ServiceError> {
        let ingredients: Vec<String> = ingredients
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        if ingredients.is_empty() {
            return Err(ServiceError::InvalidInput("at least one ingredient is required".to_owned()));
        }

        let value = self
            .provider
            .search_by_ingredients(&ingredients, limit)
            .await
            .map_err(upstream_failure)?;
        if is_empty_payload(&value) {
            return Err(ServiceError::NotFound(format!(
                "no recipes use ingredients {}",
                ingredients.join(",")
            )));
        }
        Ok(value)
    }

    pub async fn stats(&self) -> Result<StorageStats, ServiceError> {
        Ok(self.storage.get_stats().await?)
    }
}

fn require_title(title: &str) -> Result<&str, ServiceError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput("title must not be empty".to_owned()));
    }
    Ok(trimmed)
}

fn upstream_failure(err: UpstreamError) -> ServiceError {
    tracing::warn!(error = %err, "upstream call failed");
    ServiceError::UpstreamUnavailable(err)
}

fn is_empty_payload(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Keep one recipe per merge key in first-seen order; later entries replace
/// earlier ones in place.
fn union_by_merge_key(local: Vec<Recipe>, upstream: Vec<Recipe>) -> Vec<Recipe> {
    let mut order = Vec::with_capacity(local.len() + upstream.len());
    let mut by_key: HashMap<i64, Recipe> = HashMap::with_capacity(order.capacity());
    for recipe in local.into_iter().chain(upstream) {
        let key = recipe.merge_key();
        if by_key.insert(key, recipe).is_none() {
            order.push(key);
        }
    }
    order.into_iter().filter_map(|key| by_key.remove(&key)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn recipe(id: i64, external_id: Option<i64>, title: &str) -> Recipe {
        Recipe {
            id,
            external_id,
            title: title.to_owned(),
            image: None,
            instructions: String::new(),
            ingredients: String::new(),
            cached: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn union_keeps_first_seen_order_and_last_write() {
        let local = vec![recipe(1, Some(42), "old"), recipe(2, None, "local only")];
        let upstream = vec![recipe(3, Some(7), "seven"), recipe(1, Some(42), "new")];

        let merged = union_by_merge_key(local, upstream);

        let titles: Vec<_> = merged.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "local only", "seven"]);
    }

    #[test]
    fn empty_payload_shapes() {
        assert!(is_empty_payload(&serde_json::Value::Null));
        assert!(is_empty_payload(&serde_json::json!([])));
        assert!(is_empty_payload(&serde_json::json!({})));
        assert!(!is_empty_payload(&serde_json::json!([{"id": 1}])));
    }

    #[test]
    fn blank_title_is_invalid() {
        assert!(matches!(require_title("   "), Err(ServiceError::InvalidInput(_))));
        assert_eq!(require_title("  pasta ").ok(), Some("pasta"));
    }
}
