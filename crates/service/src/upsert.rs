//! Upserts that absorb unique-key races.
//!
//! The store's upsert is a single `ON CONFLICT` statement, so a `Duplicate`
//! only surfaces when a concurrent writer wins an edge case the statement
//! cannot merge. The row exists at that point; re-fetch it by external id.

use recipe_cache_core::{NewRecipe, Recipe};
use recipe_cache_storage::{RecipeStore, StorageError};

pub(crate) async fn upsert_or_refetch<S>(
    store: &S,
    candidate: &NewRecipe,
) -> Result<Recipe, StorageError>
where
    S: RecipeStore + ?Sized,
{
    match store.upsert_recipe(candidate).await {
        Err(e) if e.is_duplicate() => {
            let Some(external_id) = candidate.external_id else {
                return Err(e);
            };
            tracing::debug!(external_id, "upsert lost a race, re-fetching");
            store.find_recipe_by_external_id(external_id).await?.ok_or(e)
        },
        other => other,
    }
}

/// Batch upsert; on a race, falls back to per-candidate recovery.
pub(crate) async fn upsert_all_or_refetch<S>(
    store: &S,
    candidates: &[NewRecipe],
) -> Result<Vec<Recipe>, StorageError>
where
    S: RecipeStore + ?Sized,
{
    match store.upsert_recipes(candidates).await {
        Err(e) if e.is_duplicate() => {
            tracing::warn!(error = %e, count = candidates.len(), "batch upsert raced");
            let mut saved = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                saved.push(upsert_or_refetch(store, candidate).await?);
            }
            Ok(saved)
        },
        other => other,
    }
}
