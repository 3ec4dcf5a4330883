//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use recipe_cache_core::{
    NewRecipe, NewSimilarityEdge, Recipe, RecipeWithSimilar, SimilarityEdge,
};

use crate::Storage;
use crate::error::StorageError;
use crate::traits::{RecipeStore, SimilarityStore, StatsStore};
use crate::types::StorageStats;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@slice arg`: `.to_vec()` a `&[T]`, pass as `&arg`
/// - `@val arg`: move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture slice $arg:ident) => { let $arg = $arg.to_vec(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass slice $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

// ── RecipeStore ──────────────────────────────────────────────────

#[async_trait]
impl RecipeStore for Storage {
    async fn find_recipes_by_title(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<Recipe>, StorageError> {
        delegate!(self, find_recipes_by_title, @str fragment, @val limit)
    }
    async fn find_recipe_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<Recipe>, StorageError> {
        delegate!(self, find_recipe_by_external_id, @val external_id)
    }
    async fn upsert_recipe(&self, candidate: &NewRecipe) -> Result<Recipe, StorageError> {
        delegate!(self, upsert_recipe, @ref candidate)
    }
    async fn upsert_recipes(&self, candidates: &[NewRecipe]) -> Result<Vec<Recipe>, StorageError> {
        delegate!(self, upsert_recipes, @slice candidates)
    }
}

// ── SimilarityStore ──────────────────────────────────────────────

#[async_trait]
impl SimilarityStore for Storage {
    async fn find_similarity_edges(
        &self,
        owner_recipe_id: i64,
    ) -> Result<Vec<SimilarityEdge>, StorageError> {
        delegate!(self, find_similarity_edges, @val owner_recipe_id)
    }
    async fn append_similarity_edge(
        &self,
        edge: &NewSimilarityEdge,
    ) -> Result<SimilarityEdge, StorageError> {
        delegate!(self, append_similarity_edge, @ref edge)
    }
    async fn save_similarity_set(
        &self,
        owner: &NewRecipe,
        edges: &[NewSimilarityEdge],
    ) -> Result<RecipeWithSimilar, StorageError> {
        delegate!(self, save_similarity_set, @ref owner, @slice edges)
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for Storage {
    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        delegate!(self, get_stats)
    }
    async fn list_recipes(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Recipe>, StorageError> {
        delegate!(self, list_recipes, @val offset, @val limit)
    }
}
