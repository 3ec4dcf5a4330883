//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use recipe_cache_core::{
    NewRecipe, NewSimilarityEdge, Recipe, RecipeWithSimilar, SimilarityEdge,
};

use crate::error::StorageError;
use crate::traits::{RecipeStore, SimilarityStore, StatsStore};
use crate::types::StorageStats;

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path, pool_size: u32) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::Storage::with_pool_size(db_path, pool_size)?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url).await?))
    }

    /// Short backend name for logs and stats output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── RecipeStore ──────────────────────────────────────────────────

#[async_trait]
impl RecipeStore for StorageBackend {
    async fn find_recipes_by_title(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<Recipe>, StorageError> {
        dispatch!(self, RecipeStore, find_recipes_by_title(fragment, limit))
    }

    async fn find_recipe_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<Recipe>, StorageError> {
        dispatch!(self, RecipeStore, find_recipe_by_external_id(external_id))
    }

    async fn upsert_recipe(&self, candidate: &NewRecipe) -> Result<Recipe, StorageError> {
        dispatch!(self, RecipeStore, upsert_recipe(candidate))
    }

    async fn upsert_recipes(&self, candidates: &[NewRecipe]) -> Result<Vec<Recipe>, StorageError> {
        dispatch!(self, RecipeStore, upsert_recipes(candidates))
    }
}

// ── SimilarityStore ──────────────────────────────────────────────

#[async_trait]
impl SimilarityStore for StorageBackend {
    async fn find_similarity_edges(
        &self,
        owner_recipe_id: i64,
    ) -> Result<Vec<SimilarityEdge>, StorageError> {
        dispatch!(self, SimilarityStore, find_similarity_edges(owner_recipe_id))
    }

    async fn append_similarity_edge(
        &self,
        edge: &NewSimilarityEdge,
    ) -> Result<SimilarityEdge, StorageError> {
        dispatch!(self, SimilarityStore, append_similarity_edge(edge))
    }

    async fn save_similarity_set(
        &self,
        owner: &NewRecipe,
        edges: &[NewSimilarityEdge],
    ) -> Result<RecipeWithSimilar, StorageError> {
        dispatch!(self, SimilarityStore, save_similarity_set(owner, edges))
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for StorageBackend {
    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        dispatch!(self, StatsStore, get_stats())
    }

    async fn list_recipes(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Recipe>, StorageError> {
        dispatch!(self, StatsStore, list_recipes(offset, limit))
    }
}
