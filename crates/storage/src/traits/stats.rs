use async_trait::async_trait;
use recipe_cache_core::Recipe;

use crate::error::StorageError;
use crate::types::StorageStats;

/// Statistics and bulk listing.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn get_stats(&self) -> Result<StorageStats, StorageError>;

    /// Page through recipes in insertion order.
    async fn list_recipes(&self, offset: usize, limit: usize)
    -> Result<Vec<Recipe>, StorageError>;
}
