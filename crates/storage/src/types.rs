//! Storage types shared across backends

use serde::{Deserialize, Serialize};

/// Row counts for the persisted entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageStats {
    /// Number of recipes in storage.
    pub recipes: u64,
    /// Recipes created from a listing and not yet enriched.
    pub cached_recipes: u64,
    /// Number of similarity edges in storage.
    pub similarity_edges: u64,
}
