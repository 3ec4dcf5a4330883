//! Recipe domain types
//!
//! `Recipe` and `SimilarityEdge` are the two persisted entities. The `New*`
//! variants are insert candidates without a store-assigned identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipe row as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Locally assigned identity, stable for the lifetime of the row
    pub id: i64,
    /// Upstream provider identifier, unique when present
    pub external_id: Option<i64>,
    /// Display name
    pub title: String,
    /// Image URL
    pub image: Option<String>,
    /// Free-text instructions, empty until enriched
    pub instructions: String,
    /// Free-text ingredient list, empty until enriched
    pub ingredients: String,
    /// Created purely from a search listing, not yet enriched
    pub cached: bool,
    /// When the row was first stored
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Key used when merging result sets: the external id when present,
    /// otherwise the internal id (negated so the two spaces never collide).
    #[must_use]
    pub fn merge_key(&self) -> i64 {
        self.external_id.unwrap_or_else(|| self.id.saturating_neg().saturating_sub(1))
    }
}

/// Insert candidate for a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub external_id: Option<i64>,
    pub title: String,
    pub image: Option<String>,
    pub instructions: String,
    pub ingredients: String,
    pub cached: bool,
}

impl NewRecipe {
    /// Candidate built from a search listing item: flagged `cached`, no details.
    #[must_use]
    pub fn from_listing(summary: &RecipeSummary) -> Self {
        Self {
            external_id: Some(summary.id),
            title: summary.title.clone(),
            image: summary.image.clone(),
            instructions: String::new(),
            ingredients: String::new(),
            cached: true,
        }
    }

    /// Candidate carrying every field of an already stored recipe.
    #[must_use]
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            external_id: recipe.external_id,
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            instructions: recipe.instructions.clone(),
            ingredients: recipe.ingredients.clone(),
            cached: recipe.cached,
        }
    }
}

/// A recipe recorded as similar to an owning recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub id: i64,
    /// Recipe the similarity was computed for
    pub owner_recipe_id: i64,
    /// Upstream id of the similar recipe
    pub similar_external_id: i64,
    /// Title snapshot at discovery time
    pub title: String,
    /// Image snapshot at discovery time
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert candidate for a similarity edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSimilarityEdge {
    pub owner_recipe_id: i64,
    pub similar_external_id: i64,
    pub title: String,
    pub image: Option<String>,
}

impl NewSimilarityEdge {
    #[must_use]
    pub fn from_summary(owner_recipe_id: i64, summary: &RecipeSummary) -> Self {
        Self {
            owner_recipe_id,
            similar_external_id: summary.id,
            title: summary.title.clone(),
            image: summary.image.clone(),
        }
    }

    #[must_use]
    pub fn from_edge(edge: &SimilarityEdge) -> Self {
        Self {
            owner_recipe_id: edge.owner_recipe_id,
            similar_external_id: edge.similar_external_id,
            title: edge.title.clone(),
            image: edge.image.clone(),
        }
    }
}

/// A recipe together with every similarity edge stored for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeWithSimilar {
    pub recipe: Recipe,
    pub similar: Vec<SimilarityEdge>,
}

/// Validated upstream listing item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
}

/// Drop edges whose `similar_external_id` already appeared earlier in the batch.
#[must_use]
pub fn dedup_edges(edges: Vec<NewSimilarityEdge>) -> Vec<NewSimilarityEdge> {
    let mut seen = std::collections::HashSet::new();
    edges.into_iter().filter(|e| seen.insert(e.similar_external_id)).collect()
}
