//! Response types (Serialize)

use recipe_cache_core::{Recipe, RecipeWithSimilar, SimilarityEdge};
use recipe_cache_storage::StorageStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: i64,
    pub external_id: Option<i64>,
    pub title: String,
    pub image: Option<String>,
    pub instructions: String,
    pub ingredients: String,
    pub cached: bool,
}

impl From<Recipe> for RecipeResponse {
    fn from(r: Recipe) -> Self {
        Self {
            id: r.id,
            external_id: r.external_id,
            title: r.title,
            image: r.image,
            instructions: r.instructions,
            ingredients: r.ingredients,
            cached: r.cached,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarItemResponse {
    pub external_id: i64,
    pub title: String,
    pub image: Option<String>,
}

impl From<SimilarityEdge> for SimilarItemResponse {
    fn from(e: SimilarityEdge) -> Self {
        Self { external_id: e.similar_external_id, title: e.title, image: e.image }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarRecipesResponse {
    pub external_id: Option<i64>,
    pub title: String,
    pub image: Option<String>,
    pub ingredients: String,
    pub similar: Vec<SimilarItemResponse>,
}

impl From<RecipeWithSimilar> for SimilarRecipesResponse {
    fn from(r: RecipeWithSimilar) -> Self {
        Self {
            external_id: r.recipe.external_id,
            title: r.recipe.title,
            image: r.recipe.image,
            ingredients: r.recipe.ingredients,
            similar: r.similar.into_iter().map(SimilarItemResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub backend: String,
    pub recipes: u64,
    pub cached_recipes: u64,
    pub similarity_edges: u64,
}

impl StatsResponse {
    pub fn new(backend: &str, stats: StorageStats) -> Self {
        Self {
            backend: backend.to_owned(),
            recipes: stats.recipes,
            cached_recipes: stats.cached_recipes,
            similarity_edges: stats.similarity_edges,
        }
    }
}
