//! One-shot query commands. Output is pretty JSON on stdout in the same
//! shapes the HTTP API returns.

use anyhow::Result;
use recipe_cache_core::split_list;
use recipe_cache_http::{RecipeResponse, SimilarRecipesResponse, StatsResponse};
use recipe_cache_service::RecipeService;
use recipe_cache_storage::StatsStore;
use recipe_cache_upstream::SpoonacularClient;
use std::sync::Arc;

use crate::{open_storage, upstream_config};

async fn recipe_service() -> Result<RecipeService> {
    let upstream = SpoonacularClient::new(upstream_config()?)?;
    let storage = open_storage().await?;
    Ok(RecipeService::new(Arc::new(storage), Arc::new(upstream)))
}

pub(crate) async fn run_search(title: &str, number: usize) -> Result<()> {
    let service = recipe_service().await?;
    let recipes: Vec<RecipeResponse> = service
        .search_by_title(title, number)
        .await?
        .into_iter()
        .map(RecipeResponse::from)
        .collect();
    println!("{}", serde_json::to_string_pretty(&recipes)?);
    Ok(())
}

pub(crate) async fn run_similar(title: &str, number: usize) -> Result<()> {
    let service = recipe_service().await?;
    let found = SimilarRecipesResponse::from(service.similar_recipes(title, number).await?);
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(())
}

pub(crate) async fn run_ingredients(raw: &str, number: usize) -> Result<()> {
    let ingredients = split_list(raw);
    if ingredients.is_empty() {
        anyhow::bail!("at least one ingredient is required");
    }
    let service = recipe_service().await?;
    let value = service.search_by_ingredients(&ingredients, number).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub(crate) async fn run_stats() -> Result<()> {
    let storage = open_storage().await?;
    let stats = StatsResponse::new(storage.kind(), storage.get_stats().await?);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
