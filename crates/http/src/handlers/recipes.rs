use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use recipe_cache_core::split_list;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{IngredientsQuery, NumberQuery, SimilarQuery, result_count};
use crate::response_types::{RecipeResponse, SimilarRecipesResponse, StatsResponse};

pub async fn search_by_title(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
    query: Result<Query<NumberQuery>, QueryRejection>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let Query(query) = query?;
    let number = result_count(query.number)?;
    let recipes = state.recipe_service.search_by_title(&title, number).await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

pub async fn search_by_ingredients(
    State(state): State<Arc<AppState>>,
    query: Result<Query<IngredientsQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(query) = query?;
    let number = result_count(query.number)?;
    let ingredients = split_list(&query.ingredients);
    if ingredients.is_empty() {
        return Err(ApiError::BadRequest("ingredients must list at least one item".to_owned()));
    }
    let value = state.recipe_service.search_by_ingredients(&ingredients, number).await?;
    Ok(Json(value))
}

/// The `{id}` segment is part of the public route but lookups go by title.
pub async fn similar_recipes(
    State(state): State<Arc<AppState>>,
    Path(_id): Path<String>,
    query: Result<Query<SimilarQuery>, QueryRejection>,
) -> Result<Json<SimilarRecipesResponse>, ApiError> {
    let Query(query) = query?;
    let number = result_count(query.number)?;
    let title = query
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("title query parameter is required".to_owned()))?;
    let found = state.recipe_service.similar_recipes(&title, number).await?;
    Ok(Json(found.into()))
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.recipe_service.stats().await?;
    Ok(Json(StatsResponse::new(state.recipe_service.storage().kind(), stats)))
}
