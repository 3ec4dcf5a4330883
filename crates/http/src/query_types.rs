//! Request/query types (Deserialize)

use recipe_cache_core::{DEFAULT_RESULT_COUNT, MAX_RESULT_COUNT};
use serde::Deserialize;

use crate::api_error::ApiError;

/// Resolve `number`: default when absent, rejected below 1, capped above.
pub fn result_count(number: Option<i64>) -> Result<usize, ApiError> {
    match number {
        None => Ok(DEFAULT_RESULT_COUNT),
        Some(n) if n < 1 => Err(ApiError::BadRequest(format!("number must be at least 1, got {n}"))),
        Some(n) => Ok(usize::try_from(n).unwrap_or(MAX_RESULT_COUNT).min(MAX_RESULT_COUNT)),
    }
}

#[derive(Debug, Deserialize)]
pub struct NumberQuery {
    pub number: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct IngredientsQuery {
    #[serde(default)]
    pub ingredients: String,
    pub number: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    pub title: Option<String>,
    pub number: Option<i64>,
}
