//! HTTP API server for recipe-cache.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use recipe_cache_service::RecipeService;

pub use response_types::{
    RecipeResponse, SimilarItemResponse, SimilarRecipesResponse, StatsResponse, VersionResponse,
};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub recipe_service: Arc<RecipeService>,
}

pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/stats", get(handlers::recipes::stats))
        .route("/recipes/search/{title}", get(handlers::recipes::search_by_title))
        .route("/recipes/ingredients", get(handlers::recipes::search_by_ingredients))
        .route("/recipes/ingredients/", get(handlers::recipes::search_by_ingredients))
        .route("/recipes/{id}/similar_recipes", get(handlers::recipes::similar_recipes))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// CORS restricted to the configured origins. Origins that are not valid
/// header values are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            },
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
