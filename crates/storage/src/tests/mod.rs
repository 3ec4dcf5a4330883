//! Test utilities and module declarations for storage tests.

use crate::Storage;
use recipe_cache_core::{NewRecipe, NewSimilarityEdge};
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn listing(external_id: i64, title: &str) -> NewRecipe {
    NewRecipe {
        external_id: Some(external_id),
        title: title.to_owned(),
        image: Some(format!("https://img.example/{external_id}.jpg")),
        instructions: String::new(),
        ingredients: String::new(),
        cached: true,
    }
}

pub fn edge(owner_recipe_id: i64, similar_external_id: i64) -> NewSimilarityEdge {
    NewSimilarityEdge {
        owner_recipe_id,
        similar_external_id,
        title: format!("Similar {similar_external_id}"),
        image: None,
    }
}

mod recipe_tests;
