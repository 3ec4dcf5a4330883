#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use recipe_cache_core::{NewRecipe, Recipe, RecipeSummary};
use recipe_cache_service::{RecipeService, ServiceError};
use recipe_cache_storage::{RecipeStore, StatsStore, StorageBackend};
use recipe_cache_upstream::{RecipeProvider, UpstreamError};
use tempfile::TempDir;

/// Scripted provider that counts calls per operation.
#[derive(Default)]
struct FakeProvider {
    listings: Mutex<Vec<RecipeSummary>>,
    similar: Mutex<Vec<RecipeSummary>>,
    ingredients: Mutex<serde_json::Value>,
    fail: bool,
    title_calls: AtomicUsize,
    similar_calls: AtomicUsize,
    ingredient_calls: AtomicUsize,
}

impl FakeProvider {
    fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    fn unavailable() -> UpstreamError {
        UpstreamError::HttpStatus { code: 503, body: "down".to_owned() }
    }
}

#[async_trait]
impl RecipeProvider for FakeProvider {
    async fn search_by_title(
        &self,
        _query: &str,
        count: usize,
    ) -> Result<Vec<RecipeSummary>, UpstreamError> {
        self.title_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::unavailable());
        }
        Ok(self.listings.lock().unwrap().iter().take(count).cloned().collect())
    }

    async fn search_by_ingredients(
        &self,
        _ingredients: &[String],
        _count: usize,
    ) -> Result<serde_json::Value, UpstreamError> {
        self.ingredient_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::unavailable());
        }
        Ok(self.ingredients.lock().unwrap().clone())
    }

    async fn similar_to(
        &self,
        _external_id: i64,
        _count: usize,
    ) -> Result<Vec<RecipeSummary>, UpstreamError> {
        self.similar_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::unavailable());
        }
        Ok(self.similar.lock().unwrap().clone())
    }
}

fn summary(id: i64, title: &str) -> RecipeSummary {
    RecipeSummary { id, title: title.to_owned(), image: Some(format!("https://img/{id}.jpg")) }
}

fn external_ids(recipes: &[Recipe]) -> Vec<Option<i64>> {
    recipes.iter().map(|r| r.external_id).collect()
}

struct Harness {
    service: RecipeService,
    storage: Arc<StorageBackend>,
    provider: Arc<FakeProvider>,
    _dir: TempDir,
}

fn harness(provider: FakeProvider) -> Harness {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(StorageBackend::new_sqlite(&dir.path().join("recipes.db"), 4).unwrap());
    let provider = Arc::new(provider);
    let service = RecipeService::new(Arc::clone(&storage), provider.clone());
    Harness { service, storage, provider, _dir: dir }
}

#[tokio::test]
async fn search_by_title_is_idempotent() {
    let h = harness(FakeProvider::default());
    *h.provider.listings.lock().unwrap() = vec![summary(1, "Pasta One"), summary(2, "Pasta Two")];

    let first = h.service.search_by_title("pasta", 5).await.unwrap();
    let second = h.service.search_by_title("pasta", 5).await.unwrap();

    assert_eq!(external_ids(&first), vec![Some(1), Some(2)]);
    assert_eq!(external_ids(&second), external_ids(&first));
    assert_eq!(h.storage.get_stats().await.unwrap().recipes, 2);
    assert_eq!(h.provider.title_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn search_by_title_unions_local_and_upstream() {
    let h = harness(FakeProvider::default());
    let stored = h
        .storage
        .upsert_recipe(&NewRecipe {
            external_id: Some(42),
            title: "Pasta Carbonara".to_owned(),
            image: None,
            instructions: "Whisk eggs.".to_owned(),
            ingredients: String::new(),
            cached: false,
        })
        .await
        .unwrap();
    *h.provider.listings.lock().unwrap() = vec![summary(42, "Pasta Carbonara"), summary(7, "Pasta Salad")];

    let results = h.service.search_by_title("pasta", 5).await.unwrap();

    assert_eq!(external_ids(&results), vec![Some(42), Some(7)]);
    assert_eq!(results[0].id, stored.id);
    assert_eq!(results[0].instructions, "Whisk eggs.");
    assert_eq!(results[0].image.as_deref(), Some("https://img/42.jpg"));
}

#[tokio::test]
async fn search_by_title_caps_upstream_results_at_limit() {
    let h = harness(FakeProvider::default());
    *h.provider.listings.lock().unwrap() = (1..=4).map(|i| summary(i, "Soup")).collect();

    let results = h.service.search_by_title("soup", 2).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn empty_upstream_is_not_found_for_every_operation() {
    let h = harness(FakeProvider::default());

    let title = h.service.search_by_title("nothing", 5).await.unwrap_err();
    assert!(matches!(title, ServiceError::NotFound(_)), "{title:?}");

    let similar = h.service.similar_recipes("nothing", 5).await.unwrap_err();
    assert!(matches!(similar, ServiceError::NotFound(_)), "{similar:?}");

    *h.provider.ingredients.lock().unwrap() = serde_json::json!([]);
    let ingredients =
        h.service.search_by_ingredients(&["kale".to_owned()], 5).await.unwrap_err();
    assert!(matches!(ingredients, ServiceError::NotFound(_)), "{ingredients:?}");

    assert_eq!(h.storage.get_stats().await.unwrap().recipes, 0);
}

#[tokio::test]
async fn similar_with_no_similar_items_is_not_found() {
    let h = harness(FakeProvider::default());
    *h.provider.listings.lock().unwrap() = vec![summary(5, "Lasagna")];

    let err = h.service.similar_recipes("lasagna", 3).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)), "{err:?}");
    assert_eq!(h.provider.similar_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn similar_cold_path_persists_edges() {
    let h = harness(FakeProvider::default());
    *h.provider.listings.lock().unwrap() = vec![summary(5, "Lasagna"), summary(6, "Lasagna Soup")];
    *h.provider.similar.lock().unwrap() = (10..15).map(|i| summary(i, "Cousin")).collect();

    let saved = h.service.similar_recipes("lasagna", 3).await.unwrap();

    assert_eq!(saved.recipe.external_id, Some(5));
    let similar: Vec<_> = saved.similar.iter().map(|e| e.similar_external_id).collect();
    assert_eq!(similar, vec![10, 11, 12]);
    assert_eq!(h.provider.title_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.provider.similar_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.storage.get_stats().await.unwrap().similarity_edges, 3);
}

#[tokio::test]
async fn similar_fast_path_skips_upstream() {
    let h = harness(FakeProvider::default());
    *h.provider.listings.lock().unwrap() = vec![summary(5, "Lasagna")];
    *h.provider.similar.lock().unwrap() = vec![summary(10, "Cousin"), summary(11, "Other")];
    let cold = h.service.similar_recipes("lasagna", 5).await.unwrap();

    let warm = h.service.similar_recipes("LASAGNA", 5).await.unwrap();

    assert_eq!(warm, cold);
    assert_eq!(h.provider.title_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.provider.similar_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn similar_dedups_repeated_upstream_items() {
    let h = harness(FakeProvider::default());
    *h.provider.listings.lock().unwrap() = vec![summary(5, "Lasagna")];
    *h.provider.similar.lock().unwrap() =
        vec![summary(10, "Cousin"), summary(10, "Cousin again"), summary(11, "Other")];

    let saved = h.service.similar_recipes("lasagna", 5).await.unwrap();

    assert_eq!(saved.similar.len(), 2);
    assert_eq!(saved.similar[0].title, "Cousin");
}

#[tokio::test]
async fn similar_reuses_local_owner_without_edges() {
    let h = harness(FakeProvider::default());
    *h.provider.listings.lock().unwrap() = vec![summary(5, "Lasagna")];
    let searched = h.service.search_by_title("lasagna", 5).await.unwrap();
    *h.provider.similar.lock().unwrap() = vec![summary(10, "Cousin")];

    let saved = h.service.similar_recipes("lasagna", 5).await.unwrap();

    assert_eq!(saved.recipe.id, searched[0].id);
    assert_eq!(h.storage.get_stats().await.unwrap().recipes, 1);
}

#[tokio::test]
async fn upstream_failure_is_unavailable() {
    let h = harness(FakeProvider::failing());

    let err = h.service.search_by_title("pasta", 5).await.unwrap_err();
    assert!(matches!(err, ServiceError::UpstreamUnavailable(_)), "{err:?}");

    let err = h.service.similar_recipes("pasta", 5).await.unwrap_err();
    assert!(matches!(err, ServiceError::UpstreamUnavailable(_)), "{err:?}");

    let err = h.service.search_by_ingredients(&["egg".to_owned()], 5).await.unwrap_err();
    assert!(matches!(err, ServiceError::UpstreamUnavailable(_)), "{err:?}");
}

#[tokio::test]
async fn ingredients_pass_through_without_persisting() {
    let h = harness(FakeProvider::default());
    let payload = serde_json::json!([{"id": 1, "title": "Apple Pie", "usedIngredientCount": 1}]);
    *h.provider.ingredients.lock().unwrap() = payload.clone();

    let value = h
        .service
        .search_by_ingredients(&[" apples ".to_owned(), String::new()], 5)
        .await
        .unwrap();

    assert_eq!(value, payload);
    assert_eq!(h.storage.get_stats().await.unwrap().recipes, 0);
}

#[tokio::test]
async fn blank_input_is_rejected_before_upstream() {
    let h = harness(FakeProvider::default());

    let err = h.service.search_by_title("  ", 5).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)), "{err:?}");

    let err = h.service.search_by_ingredients(&[" ".to_owned()], 5).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)), "{err:?}");

    assert_eq!(h.provider.title_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.provider.ingredient_calls.load(Ordering::SeqCst), 0);
}
