//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=... cargo test -p recipe-cache-storage --features postgres -- --ignored pg_

#![cfg(feature = "postgres")]
#![allow(clippy::unwrap_used, reason = "integration test code")]

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use recipe_cache_core::{NewRecipe, NewSimilarityEdge};
use recipe_cache_storage::{PgStorage, RecipeStore, SimilarityStore};

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

/// External ids far outside the provider's range so reruns never collide.
fn unique_external_id() -> i64 {
    static NEXT: AtomicI64 = AtomicI64::new(0);
    let nanos = i64::try_from(
        std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_nanos()
            % 1_000_000_000_000,
    )
    .unwrap();
    -(nanos * 100 + NEXT.fetch_add(1, Ordering::Relaxed))
}

fn listing(external_id: i64, title: &str) -> NewRecipe {
    NewRecipe {
        external_id: Some(external_id),
        title: title.to_owned(),
        image: Some("https://img.example/x.jpg".to_owned()),
        instructions: String::new(),
        ingredients: String::new(),
        cached: true,
    }
}

#[tokio::test]
#[ignore]
async fn pg_upsert_is_idempotent() {
    let storage = create_pg_storage().await;
    let ext = unique_external_id();

    let first = storage.upsert_recipe(&listing(ext, "Pg pasta")).await.unwrap();
    let second = storage.upsert_recipe(&listing(ext, "Pg pasta again")).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "Pg pasta");
    let fetched = storage.find_recipe_by_external_id(ext).await.unwrap().unwrap();
    assert_eq!(fetched.id, first.id);
}

#[tokio::test]
#[ignore]
async fn pg_concurrent_upserts_share_one_row() {
    let storage = Arc::new(create_pg_storage().await);
    let ext = unique_external_id();

    let mut handles = vec![];
    for i in 0..10 {
        let storage = Arc::clone(&storage);
        handles.push(tokio::spawn(async move {
            storage.upsert_recipe(&listing(ext, &format!("Race {i}"))).await
        }));
    }
    let mut ids = vec![];
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
}

#[tokio::test]
#[ignore]
async fn pg_similarity_set_dedups_edges() {
    let storage = create_pg_storage().await;
    let ext = unique_external_id();
    let edge = |similar: i64| NewSimilarityEdge {
        owner_recipe_id: 0,
        similar_external_id: similar,
        title: format!("Similar {similar}"),
        image: None,
    };

    let first = storage
        .save_similarity_set(&listing(ext, "Pg lasagna"), &[edge(1), edge(1), edge(2)])
        .await
        .unwrap();
    assert_eq!(first.similar.len(), 2);

    let second =
        storage.save_similarity_set(&listing(ext, "Pg lasagna"), &[edge(2), edge(3)]).await.unwrap();
    assert_eq!(second.recipe.id, first.recipe.id);
    assert_eq!(second.similar.len(), 3);

    let repeated = NewSimilarityEdge { owner_recipe_id: first.recipe.id, ..edge(3) };
    let err = storage.append_similarity_edge(&repeated).await.unwrap_err();
    assert!(err.is_duplicate());
}

#[tokio::test]
#[ignore]
async fn pg_find_by_title_case_insensitive() {
    let storage = create_pg_storage().await;
    let ext = unique_external_id();
    let marker = format!("PgMarker{}", -ext);
    storage.upsert_recipe(&listing(ext, &format!("Spicy {marker} stew"))).await.unwrap();

    let found = storage.find_recipes_by_title(&marker.to_lowercase(), 5).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].external_id, Some(ext));
}

#[tokio::test]
#[ignore]
async fn pg_overlapping_batches_in_opposite_order_both_commit() {
    let storage = Arc::new(create_pg_storage().await);
    for _ in 0..20 {
        let (a, b) = (unique_external_id(), unique_external_id());
        let forward = vec![listing(a, "Pasta A"), listing(b, "Pasta B")];
        let backward = vec![listing(b, "Pasta B"), listing(a, "Pasta A")];

        let first = tokio::spawn({
            let storage = Arc::clone(&storage);
            async move { storage.upsert_recipes(&forward).await }
        });
        let second = tokio::spawn({
            let storage = Arc::clone(&storage);
            async move { storage.upsert_recipes(&backward).await }
        });

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();
        assert_eq!(first[0].external_id, Some(a));
        assert_eq!(second[0].external_id, Some(b));
        assert_eq!(first[0].id, second[1].id);
    }
}
