//! SQLite → PostgreSQL migration command.
//!
//! Copies every recipe and its similarity edges from the local SQLite cache.
//! Idempotent: recipes merge by external id, repeated edges are skipped.

use recipe_cache_core::{NewRecipe, NewSimilarityEdge};
use recipe_cache_storage::{RecipeStore, SimilarityStore, StatsStore, StorageBackend};

const BATCH_SIZE: usize = 500;

pub(crate) async fn run() -> anyhow::Result<()> {
    let sqlite = crate::open_sqlite()?;

    let pg_url = recipe_cache_core::env_first_non_empty(&["DATABASE_URL"])
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set for migration target"))?;
    let pg = StorageBackend::new_postgres(&pg_url).await?;

    println!("Migrating recipes...");
    let mut offset: usize = 0;
    let mut migrated: usize = 0;
    let mut edges_copied: usize = 0;
    let mut skipped: usize = 0;

    loop {
        let page = StatsStore::list_recipes(&sqlite, offset, BATCH_SIZE).await?;
        if page.is_empty() {
            break;
        }
        for recipe in &page {
            let Some(external_id) = recipe.external_id else {
                // No merge key, so a rerun could not tell it was already copied.
                skipped += 1;
                continue;
            };
            let edges: Vec<NewSimilarityEdge> =
                SimilarityStore::find_similarity_edges(&sqlite, recipe.id)
                    .await?
                    .iter()
                    .map(NewSimilarityEdge::from_edge)
                    .collect();
            let owner = NewRecipe::from_recipe(recipe);
            let result = if edges.is_empty() {
                RecipeStore::upsert_recipe(&pg, &owner).await.map(|_| 0)
            } else {
                SimilarityStore::save_similarity_set(&pg, &owner, &edges)
                    .await
                    .map(|saved| saved.similar.len())
            };
            match result {
                Ok(count) => {
                    migrated += 1;
                    edges_copied += count;
                },
                Err(err) => {
                    tracing::warn!(external_id, "Failed to migrate recipe: {err}");
                    skipped += 1;
                },
            }
        }
        let fetched = page.len();
        offset += fetched;
        if fetched < BATCH_SIZE {
            break;
        }
    }
    println!("  recipes: {migrated} migrated, {skipped} skipped (total {offset})");
    println!("  similarity edges: {edges_copied} stored for migrated recipes");

    println!("\nMigration complete!");
    Ok(())
}
