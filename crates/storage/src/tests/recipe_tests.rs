#![expect(clippy::unwrap_used, reason = "test code")]

use recipe_cache_core::NewRecipe;

use super::{create_test_storage, listing};

#[test]
fn upsert_assigns_id_and_returns_row() {
    let (storage, _dir) = create_test_storage();
    let saved = storage.upsert_recipe(&listing(716_429, "Pasta with Garlic")).unwrap();

    assert!(saved.id > 0);
    assert_eq!(saved.external_id, Some(716_429));
    assert_eq!(saved.title, "Pasta with Garlic");
    assert!(saved.cached);
    assert!(saved.instructions.is_empty());
}

#[test]
fn upsert_same_external_id_keeps_single_row() {
    let (storage, _dir) = create_test_storage();
    let first = storage.upsert_recipe(&listing(42, "Pasta")).unwrap();
    let second = storage.upsert_recipe(&listing(42, "Pasta (renamed upstream)")).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "Pasta", "identity fields are never overwritten");
    assert_eq!(storage.get_stats().unwrap().recipes, 1);
}

#[test]
fn upsert_fills_empty_fields_but_keeps_existing_ones() {
    let (storage, _dir) = create_test_storage();
    let bare = NewRecipe {
        external_id: Some(7),
        title: "Lasagna".to_owned(),
        image: None,
        instructions: String::new(),
        ingredients: "pasta sheets".to_owned(),
        cached: true,
    };
    storage.upsert_recipe(&bare).unwrap();

    let enriched = NewRecipe {
        image: Some("lasagna.jpg".to_owned()),
        instructions: "Layer and bake.".to_owned(),
        ingredients: "something else".to_owned(),
        cached: false,
        ..bare
    };
    let merged = storage.upsert_recipe(&enriched).unwrap();

    assert_eq!(merged.image.as_deref(), Some("lasagna.jpg"));
    assert_eq!(merged.instructions, "Layer and bake.");
    assert_eq!(merged.ingredients, "pasta sheets");
    assert!(merged.cached, "cached flag is left as first stored");
}

#[test]
fn recipes_without_external_id_are_independent_rows() {
    let (storage, _dir) = create_test_storage();
    let local = NewRecipe {
        external_id: None,
        title: "Grandma's soup".to_owned(),
        image: None,
        instructions: String::new(),
        ingredients: String::new(),
        cached: false,
    };
    let a = storage.upsert_recipe(&local).unwrap();
    let b = storage.upsert_recipe(&local).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(storage.get_stats().unwrap().recipes, 2);
}

#[test]
fn find_by_title_is_case_insensitive_and_ordered() {
    let (storage, _dir) = create_test_storage();
    storage.upsert_recipe(&listing(1, "Creamy PASTA bake")).unwrap();
    storage.upsert_recipe(&listing(2, "Tomato soup")).unwrap();
    storage.upsert_recipe(&listing(3, "pasta primavera")).unwrap();

    let found = storage.find_recipes_by_title("Pasta", 10).unwrap();
    let ids: Vec<_> = found.iter().map(|r| r.external_id).collect();
    assert_eq!(ids, vec![Some(1), Some(3)]);
}

#[test]
fn find_by_title_folds_non_ascii_case() {
    let (storage, _dir) = create_test_storage();
    storage.upsert_recipe(&listing(1, "Éclair au Chocolat")).unwrap();
    storage.upsert_recipe(&listing(2, "ŻUREK soup")).unwrap();

    for fragment in ["éclair", "ÉCLAIR", "Éclair", "CHOCOLAT"] {
        let found = storage.find_recipes_by_title(fragment, 10).unwrap();
        assert_eq!(found.len(), 1, "fragment {fragment:?}");
        assert_eq!(found[0].external_id, Some(1));
    }
    let found = storage.find_recipes_by_title("żurek", 10).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].external_id, Some(2));
}

#[test]
fn find_by_title_respects_limit() {
    let (storage, _dir) = create_test_storage();
    for i in 0..5 {
        storage.upsert_recipe(&listing(i, &format!("Pasta #{i}"))).unwrap();
    }
    let found = storage.find_recipes_by_title("pasta", 2).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].external_id, Some(0));
}

#[test]
fn find_by_title_treats_like_wildcards_literally() {
    let (storage, _dir) = create_test_storage();
    storage.upsert_recipe(&listing(1, "100% rye bread")).unwrap();
    storage.upsert_recipe(&listing(2, "1000 island dressing")).unwrap();

    let found = storage.find_recipes_by_title("100%", 10).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].external_id, Some(1));

    assert!(storage.find_recipes_by_title("_", 10).unwrap().is_empty());
}

#[test]
fn find_by_external_id_hit_and_miss() {
    let (storage, _dir) = create_test_storage();
    storage.upsert_recipe(&listing(99, "Chili")).unwrap();

    assert_eq!(storage.find_recipe_by_external_id(99).unwrap().unwrap().title, "Chili");
    assert!(storage.find_recipe_by_external_id(100).unwrap().is_none());
}

#[test]
fn upsert_batch_preserves_input_order_and_dedups() {
    let (storage, _dir) = create_test_storage();
    storage.upsert_recipe(&listing(2, "Existing")).unwrap();

    let saved = storage
        .upsert_recipes(&[listing(3, "Three"), listing(2, "Two"), listing(3, "Three again")])
        .unwrap();

    let ids: Vec<_> = saved.iter().map(|r| r.external_id).collect();
    assert_eq!(ids, vec![Some(3), Some(2), Some(3)]);
    assert_eq!(saved[0].id, saved[2].id);
    assert_eq!(saved[1].title, "Existing");
    assert_eq!(storage.get_stats().unwrap().recipes, 2);
}

#[test]
fn list_recipes_pages_in_insertion_order() {
    let (storage, _dir) = create_test_storage();
    for i in 10..15 {
        storage.upsert_recipe(&listing(i, "Dish")).unwrap();
    }
    let page = storage.list_recipes(2, 2).unwrap();
    let ids: Vec<_> = page.iter().map(|r| r.external_id).collect();
    assert_eq!(ids, vec![Some(12), Some(13)]);
}
