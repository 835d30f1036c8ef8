// ABOUTME: Integration tests for the SQLite document store backend
// ABOUTME: Runs catalog operations against file-backed and in-memory SQLite databases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::init_test_logging;
use recipe_catalog::config::{DatabaseConfig, DatabaseUrl};
use recipe_catalog::database::{CatalogStore, Collection, EntityStore, Filter, StoreTimeouts};
use recipe_catalog::database_plugins::{Database, DatabaseType, MemoryStore, SqliteStore};
use recipe_catalog::errors::ErrorKind;
use recipe_catalog::models::{Category, IngredientMeta, NewIngredient, NewRecipe, RecipeUpdate};
use recipe_catalog::services::{IngredientsManager, RecipesManager};
use serde_json::{json, Value};
use tempfile::TempDir;

async fn sqlite_store() -> Result<CatalogStore> {
    init_test_logging();
    let database = Database::from_url("sqlite::memory:").await?;
    assert_eq!(database.database_type(), DatabaseType::SQLite);
    Ok(database.into_store(StoreTimeouts::default()))
}

fn document(value: Value) -> recipe_catalog::database::Document {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("test documents are objects"),
    }
}

#[tokio::test]
async fn test_catalog_round_trip_on_sqlite() -> Result<()> {
    let store = sqlite_store().await?;
    let ingredients = IngredientsManager::new(store.clone());
    let recipes = RecipesManager::new(store);

    let flour = ingredients.create(NewIngredient::named("flour")).await?;
    let eggs = ingredients.create(NewIngredient::named("eggs")).await?;
    assert_eq!(
        ingredients
            .create(NewIngredient::named("flour"))
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::Conflict
    );

    let recipe = recipes
        .create(NewRecipe {
            name: "Crepes".to_owned(),
            description: None,
            category: Category::Dessert,
            steps: vec!["whisk".to_owned()],
            ingredient_refs: vec![eggs.id, flour.id],
            ingredients_meta: vec![IngredientMeta::new(2.0, "piece"), IngredientMeta::new(1.0, "cup")],
        })
        .await?;

    let resolved = recipes.resolve(&recipe.id.to_hex()).await?;
    assert_eq!(resolved.ingredients, vec![eggs.clone(), flour.clone()]);

    let update = RecipeUpdate {
        category: Some(Category::MainCourse),
        ..RecipeUpdate::default()
    };
    let updated = recipes.update(&recipe.id.to_hex(), &update).await?;
    assert_eq!(recipes.get(&recipe.id.to_hex()).await?, updated);
    assert_eq!(recipes.list_by_category(Category::MainCourse).await?.len(), 1);
    assert!(recipes.list_by_category(Category::Dessert).await?.is_empty());

    ingredients.delete(&eggs.id.to_hex()).await?;
    let degraded = recipes.resolve(&recipe.id.to_hex()).await?;
    assert_eq!(degraded.missing_ingredients, vec![eggs.id]);
    assert_eq!(degraded.ingredients_meta, vec![IngredientMeta::new(1.0, "cup")]);
    Ok(())
}

#[tokio::test]
async fn test_file_database_persists_across_connections() -> Result<()> {
    init_test_logging();
    let dir = TempDir::new()?;
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("catalog.db"),
    };
    let config = DatabaseConfig::with_url(url);

    let created = {
        let store = Database::new(&config).await?.into_store(config.timeouts());
        IngredientsManager::new(store)
            .create(NewIngredient::named("flour"))
            .await?
    };

    let store = Database::new(&config).await?.into_store(config.timeouts());
    let reopened = IngredientsManager::new(store);
    assert_eq!(reopened.get(&created.id.to_hex()).await?, created);
    Ok(())
}

#[tokio::test]
async fn test_filters_compile_to_json_predicates() -> Result<()> {
    init_test_logging();
    let store = SqliteStore::new("sqlite::memory:", 1).await?;

    store
        .insert_one(
            Collection::Recipes,
            document(json!({"name": "Tea", "category": "DRINK", "hot": true, "serves": 2})),
        )
        .await?;
    store
        .insert_one(
            Collection::Recipes,
            document(json!({"name": "Cake", "category": "DESSERT", "serves": 8})),
        )
        .await?;

    let hot = store
        .find_many(Collection::Recipes, &Filter::eq("hot", true))
        .await?;
    assert_eq!(hot.len(), 1);

    let unflagged = store
        .find_many(Collection::Recipes, &Filter::eq("hot", Value::Null))
        .await?;
    assert_eq!(unflagged[0].get("name"), Some(&Value::from("Cake")));

    let both = store
        .find_many(
            Collection::Recipes,
            &Filter::all().and_in("serves", [2, 8]),
        )
        .await?;
    assert_eq!(both.len(), 2);

    let none = store
        .find_many(Collection::Recipes, &Filter::by_ids(&[]))
        .await?;
    assert!(none.is_empty());

    let other_collection = store
        .find_many(Collection::Ingredients, &Filter::all())
        .await?;
    assert!(other_collection.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_backends_agree_on_numeric_equality() -> Result<()> {
    init_test_logging();
    let sqlite = SqliteStore::new("sqlite::memory:", 1).await?;
    let memory = MemoryStore::new();
    let backends: [&dyn EntityStore; 2] = [&sqlite, &memory];

    for backend in backends {
        backend
            .insert_one(
                Collection::Ingredients,
                document(json!({"name": "milk", "quantity": 2.0})),
            )
            .await?;

        let integer = backend
            .find_many(Collection::Ingredients, &Filter::eq("quantity", 2))
            .await?;
        assert_eq!(integer.len(), 1);

        let listed = backend
            .find_many(
                Collection::Ingredients,
                &Filter::all().and_in("quantity", [1, 2]),
            )
            .await?;
        assert_eq!(listed.len(), 1);

        let other = backend
            .find_many(Collection::Ingredients, &Filter::eq("quantity", 2.5))
            .await?;
        assert!(other.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn test_duplicate_id_maps_to_duplicate_key() -> Result<()> {
    init_test_logging();
    let store = SqliteStore::new("sqlite::memory:", 1).await?;
    let record = document(json!({"_id": "65a1f0c2a1e4d3b2c1a00001", "name": "flour"}));

    store
        .insert_one(Collection::Ingredients, record.clone())
        .await?;
    let error = store
        .insert_one(Collection::Ingredients, record.clone())
        .await
        .unwrap_err();
    assert!(error.is_duplicate_key());

    // Same id in another collection is a different key
    store.insert_one(Collection::Recipes, record).await?;
    Ok(())
}
