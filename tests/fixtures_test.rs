// ABOUTME: Integration tests for the fixture importer
// ABOUTME: Covers id preservation, all-or-nothing validation, and skipped duplicates on re-import
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{create_test_managers, init_test_logging, InstrumentedStore};
use recipe_catalog::database::{Collection, StoreTimeouts};
use recipe_catalog::errors::{ErrorCode, ErrorKind};
use recipe_catalog::services::FixtureImporter;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const INGREDIENTS: &str = r#"[
    {"_id": "65a1f0c2a1e4d3b2c1a00001", "name": "flour"},
    {"_id": "65a1f0c2a1e4d3b2c1a00002", "name": "sugar"}
]"#;

const RECIPES: &str = r#"[
    {
        "_id": "65a1f0c2a1e4d3b2c1b00001",
        "name": "Shortbread",
        "category": "DESSERT",
        "steps": ["mix", "bake"],
        "ingredients": ["65a1f0c2a1e4d3b2c1a00001", "65a1f0c2a1e4d3b2c1a00002"],
        "ingredients_meta": [{"quantity": 2, "unit": "cup"}, {"quantity": 0.5, "unit": "cup"}]
    }
]"#;

fn fixture_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_import_keeps_ids_and_links_recipes() -> Result<()> {
    let (store, ingredients, recipes) = create_test_managers();
    let importer = FixtureImporter::new(store);

    let ingredient_report = importer.import_ingredients(INGREDIENTS.as_bytes()).await?;
    let recipe_report = importer.import_recipes(RECIPES.as_bytes()).await?;

    assert_eq!(ingredient_report.collection, Collection::Ingredients);
    assert_eq!(ingredient_report.imported, 2);
    assert_eq!(recipe_report.imported, 1);
    assert_eq!(
        ingredients.get("65a1f0c2a1e4d3b2c1a00001").await?.name,
        "flour"
    );

    let resolved = recipes.resolve("65a1f0c2a1e4d3b2c1b00001").await?;
    let names: Vec<_> = resolved.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["flour", "sugar"]);
    Ok(())
}

#[tokio::test]
async fn test_reimport_skips_existing_ids() -> Result<()> {
    let (store, ingredients, _) = create_test_managers();
    let importer = FixtureImporter::new(store);

    importer.import_ingredients(INGREDIENTS.as_bytes()).await?;
    let report = importer.import_ingredients(INGREDIENTS.as_bytes()).await?;

    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped, 2);
    assert_eq!(ingredients.list().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_store_failure_reports_records_already_imported() {
    init_test_logging();
    let double = InstrumentedStore::new().failing_inserts_after(1);
    let importer = FixtureImporter::new(double.clone().into_store(StoreTimeouts::default()));

    let error = importer
        .import_ingredients(INGREDIENTS.as_bytes())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::StorageUnavailable);
    assert_eq!(error.context.details["imported"], 1);
    assert_eq!(error.context.details["skipped"], 0);
    assert_eq!(
        error.context.details["failed_id"],
        "65a1f0c2a1e4d3b2c1a00002"
    );
    assert_eq!(double.backend().count(Collection::Ingredients).await, 1);
}

#[tokio::test]
async fn test_malformed_json_imports_nothing() {
    let (store, ingredients, _) = create_test_managers();
    let importer = FixtureImporter::new(store);

    let error = importer
        .import_ingredients(&br#"[{"_id": "65a1f0c2a1e4d3b2c1a00001", "name": "flour"},"#[..])
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidFormat);
    assert!(ingredients.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_one_invalid_record_rejects_the_batch() {
    let (store, _, recipes) = create_test_managers();
    let importer = FixtureImporter::new(store);
    let batch = r#"[
        {"_id": "65a1f0c2a1e4d3b2c1b00001", "name": "Tea", "category": "DRINK"},
        {"_id": "65a1f0c2a1e4d3b2c1b00002", "name": "Soup", "category": "SOUP"}
    ]"#;

    let error = importer.import_recipes(batch.as_bytes()).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    assert!(recipes.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_misaligned_recipe_rejects_the_batch() {
    let (store, _, recipes) = create_test_managers();
    let importer = FixtureImporter::new(store);
    let batch = r#"[
        {
            "_id": "65a1f0c2a1e4d3b2c1b00001",
            "name": "Toast",
            "category": "APPETIZER",
            "ingredients": ["65a1f0c2a1e4d3b2c1a00001"],
            "ingredients_meta": []
        }
    ]"#;

    let error = importer.import_recipes(batch.as_bytes()).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert!(recipes.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_import_from_files() -> Result<()> {
    let (store, _, recipes) = create_test_managers();
    let importer = FixtureImporter::new(store);
    let ingredient_file = fixture_file(INGREDIENTS);
    let recipe_file = fixture_file(RECIPES);

    importer
        .import_ingredients_from_path(ingredient_file.path())
        .await?;
    let report = importer.import_recipes_from_path(recipe_file.path()).await?;

    assert_eq!(report.imported, 1);
    assert_eq!(recipes.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let (store, _, _) = create_test_managers();
    let importer = FixtureImporter::new(store);

    let error = importer
        .import_ingredients_from_path(Path::new("/nonexistent/ingredients.json"))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_bundled_fixtures_import_cleanly() -> Result<()> {
    let (store, _, recipes) = create_test_managers();
    let importer = FixtureImporter::new(store);
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");

    importer
        .import_ingredients_from_path(&data.join("ingredients.json"))
        .await?;
    let report = importer
        .import_recipes_from_path(&data.join("recipes.json"))
        .await?;

    assert_eq!(report.skipped, 0);
    for recipe in recipes.list().await? {
        let resolved = recipes.resolve(&recipe.id.to_hex()).await?;
        assert!(!resolved.is_degraded(), "{} has dangling references", recipe.name);
    }
    Ok(())
}
