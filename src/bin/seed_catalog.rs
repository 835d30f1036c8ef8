// ABOUTME: Fixture seeding utility for the recipe catalog
// ABOUTME: Imports the ingredient fixture, then the recipe fixture, keeping their ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fixture seeder for the recipe catalog.
//!
//! Ingredients are imported first so recipe fixtures can reference them.
//! Records whose id already exists are skipped, so re-running is safe.
//!
//! Usage:
//! ```bash
//! # Seed from ./data (uses DATABASE_URL from environment)
//! cargo run --bin seed-catalog
//!
//! # Override database URL
//! cargo run --bin seed-catalog -- --database-url sqlite:./data/catalog.db
//!
//! # Custom fixture files with verbose output
//! cargo run --bin seed-catalog -- --ingredients fixtures/i.json --recipes fixtures/r.json -v
//! ```

use anyhow::Result;
use clap::Parser;
use recipe_catalog::config::{CatalogConfig, DatabaseUrl};
use recipe_catalog::database_plugins::Database;
use recipe_catalog::logging::LoggingConfig;
use recipe_catalog::services::FixtureImporter;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "Recipe Catalog Fixture Seeder",
    long_about = "Import ingredient and recipe fixtures with their caller-supplied ids"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Ingredient fixture file (defaults to $FIXTURE_DIR/ingredients.json)
    #[arg(long)]
    ingredients: Option<PathBuf>,

    /// Recipe fixture file (defaults to $FIXTURE_DIR/recipes.json)
    #[arg(long)]
    recipes: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    info!("=== Recipe Catalog Fixture Seeder ===");

    let mut config = CatalogConfig::from_env()?;
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }

    info!("Connecting to database: {}", config.database.url);
    let database = Database::new(&config.database).await?;
    let store = database.into_store(config.database.timeouts());
    let importer = FixtureImporter::new(store);

    let ingredients_path = args
        .ingredients
        .unwrap_or_else(|| config.fixtures.ingredients_path());
    let recipes_path = args
        .recipes
        .unwrap_or_else(|| config.fixtures.recipes_path());

    info!("Importing ingredients from {}", ingredients_path.display());
    let ingredients = importer
        .import_ingredients_from_path(&ingredients_path)
        .await?;

    info!("Importing recipes from {}", recipes_path.display());
    let recipes = importer.import_recipes_from_path(&recipes_path).await?;

    info!("");
    info!("=== Seeding Complete ===");
    info!(
        "Ingredients: {} imported, {} skipped",
        ingredients.imported, ingredients.skipped
    );
    info!(
        "Recipes: {} imported, {} skipped",
        recipes.imported, recipes.skipped
    );

    Ok(())
}
