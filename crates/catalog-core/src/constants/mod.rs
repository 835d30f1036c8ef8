// ABOUTME: Application constants for the recipe catalog
// ABOUTME: Collection names, store timeouts, fixture defaults, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Logical collection names in the document store
pub mod collections {
    /// Recipe documents
    pub const RECIPES: &str = "recipes";
    /// Ingredient documents
    pub const INGREDIENTS: &str = "ingredients";
}

/// Document field names shared by every backend
pub mod fields {
    /// Primary key field of every document
    pub const ID: &str = "_id";
    /// Name field of recipes and ingredients
    pub const NAME: &str = "name";
    /// Category field of recipes
    pub const CATEGORY: &str = "category";
}

/// Store call time budgets
pub mod timeouts {
    /// Point lookups, inserts, replaces, and deletes
    pub const POINT_OPERATION_SECS: u64 = 5;
    /// Full-collection scans
    pub const SCAN_OPERATION_SECS: u64 = 30;
}

/// Database defaults
pub mod database {
    /// Default connection URL when `DATABASE_URL` is unset
    pub const DEFAULT_URL: &str = "sqlite:./data/catalog.db";
    /// Default SQLite pool size
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
}

/// Fixture file defaults
pub mod fixtures {
    /// Default directory holding fixture files
    pub const DEFAULT_DIR: &str = "./data";
    /// Ingredient fixture file name
    pub const INGREDIENTS_FILE: &str = "ingredients.json";
    /// Recipe fixture file name
    pub const RECIPES_FILE: &str = "recipes.json";
}

/// Environment variable names
pub mod env_config {
    /// Store connection URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Point operation timeout override (seconds)
    pub const STORE_POINT_TIMEOUT_SECS: &str = "STORE_POINT_TIMEOUT_SECS";
    /// Scan operation timeout override (seconds)
    pub const STORE_SCAN_TIMEOUT_SECS: &str = "STORE_SCAN_TIMEOUT_SECS";
    /// SQLite pool size override
    pub const SQLITE_MAX_CONNECTIONS: &str = "SQLITE_MAX_CONNECTIONS";
    /// Fixture directory override
    pub const FIXTURE_DIR: &str = "FIXTURE_DIR";
}

/// Service names for structured logging
pub mod service_names {
    /// Name reported by the catalog in startup logs
    pub const RECIPE_CATALOG: &str = "recipe-catalog";
}
