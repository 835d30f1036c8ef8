// ABOUTME: Main library entry point for the recipe catalog data-access layer
// ABOUTME: Resolves recipes across collections, merges sparse updates, and seeds fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Catalog
//!
//! Data-access layer for a recipe catalog kept in a schema-less document
//! store. Recipes and ingredients live in two collections linked only by
//! identifiers; this crate supplies the relational behavior the store lacks.
//!
//! ## Features
//!
//! - **Resolution**: one batch fetch joins a recipe's ingredient references
//!   and re-attaches per-usage metadata in reference order
//! - **Partial updates**: sparse payloads are merged into full replacement
//!   documents before write-back
//! - **Dedup guard**: ingredient creation rejects names that already exist
//! - **Fixtures**: bulk import with caller-supplied ids for stable reference graphs
//!
//! ## Architecture
//!
//! - **Database**: `EntityStore` trait, filters, and the timeout-bounded `CatalogStore` handle
//! - **Database plugins**: in-memory and SQLite document backends behind a factory
//! - **Services**: ingredient, recipe, resolution, merge, and fixture operations
//! - **Config**: environment-only configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_catalog::database::CatalogStore;
//! use recipe_catalog::errors::AppResult;
//! use recipe_catalog::services::RecipesManager;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = CatalogStore::in_memory();
//!     let recipes = RecipesManager::new(store);
//!
//!     let resolved = recipes.resolve("64b7f0c2a1e4d3b2c1a09f8e").await;
//!     assert!(resolved.is_err());
//!     Ok(())
//! }
//! ```

/// Environment-only configuration
pub mod config;

/// Entity store abstraction and the shared store handle
pub mod database;

/// Document store backends and the backend factory
pub mod database_plugins;

/// Unified error handling re-exported from `catalog-core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Catalog operations
pub mod services;

/// Catalog data models re-exported from `catalog-core`
pub mod models {
    pub use catalog_core::models::*;
}

/// Application constants re-exported from `catalog-core`
pub mod constants {
    pub use catalog_core::constants::*;
}
