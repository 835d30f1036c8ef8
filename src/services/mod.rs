// ABOUTME: Catalog operations layered over the shared entity store
// ABOUTME: Ingredient dedup guard, recipe resolution and partial update, and fixture import
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Catalog service layer
//!
//! Every manager holds a clone of the same [`crate::database::CatalogStore`],
//! so operations share one backend and one set of call budgets. Pure logic
//! (pairing references with ingredients, merging updates) lives in its own
//! modules and never touches the store.

/// Fixture import with caller-supplied ids
pub mod fixtures;
/// Ingredient operations and the dedup guard
pub mod ingredients;
/// Sparse update merging
pub mod merge;
/// Recipe operations
pub mod recipes;
/// Reference/metadata pairing for resolved recipes
pub mod resolution;

pub use fixtures::{FixtureImporter, FixtureRecord, ImportReport};
pub use ingredients::IngredientsManager;
pub use merge::{merge_recipe, override_names, NameBindings};
pub use recipes::RecipesManager;
pub use resolution::pair_ingredients;
