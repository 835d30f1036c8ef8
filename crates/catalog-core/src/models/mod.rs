// ABOUTME: Catalog data models shared by the store, the engines, and the HTTP collaborator
// ABOUTME: Re-exports identifiers, ingredients, recipes, sparse updates, and payload decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod ingredient;
mod object_id;
mod patch;
mod recipe;
mod update;

pub use ingredient::{Ingredient, NewIngredient};
pub use object_id::{ObjectId, ObjectIdError};
pub use patch::Patch;
pub use recipe::{Category, IngredientMeta, NewRecipe, Recipe, ResolvedRecipe};
pub use update::{IngredientUsageUpdate, RecipeUpdate};

use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;

/// Decode a JSON request body into a typed catalog input
///
/// # Errors
///
/// Returns an invalid-argument error describing the first decoding problem
/// (bad JSON, unknown category, malformed identifier, wrong field type)
pub fn decode_payload<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        AppError::invalid_format(format!("Malformed payload: {e}"))
            .with_details(serde_json::json!({ "line": e.line(), "column": e.column() }))
    })
}
