// ABOUTME: Folds a sparse recipe update into the stored recipe
// ABOUTME: Produces the complete replacement document written back by the update operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::{IngredientMeta, IngredientUsageUpdate, ObjectId, Recipe, RecipeUpdate};
use serde_json::json;
use std::collections::HashMap;

/// Ingredient ids for the names an update re-points usages to
pub type NameBindings = HashMap<String, ObjectId>;

/// Ingredient names the update re-points usages to, without duplicates
///
/// Only entries that line up with a stored usage are considered; entries past
/// the stored list are ignored by the merge and need no lookup.
#[must_use]
pub fn override_names(original: &Recipe, update: &RecipeUpdate) -> Vec<String> {
    let mut names: Vec<String> = update
        .ingredients
        .iter()
        .flatten()
        .take(original.ingredient_refs.len())
        .filter_map(|entry| entry.name.clone())
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Merge a sparse update into the original recipe
///
/// Absent fields keep their stored value, `description` follows its patch
/// state, and `steps` is replaced as a whole. Ingredient entries apply by
/// index: entry `i` may re-point usage `i` at another ingredient, by id or by
/// a name looked up in `bindings`, and override its quantity or unit. Entries
/// past the stored list are ignored, so both lists keep their stored length.
///
/// # Errors
///
/// Returns an invalid-format error if an ingredient entry carries a malformed
/// id, an invalid-input error if an entry names both an id and a name, and a
/// not-found error if an applied name has no binding
pub fn merge_recipe(
    original: &Recipe,
    update: &RecipeUpdate,
    bindings: &NameBindings,
) -> AppResult<Recipe> {
    let (ingredient_refs, ingredients_meta) = match &update.ingredients {
        Some(entries) => merge_usages(original, entries, bindings)?,
        None => (
            original.ingredient_refs.clone(),
            original.ingredients_meta.clone(),
        ),
    };

    Ok(Recipe {
        id: original.id,
        name: update.name.clone().unwrap_or_else(|| original.name.clone()),
        description: update
            .description
            .as_ref()
            .apply_cloned(original.description.as_ref()),
        category: update.category.unwrap_or(original.category),
        steps: update.steps.clone().unwrap_or_else(|| original.steps.clone()),
        ingredient_refs,
        ingredients_meta,
    })
}

fn merge_usages(
    original: &Recipe,
    entries: &[IngredientUsageUpdate],
    bindings: &NameBindings,
) -> AppResult<(Vec<ObjectId>, Vec<IngredientMeta>)> {
    let repointed = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry_id(index, entry))
        .collect::<AppResult<Vec<_>>>()?;

    let refs = original
        .ingredient_refs
        .iter()
        .enumerate()
        .map(|(index, reference)| {
            let Some(entry) = entries.get(index) else {
                return Ok(*reference);
            };
            if let Some(name) = &entry.name {
                return bindings.get(name).copied().ok_or_else(|| {
                    AppError::not_found(format!("Ingredient '{name}'"))
                        .with_details(json!({ "index": index, "name": name }))
                });
            }
            Ok(repointed.get(index).copied().flatten().unwrap_or(*reference))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let meta = original
        .ingredients_meta
        .iter()
        .enumerate()
        .map(|(index, meta)| match entries.get(index) {
            Some(entry) => IngredientMeta {
                quantity: entry.quantity.unwrap_or(meta.quantity),
                unit: entry.unit.clone().unwrap_or_else(|| meta.unit.clone()),
            },
            None => meta.clone(),
        })
        .collect();

    Ok((refs, meta))
}

fn parse_entry_id(index: usize, entry: &IngredientUsageUpdate) -> AppResult<Option<ObjectId>> {
    if entry.id.is_some() && entry.name.is_some() {
        return Err(AppError::invalid_input(format!(
            "Ingredient update {index}: set either '_id' or 'name', not both"
        ))
        .with_details(json!({ "index": index })));
    }

    entry
        .id
        .as_deref()
        .map(|raw| {
            ObjectId::parse_str(raw).map_err(|e| {
                AppError::invalid_format(format!("Ingredient update {index}: {e}"))
                    .with_details(json!({ "index": index, "id": raw }))
            })
        })
        .transpose()
}
