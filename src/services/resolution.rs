// ABOUTME: Pairs a recipe's ingredient references with fetched ingredient records
// ABOUTME: Keeps reference order and metadata alignment whatever order the store returns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{Ingredient, ObjectId, Recipe, ResolvedRecipe};
use std::collections::{HashMap, HashSet};

/// Distinct references in first-seen order, used for the single batch fetch
#[must_use]
pub fn unique_references(references: &[ObjectId]) -> Vec<ObjectId> {
    let mut seen = HashSet::with_capacity(references.len());
    references
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Build the resolved view of a recipe from the ingredients the store returned
///
/// Walks the references in stored order. A reference whose ingredient was not
/// fetched, or that has no metadata entry at its index, is dropped together
/// with its metadata and recorded in `missing_ingredients`. Surplus metadata
/// entries are ignored. A reference repeated at several positions resolves at
/// each of them with that position's metadata.
#[must_use]
pub fn pair_ingredients(recipe: Recipe, fetched: Vec<Ingredient>) -> ResolvedRecipe {
    let by_id: HashMap<ObjectId, Ingredient> = fetched
        .into_iter()
        .map(|ingredient| (ingredient.id, ingredient))
        .collect();

    let capacity = recipe.ingredient_refs.len();
    let mut ingredients = Vec::with_capacity(capacity);
    let mut ingredients_meta = Vec::with_capacity(capacity);
    let mut missing_ingredients = Vec::new();
    let mut metas = recipe.ingredients_meta.into_iter();

    for reference in recipe.ingredient_refs {
        match (by_id.get(&reference), metas.next()) {
            (Some(ingredient), Some(meta)) => {
                ingredients.push(ingredient.clone());
                ingredients_meta.push(meta);
            }
            _ => missing_ingredients.push(reference),
        }
    }

    ResolvedRecipe {
        id: recipe.id,
        name: recipe.name,
        description: recipe.description,
        category: recipe.category,
        steps: recipe.steps,
        ingredients,
        ingredients_meta,
        missing_ingredients,
    }
}
