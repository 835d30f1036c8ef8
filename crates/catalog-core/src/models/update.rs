// ABOUTME: Sparse recipe update payload consumed by the partial-update merge
// ABOUTME: Only fields present in the payload change; ingredient edits are index-aligned
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Category, Patch};
use serde::{Deserialize, Serialize};

/// Sparse update for a stored recipe
///
/// `Default` is the empty update, which leaves a recipe unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description; `null` clears it
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub description: Patch<String>,
    /// New category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Replacement step list (whole-list replace)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
    /// Per-usage edits; entry `i` applies to ingredient usage `i`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<IngredientUsageUpdate>>,
}

impl RecipeUpdate {
    /// Whether the payload carries no changes at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_unset()
            && self.category.is_none()
            && self.steps.is_none()
            && self.ingredients.is_none()
    }
}

/// Partial edit of one ingredient usage
///
/// A usage is re-pointed either by `_id` or by the exact `name` of an existing
/// ingredient, never both. The id is kept as a raw string so that a malformed
/// value is reported by the merge as an invalid argument rather than as a
/// payload decoding failure. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngredientUsageUpdate {
    /// Re-point this usage at another ingredient by id
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Re-point this usage at the ingredient with this exact name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// New unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}
