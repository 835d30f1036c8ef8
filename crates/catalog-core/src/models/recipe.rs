// ABOUTME: Recipe document model, category enum, and the resolved recipe view
// ABOUTME: Recipes keep ingredient references and per-usage metadata as two index-aligned lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Ingredient, ObjectId};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recipe category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Beverages
    Drink,
    /// Main dishes
    MainCourse,
    /// Sweets
    Dessert,
    /// Starters
    Appetizer,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Self; 4] = [Self::Drink, Self::MainCourse, Self::Dessert, Self::Appetizer];

    /// Convert to the stored string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drink => "DRINK",
            Self::MainCourse => "MAIN_COURSE",
            Self::Dessert => "DESSERT",
            Self::Appetizer => "APPETIZER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Invalid category '{s}', expected one of DRINK, MAIN_COURSE, DESSERT, APPETIZER"
                ))
            })
    }
}

/// Quantity and unit of one ingredient usage inside a recipe
///
/// Has no identity of its own: entry `i` describes `ingredient_refs[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientMeta {
    /// Amount used
    pub quantity: f64,
    /// Unit of `quantity`
    pub unit: String,
}

impl IngredientMeta {
    /// Build a metadata entry
    pub fn new(quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            quantity,
            unit: unit.into(),
        }
    }
}

/// Recipe stored in the `recipes` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Document identifier
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Display name
    pub name: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category
    pub category: Category,
    /// Ordered preparation steps
    #[serde(default)]
    pub steps: Vec<String>,
    /// Ordered ingredient references
    #[serde(default, rename = "ingredients")]
    pub ingredient_refs: Vec<ObjectId>,
    /// Per-reference metadata, index-aligned with `ingredient_refs`
    #[serde(default)]
    pub ingredients_meta: Vec<IngredientMeta>,
}

impl Recipe {
    /// Attach a store-assigned id to a create request
    #[must_use]
    pub fn from_request(id: ObjectId, request: NewRecipe) -> Self {
        Self {
            id,
            name: request.name,
            description: request.description,
            category: request.category,
            steps: request.steps,
            ingredient_refs: request.ingredient_refs,
            ingredients_meta: request.ingredients_meta,
        }
    }

    /// Check the fields every writer must guarantee
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the reference and metadata
    /// lists differ in length
    pub fn validate(&self) -> AppResult<()> {
        validate_recipe_fields(
            &self.name,
            self.ingredient_refs.len(),
            self.ingredients_meta.len(),
        )
    }
}

/// Request to create a recipe with a store-generated id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    /// Display name
    pub name: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category
    pub category: Category,
    /// Ordered preparation steps
    #[serde(default)]
    pub steps: Vec<String>,
    /// Ordered ingredient references
    #[serde(default, rename = "ingredients")]
    pub ingredient_refs: Vec<ObjectId>,
    /// Per-reference metadata, index-aligned with `ingredient_refs`
    #[serde(default)]
    pub ingredients_meta: Vec<IngredientMeta>,
}

impl NewRecipe {
    /// Check the fields every writer must guarantee
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the reference and metadata
    /// lists differ in length
    pub fn validate(&self) -> AppResult<()> {
        validate_recipe_fields(
            &self.name,
            self.ingredient_refs.len(),
            self.ingredients_meta.len(),
        )
    }
}

fn validate_recipe_fields(name: &str, refs: usize, meta: usize) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::missing_field("name"));
    }
    if refs != meta {
        return Err(AppError::invalid_input(format!(
            "Recipe has {refs} ingredient references but {meta} metadata entries"
        ))
        .with_details(serde_json::json!({
            "ingredients": refs,
            "ingredients_meta": meta,
        })));
    }
    Ok(())
}

/// Recipe view with ingredient references replaced by ingredient records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecipe {
    /// Recipe identifier
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Display name
    pub name: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category
    pub category: Category,
    /// Ordered preparation steps
    pub steps: Vec<String>,
    /// Resolved ingredients, in reference order
    pub ingredients: Vec<Ingredient>,
    /// Metadata, index-aligned with `ingredients`
    pub ingredients_meta: Vec<IngredientMeta>,
    /// References that could not be resolved and were dropped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_ingredients: Vec<ObjectId>,
}

impl ResolvedRecipe {
    /// Whether some references were dropped during resolution
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.missing_ingredients.is_empty()
    }

    /// Ingredient/metadata pairs in reference order
    pub fn pairs(&self) -> impl Iterator<Item = (&Ingredient, &IngredientMeta)> {
        self.ingredients.iter().zip(&self.ingredients_meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("DESSERT".parse::<Category>().unwrap(), Category::Dessert);
        assert_eq!(
            "MAIN_COURSE".parse::<Category>().unwrap(),
            Category::MainCourse
        );
        assert!("dessert".parse::<Category>().is_err());
        assert!("BRUNCH".parse::<Category>().is_err());
    }

    #[test]
    fn test_recipe_wire_names() {
        let recipe = Recipe {
            id: ObjectId::parse_str("64b7f0c2a1e4d3b2c1a09f8e").unwrap(),
            name: "Cake".to_owned(),
            description: None,
            category: Category::Dessert,
            steps: vec!["mix".to_owned()],
            ingredient_refs: vec![ObjectId::parse_str("000000000000000000000001").unwrap()],
            ingredients_meta: vec![IngredientMeta::new(2.0, "cup")],
        };

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["_id"], "64b7f0c2a1e4d3b2c1a09f8e");
        assert_eq!(json["category"], "DESSERT");
        assert_eq!(json["ingredients"][0], "000000000000000000000001");
        assert_eq!(json["ingredients_meta"][0]["unit"], "cup");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_validate_rejects_misaligned_lists() {
        let request = NewRecipe {
            name: "Lemonade".to_owned(),
            description: None,
            category: Category::Drink,
            steps: Vec::new(),
            ingredient_refs: vec![ObjectId::new(), ObjectId::new()],
            ingredients_meta: vec![IngredientMeta::new(1.0, "cup")],
        };

        let error = request.validate().unwrap_err();
        assert_eq!(error.code, crate::errors::ErrorCode::InvalidInput);
    }
}
