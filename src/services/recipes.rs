// ABOUTME: Recipe catalog operations: create, resolve, partial update, list, and delete
// ABOUTME: Resolution joins ingredient references with one batch fetch against the shared store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::merge::{merge_recipe, override_names, NameBindings};
use super::resolution::{pair_ingredients, unique_references};
use crate::constants::fields;
use crate::database::{decode, decode_all, encode, CatalogStore, Collection, Filter};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{Category, Ingredient, NewRecipe, ObjectId, Recipe, RecipeUpdate, ResolvedRecipe};
use tracing::{debug, info};

/// Recipe operations manager
#[derive(Clone)]
pub struct RecipesManager {
    store: CatalogStore,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Create a recipe with a store-generated id
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the reference and metadata lists
    /// differ in length, or the insert fails
    pub async fn create(&self, request: NewRecipe) -> AppResult<Recipe> {
        request.validate()?;

        let document = encode(Collection::Recipes, &request)?;
        let id = self.store.insert_one(Collection::Recipes, document).await?;

        info!(
            recipe.id = %id,
            recipe.name = %request.name,
            recipe.category = %request.category,
            "Recipe created"
        );
        Ok(Recipe::from_request(id, request))
    }

    /// Stored recipe with unresolved references
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error for a malformed id (before any store
    /// call) and a not-found error if the recipe does not exist
    pub async fn get(&self, id: &str) -> AppResult<Recipe> {
        let object_id = ObjectId::parse_str(id)?;
        let document = self
            .store
            .find_one(Collection::Recipes, &Filter::by_id(object_id))
            .await?
            .ok_or_else(|| AppError::not_found("Recipe").with_resource_id(id))?;
        Ok(decode(Collection::Recipes, document)?)
    }

    /// Recipe with its ingredient references replaced by ingredient records
    ///
    /// Issues one recipe lookup and, when the recipe has references, exactly
    /// one batch fetch for all of them. References whose ingredient no longer
    /// exists are dropped and reported in `missing_ingredients`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error for a malformed id, a not-found error
    /// if the recipe does not exist, and a dependency error if a store call
    /// fails or times out
    pub async fn resolve(&self, id: &str) -> AppResult<ResolvedRecipe> {
        let recipe = self.get(id).await?;
        if recipe.ingredient_refs.is_empty() {
            return Ok(pair_ingredients(recipe, Vec::new()));
        }

        let wanted = unique_references(&recipe.ingredient_refs);
        let documents = self
            .store
            .find_many(Collection::Ingredients, &Filter::by_ids(&wanted))
            .await?;
        let fetched: Vec<Ingredient> = decode_all(Collection::Ingredients, documents)?;
        debug!(
            recipe.id = %recipe.id,
            requested = wanted.len(),
            fetched = fetched.len(),
            "Fetched recipe ingredients"
        );

        let resolved = pair_ingredients(recipe, fetched);
        if resolved.is_degraded() {
            AppLogger::log_degraded_resolution(
                &resolved.id.to_hex(),
                resolved.missing_ingredients.len(),
            );
        }
        Ok(resolved)
    }

    /// Apply a sparse update and write back the full document
    ///
    /// Ingredient entries that re-point a usage by name are looked up with one
    /// batch fetch before the merge. The read and the replace are not guarded
    /// against concurrent writers: of two overlapping updates the later write wins.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error for malformed ids or a merged recipe
    /// that breaks reference/metadata alignment, a not-found error if the
    /// recipe or a named ingredient does not exist, and a dependency error if
    /// a store call fails
    pub async fn update(&self, id: &str, update: &RecipeUpdate) -> AppResult<Recipe> {
        let original = self.get(id).await?;
        let bindings = self
            .bind_ingredient_names(override_names(&original, update))
            .await?;
        let merged = merge_recipe(&original, update, &bindings)?;
        merged.validate()?;

        let document = encode(Collection::Recipes, &merged)?;
        let matched = self
            .store
            .replace_one(Collection::Recipes, &Filter::by_id(original.id), document)
            .await?;
        if !matched {
            return Err(AppError::not_found("Recipe").with_resource_id(id));
        }

        info!(recipe.id = %merged.id, "Recipe updated");
        Ok(merged)
    }

    /// Map ingredient names to ids; a name held by several ingredients binds
    /// to the lowest id
    async fn bind_ingredient_names(&self, names: Vec<String>) -> AppResult<NameBindings> {
        if names.is_empty() {
            return Ok(NameBindings::new());
        }

        let documents = self
            .store
            .find_many(
                Collection::Ingredients,
                &Filter::all().and_in(fields::NAME, names),
            )
            .await?;
        let ingredients: Vec<Ingredient> = decode_all(Collection::Ingredients, documents)?;

        let mut bindings = NameBindings::new();
        for ingredient in ingredients {
            bindings
                .entry(ingredient.name)
                .and_modify(|id| *id = (*id).min(ingredient.id))
                .or_insert(ingredient.id);
        }
        Ok(bindings)
    }

    /// Hard delete by id
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error for a malformed id and a not-found
    /// error if nothing was deleted
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let object_id = ObjectId::parse_str(id)?;
        let deleted = self
            .store
            .delete_one(Collection::Recipes, &Filter::by_id(object_id))
            .await?;
        if !deleted {
            return Err(AppError::not_found("Recipe").with_resource_id(id));
        }

        info!(recipe.id = %object_id, "Recipe deleted");
        Ok(true)
    }

    /// Every recipe, in no particular order
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails, times out, or a document does not decode
    pub async fn list(&self) -> AppResult<Vec<Recipe>> {
        let documents = self.store.scan(Collection::Recipes, &Filter::all()).await?;
        Ok(decode_all(Collection::Recipes, documents)?)
    }

    /// Recipes in one category
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails, times out, or a document does not decode
    pub async fn list_by_category(&self, category: Category) -> AppResult<Vec<Recipe>> {
        let documents = self
            .store
            .scan(
                Collection::Recipes,
                &Filter::eq(fields::CATEGORY, category.as_str()),
            )
            .await?;
        debug!(category = %category, count = documents.len(), "Listed recipes by category");
        Ok(decode_all(Collection::Recipes, documents)?)
    }

    /// Exact name lookup
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails or the document does not decode
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Recipe>> {
        let document = self
            .store
            .find_one(Collection::Recipes, &Filter::eq(fields::NAME, name))
            .await?;
        Ok(document
            .map(|document| decode(Collection::Recipes, document))
            .transpose()?)
    }
}
