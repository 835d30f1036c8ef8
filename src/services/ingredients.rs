// ABOUTME: Ingredient catalog operations including the name-based dedup guard
// ABOUTME: Creates, looks up, lists, and deletes ingredient documents through the shared store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::fields;
use crate::database::{decode, decode_all, encode, CatalogStore, Collection, Filter};
use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, NewIngredient, ObjectId};
use serde_json::json;
use tracing::{debug, info};

/// Ingredient operations manager
#[derive(Clone)]
pub struct IngredientsManager {
    store: CatalogStore,
}

impl IngredientsManager {
    /// Create a new ingredients manager
    #[must_use]
    pub const fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Create an ingredient unless one with the exact same name exists
    ///
    /// The name lookup and the insert are two separate store calls. Two
    /// concurrent creates of the same name can both pass the lookup and both
    /// insert; closing that gap needs an insert-if-absent store primitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the name is already taken, or
    /// a store call fails
    pub async fn create(&self, request: NewIngredient) -> AppResult<Ingredient> {
        request.validate()?;

        if self.find_by_name(&request.name).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "Ingredient '{}' already exists",
                request.name
            ))
            .with_details(json!({ "name": request.name })));
        }

        let document = encode(Collection::Ingredients, &request)?;
        let id = self.store.insert_one(Collection::Ingredients, document).await?;

        info!(ingredient.id = %id, ingredient.name = %request.name, "Ingredient created");
        Ok(Ingredient::from_request(id, request))
    }

    /// Exact, case-sensitive name lookup
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails or the document does not decode
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Ingredient>> {
        let document = self
            .store
            .find_one(Collection::Ingredients, &Filter::eq(fields::NAME, name))
            .await?;
        Ok(document
            .map(|document| decode(Collection::Ingredients, document))
            .transpose()?)
    }

    /// Name lookup for callers that require the ingredient to exist
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no ingredient has this name
    pub async fn get_by_name(&self, name: &str) -> AppResult<Ingredient> {
        self.find_by_name(name).await?.ok_or_else(|| {
            AppError::not_found(format!("Ingredient '{name}'"))
                .with_details(json!({ "name": name }))
        })
    }

    /// Point lookup by id
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error for a malformed id (before any store
    /// call) and a not-found error if the ingredient does not exist
    pub async fn get(&self, id: &str) -> AppResult<Ingredient> {
        let object_id = ObjectId::parse_str(id)?;
        let document = self
            .store
            .find_one(Collection::Ingredients, &Filter::by_id(object_id))
            .await?
            .ok_or_else(|| AppError::not_found("Ingredient").with_resource_id(id))?;
        Ok(decode(Collection::Ingredients, document)?)
    }

    /// Every ingredient, in no particular order
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails, times out, or a document does not decode
    pub async fn list(&self) -> AppResult<Vec<Ingredient>> {
        let documents = self.store.scan(Collection::Ingredients, &Filter::all()).await?;
        debug!(count = documents.len(), "Listed ingredients");
        Ok(decode_all(Collection::Ingredients, documents)?)
    }

    /// Hard delete by id
    ///
    /// Recipes referencing the ingredient are left untouched and resolve in
    /// degraded form afterwards.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error for a malformed id and a not-found
    /// error if nothing was deleted
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let object_id = ObjectId::parse_str(id)?;
        let deleted = self
            .store
            .delete_one(Collection::Ingredients, &Filter::by_id(object_id))
            .await?;
        if !deleted {
            return Err(AppError::not_found("Ingredient").with_resource_id(id));
        }

        info!(ingredient.id = %object_id, "Ingredient deleted");
        Ok(true)
    }
}
