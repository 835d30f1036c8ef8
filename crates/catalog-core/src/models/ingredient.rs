// ABOUTME: Ingredient document model and create request
// ABOUTME: Ingredients are identified by id; name uniqueness is only checked at create time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ObjectId;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Ingredient stored in the `ingredients` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Document identifier
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Display name, matched exactly by the dedup guard
    pub name: String,
    /// Default quantity, when the deployment stores one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Default unit, when the deployment stores one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    /// Attach a store-assigned id to a create request
    #[must_use]
    pub fn from_request(id: ObjectId, request: NewIngredient) -> Self {
        Self {
            id,
            name: request.name,
            quantity: request.quantity,
            unit: request.unit,
        }
    }

    /// Reject ingredients without a usable name
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or whitespace only
    pub fn validate(&self) -> AppResult<()> {
        validate_name(&self.name)
    }
}

/// Request to create an ingredient through the dedup guard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIngredient {
    /// Display name
    pub name: String,
    /// Default quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Default unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl NewIngredient {
    /// Request with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
        }
    }

    /// Reject requests without a usable name
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or whitespace only
    pub fn validate(&self) -> AppResult<()> {
        validate_name(&self.name)
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::missing_field("name"));
    }
    Ok(())
}
