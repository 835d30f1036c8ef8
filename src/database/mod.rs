// ABOUTME: Entity store abstraction over the two catalog collections
// ABOUTME: Generic document CRUD with equality and set-membership filters only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Entity Store
//!
//! The catalog talks to its document store exclusively through
//! [`EntityStore`]. Backends expose five primitives and nothing richer: no
//! joins, no aggregation, and no ordering guarantee on `find_many` results.
//! Callers reach a backend through [`CatalogStore`], which bounds every call
//! with a timeout.

/// Equality and set-membership filters
pub mod filter;

/// Timeout-bounded store handle injected into every catalog operation
pub mod store;

pub use filter::{Filter, Predicate};
pub use store::{CatalogStore, StoreTimeouts};

use crate::constants::{collections, fields};
use crate::errors::DatabaseError;
use crate::models::ObjectId;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// A schema-less document: a JSON object whose `_id` field is the key
pub type Document = Map<String, Value>;

/// Logical collections of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Recipe documents
    Recipes,
    /// Ingredient documents
    Ingredients,
}

impl Collection {
    /// Store-level collection name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recipes => collections::RECIPES,
            Self::Ingredients => collections::INGREDIENTS,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document store primitives consumed by the catalog
///
/// Implementations must be safe to share across tasks without extra locking.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Insert a document
    ///
    /// Uses the document's `_id` when present and generates one otherwise.
    /// Fails with [`DatabaseError::DuplicateKey`] when the id is taken.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ObjectId, DatabaseError>;

    /// First document matching the filter, if any
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DatabaseError>;

    /// Every document matching the filter, in no particular order
    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, DatabaseError>;

    /// Replace the first matching document wholesale, keeping its `_id`
    ///
    /// Returns whether a document matched.
    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        document: Document,
    ) -> Result<bool, DatabaseError>;

    /// Delete the first matching document
    ///
    /// Returns whether a document was deleted.
    async fn delete_one(&self, collection: Collection, filter: &Filter)
        -> Result<bool, DatabaseError>;
}

/// Encode a typed entity as a document
///
/// # Errors
///
/// Returns an error if the value does not serialize to a JSON object
pub fn encode<T: Serialize>(collection: Collection, value: &T) -> Result<Document, DatabaseError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(DatabaseError::encode(
            collection.as_str(),
            format!("expected an object, got {other}"),
        )),
        Err(e) => Err(DatabaseError::encode(collection.as_str(), e)),
    }
}

/// Decode a stored document into a typed entity
///
/// # Errors
///
/// Returns an error if the document does not match the entity's shape
pub fn decode<T: DeserializeOwned>(
    collection: Collection,
    document: Document,
) -> Result<T, DatabaseError> {
    let id = document_id_hint(&document);
    serde_json::from_value(Value::Object(document))
        .map_err(|e| DatabaseError::decode(collection.as_str(), format!("document {id}: {e}")))
}

/// Decode a batch of stored documents
///
/// # Errors
///
/// Returns an error on the first document that fails to decode
pub fn decode_all<T: DeserializeOwned>(
    collection: Collection,
    documents: Vec<Document>,
) -> Result<Vec<T>, DatabaseError> {
    documents
        .into_iter()
        .map(|document| decode(collection, document))
        .collect()
}

/// Read and validate the `_id` of a document
///
/// # Errors
///
/// Returns an error if the field is missing or not a valid identifier
pub fn document_id(collection: Collection, document: &Document) -> Result<ObjectId, DatabaseError> {
    let raw = document
        .get(fields::ID)
        .and_then(Value::as_str)
        .ok_or_else(|| DatabaseError::encode(collection.as_str(), "document has no string _id"))?;
    ObjectId::parse_str(raw).map_err(|e| DatabaseError::encode(collection.as_str(), e))
}

fn document_id_hint(document: &Document) -> String {
    document
        .get(fields::ID)
        .and_then(Value::as_str)
        .unwrap_or("<no _id>")
        .to_owned()
}
