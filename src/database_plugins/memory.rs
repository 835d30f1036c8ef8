// ABOUTME: In-memory document store for tests and embedded use
// ABOUTME: Hash-map backed collections; result order is unspecified like any document store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::fields;
use crate::database::{document_id, Collection, Document, EntityStore, Filter};
use crate::errors::DatabaseError;
use crate::models::ObjectId;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type Collections = HashMap<Collection, HashMap<ObjectId, Document>>;

/// In-memory entity store
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, HashMap::len)
    }

    fn first_match(documents: &HashMap<ObjectId, Document>, filter: &Filter) -> Option<ObjectId> {
        documents
            .iter()
            .find(|(_, document)| filter.matches(document))
            .map(|(id, _)| *id)
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<ObjectId, DatabaseError> {
        let id = if document.contains_key(fields::ID) {
            document_id(collection, &document)?
        } else {
            let generated = ObjectId::new();
            document.insert(fields::ID.to_owned(), Value::from(generated.to_hex()));
            generated
        };

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();
        if documents.contains_key(&id) {
            return Err(DatabaseError::DuplicateKey {
                collection: collection.as_str().to_owned(),
                id: id.to_hex(),
            });
        }
        documents.insert(id, document);
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).and_then(|documents| {
            documents
                .values()
                .find(|document| filter.matches(document))
                .cloned()
        }))
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|documents| {
                documents
                    .values()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        mut document: Document,
    ) -> Result<bool, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let Some(id) = Self::first_match(documents, filter) else {
            return Ok(false);
        };

        document.insert(fields::ID.to_owned(), Value::from(id.to_hex()));
        documents.insert(id, document);
        Ok(true)
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<bool, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let Some(id) = Self::first_match(documents, filter) else {
            return Ok(false);
        };

        Ok(documents.remove(&id).is_some())
    }
}
