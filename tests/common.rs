// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, seeded stores, and an instrumented store double
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `recipe_catalog`

use async_trait::async_trait;
use recipe_catalog::database::{
    CatalogStore, Collection, Document, EntityStore, Filter, StoreTimeouts,
};
use recipe_catalog::database_plugins::MemoryStore;
use recipe_catalog::errors::DatabaseError;
use recipe_catalog::models::{Ingredient, ObjectId};
use recipe_catalog::services::{IngredientsManager, RecipesManager};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Store double wrapping the in-memory backend
///
/// Counts every call, can return `find_many` results in descending id order, can hold
/// `find_one` or `find_many` results for a delay, and can make `find_many` or late inserts fail.
#[derive(Clone, Default)]
pub struct InstrumentedStore {
    inner: MemoryStore,
    calls: Arc<AtomicUsize>,
    reverse_results: bool,
    find_delay: Option<Duration>,
    find_many_delay: Option<Duration>,
    fail_find_many: bool,
    insert_limit: Option<usize>,
    inserts: Arc<AtomicUsize>,
}

impl InstrumentedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `find_many` results in descending id order
    pub fn reversing(mut self) -> Self {
        self.reverse_results = true;
        self
    }

    /// Sleep after each `find_one` read before returning its result
    pub fn with_find_delay(mut self, delay: Duration) -> Self {
        self.find_delay = Some(delay);
        self
    }

    /// Sleep before answering each `find_many`
    pub fn with_find_many_delay(mut self, delay: Duration) -> Self {
        self.find_many_delay = Some(delay);
        self
    }

    /// Fail every `find_many` as an unreachable backend would
    pub fn failing_find_many(mut self) -> Self {
        self.fail_find_many = true;
        self
    }

    /// Accept this many inserts, then fail every later one
    pub fn failing_inserts_after(mut self, accepted: usize) -> Self {
        self.insert_limit = Some(accepted);
        self
    }

    /// Store calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Backing store, for arranging data without counting calls
    pub fn backend(&self) -> &MemoryStore {
        &self.inner
    }

    pub fn into_store(self, timeouts: StoreTimeouts) -> CatalogStore {
        CatalogStore::new(Arc::new(self), timeouts)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl EntityStore for InstrumentedStore {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ObjectId, DatabaseError> {
        self.record();
        let attempt = self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.insert_limit.is_some_and(|limit| attempt >= limit) {
            return Err(DatabaseError::ConnectionError {
                context: format!("{} unreachable", collection.as_str()),
            });
        }
        self.inner.insert_one(collection, document).await
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DatabaseError> {
        self.record();
        let found = self.inner.find_one(collection, filter).await;
        if let Some(delay) = self.find_delay {
            tokio::time::sleep(delay).await;
        }
        found
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, DatabaseError> {
        self.record();
        if let Some(delay) = self.find_many_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_find_many {
            return Err(DatabaseError::ConnectionError {
                context: format!("{} unreachable", collection.as_str()),
            });
        }
        let mut documents = self.inner.find_many(collection, filter).await?;
        if self.reverse_results {
            documents.sort_by(|a, b| {
                let key = |d: &Document| d.get("_id").and_then(|v| v.as_str()).map(str::to_owned);
                key(b).cmp(&key(a))
            });
        }
        Ok(documents)
    }

    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        document: Document,
    ) -> Result<bool, DatabaseError> {
        self.record();
        self.inner.replace_one(collection, filter, document).await
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<bool, DatabaseError> {
        self.record();
        self.inner.delete_one(collection, filter).await
    }
}

/// Managers sharing one fresh in-memory store
pub fn create_test_managers() -> (CatalogStore, IngredientsManager, RecipesManager) {
    init_test_logging();
    let store = CatalogStore::in_memory();
    (
        store.clone(),
        IngredientsManager::new(store.clone()),
        RecipesManager::new(store),
    )
}

/// Insert a named ingredient directly and return it
pub async fn seed_ingredient(store: &CatalogStore, name: &str) -> Ingredient {
    let ingredient = Ingredient {
        id: ObjectId::new(),
        name: name.to_owned(),
        quantity: None,
        unit: None,
    };
    let document = recipe_catalog::database::encode(Collection::Ingredients, &ingredient).unwrap();
    store
        .insert_one(Collection::Ingredients, document)
        .await
        .unwrap();
    ingredient
}
