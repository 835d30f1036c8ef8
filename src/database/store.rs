// ABOUTME: Shared, cloneable store handle that bounds every entity store call with a timeout
// ABOUTME: Constructed once and injected into each catalog operation, enabling test doubles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Collection, Document, EntityStore, Filter};
use crate::constants::timeouts;
use crate::database_plugins::memory::MemoryStore;
use crate::errors::{AppResult, DatabaseError};
use crate::logging::AppLogger;
use crate::models::ObjectId;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time budgets for store calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    /// Inserts, point lookups, id-set lookups, replaces, and deletes
    pub point: Duration,
    /// Full-collection and category scans
    pub scan: Duration,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self {
            point: Duration::from_secs(timeouts::POINT_OPERATION_SECS),
            scan: Duration::from_secs(timeouts::SCAN_OPERATION_SECS),
        }
    }
}

/// Handle to the process-wide entity store
///
/// Cloning is cheap and shares the same backend. The handle adds no locking:
/// the backend's own pool is responsible for concurrent use. A call that
/// exceeds its budget fails with [`DatabaseError::Timeout`]; nothing is retried.
#[derive(Clone)]
pub struct CatalogStore {
    backend: Arc<dyn EntityStore>,
    timeouts: StoreTimeouts,
}

impl CatalogStore {
    /// Wrap a backend with the given time budgets
    #[must_use]
    pub fn new(backend: Arc<dyn EntityStore>, timeouts: StoreTimeouts) -> Self {
        Self { backend, timeouts }
    }

    /// Fresh in-memory store with default budgets
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), StoreTimeouts::default())
    }

    /// Active time budgets
    #[must_use]
    pub const fn timeouts(&self) -> StoreTimeouts {
        self.timeouts
    }

    /// Insert a document
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, the id is taken, or the call times out
    pub async fn insert_one(&self, collection: Collection, document: Document) -> AppResult<ObjectId> {
        Self::bounded(
            "insert_one",
            collection,
            self.timeouts.point,
            self.backend.insert_one(collection, document),
        )
        .await
    }

    /// First document matching the filter
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or times out
    pub async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> AppResult<Option<Document>> {
        Self::bounded(
            "find_one",
            collection,
            self.timeouts.point,
            self.backend.find_one(collection, filter),
        )
        .await
    }

    /// Targeted multi-document lookup (for example an id set)
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or times out
    pub async fn find_many(&self, collection: Collection, filter: &Filter) -> AppResult<Vec<Document>> {
        Self::bounded(
            "find_many",
            collection,
            self.timeouts.point,
            self.backend.find_many(collection, filter),
        )
        .await
    }

    /// Broad multi-document read that may touch the whole collection
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails or exceeds the scan budget
    pub async fn scan(&self, collection: Collection, filter: &Filter) -> AppResult<Vec<Document>> {
        Self::bounded(
            "scan",
            collection,
            self.timeouts.scan,
            self.backend.find_many(collection, filter),
        )
        .await
    }

    /// Replace the first matching document wholesale
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or times out
    pub async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        document: Document,
    ) -> AppResult<bool> {
        Self::bounded(
            "replace_one",
            collection,
            self.timeouts.point,
            self.backend.replace_one(collection, filter, document),
        )
        .await
    }

    /// Delete the first matching document
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails or times out
    pub async fn delete_one(&self, collection: Collection, filter: &Filter) -> AppResult<bool> {
        Self::bounded(
            "delete_one",
            collection,
            self.timeouts.point,
            self.backend.delete_one(collection, filter),
        )
        .await
    }

    async fn bounded<T, F>(
        operation: &'static str,
        collection: Collection,
        limit: Duration,
        call: F,
    ) -> AppResult<T>
    where
        F: Future<Output = Result<T, DatabaseError>> + Send,
    {
        let started = Instant::now();
        let outcome = match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_elapsed) => Err(DatabaseError::Timeout {
                operation,
                collection: collection.as_str().to_owned(),
                timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            }),
        };

        AppLogger::log_store_operation(
            operation,
            collection.as_str(),
            outcome.is_ok(),
            started.elapsed(),
        );
        outcome.map_err(Into::into)
    }
}
