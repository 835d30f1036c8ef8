// ABOUTME: Database factory selecting the document store backend from configuration
// ABOUTME: Delegates entity store calls to the in-memory or SQLite implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Database factory for creating store backends
//!
//! The backend is chosen from the connection string once at startup and
//! then wrapped in a [`CatalogStore`] that every catalog operation shares.

use super::memory::MemoryStore;
use super::sqlite::SqliteStore;
use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::database::{CatalogStore, Collection, Document, EntityStore, Filter, StoreTimeouts};
use crate::errors::{AppResult, DatabaseError};
use crate::models::ObjectId;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Supported backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// Process-local hash maps
    Memory,
    /// SQLite JSON document table
    SQLite,
}

/// Store instance wrapper that delegates to the selected backend
#[derive(Clone)]
pub enum Database {
    /// In-memory backend
    Memory(MemoryStore),
    /// SQLite backend
    SQLite(SqliteStore),
}

impl Database {
    /// Connect the backend described by the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the SQLite connection or migration fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let connection = config.url.to_connection_string();
        debug!("Detecting database type from URL: {}", connection);

        let database = match &config.url {
            DatabaseUrl::InMemory => {
                info!("Initializing in-memory document store");
                Self::Memory(MemoryStore::new())
            }
            DatabaseUrl::SQLite { .. } | DatabaseUrl::SQLiteMemory => {
                info!("Initializing SQLite document store");
                Self::SQLite(SqliteStore::new(&connection, config.max_connections).await?)
            }
        };

        info!(backend = database.backend_info(), "Document store initialized");
        Ok(database)
    }

    /// Parse a URL and connect with default pool size and budgets
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is unsupported or the connection fails
    pub async fn from_url(database_url: &str) -> AppResult<Self> {
        Self::new(&DatabaseConfig::with_url(DatabaseUrl::parse_url(database_url)?)).await
    }

    /// Get a descriptive string for the current backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "In-memory (Tests and Embedding)",
            Self::SQLite(_) => "SQLite (Local Document Table)",
        }
    }

    /// Get the backend type enum
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            Self::Memory(_) => DatabaseType::Memory,
            Self::SQLite(_) => DatabaseType::SQLite,
        }
    }

    /// Wrap the backend in the shared, timeout-bounded store handle
    #[must_use]
    pub fn into_store(self, timeouts: StoreTimeouts) -> CatalogStore {
        CatalogStore::new(Arc::new(self), timeouts)
    }
}

/// Detect the backend type from a connection string
///
/// # Errors
///
/// Returns an error if the URL format is not recognized
pub fn detect_database_type(database_url: &str) -> AppResult<DatabaseType> {
    Ok(match DatabaseUrl::parse_url(database_url)? {
        DatabaseUrl::InMemory => DatabaseType::Memory,
        DatabaseUrl::SQLite { .. } | DatabaseUrl::SQLiteMemory => DatabaseType::SQLite,
    })
}

#[async_trait]
impl EntityStore for Database {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ObjectId, DatabaseError> {
        match self {
            Self::Memory(db) => db.insert_one(collection, document).await,
            Self::SQLite(db) => db.insert_one(collection, document).await,
        }
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DatabaseError> {
        match self {
            Self::Memory(db) => db.find_one(collection, filter).await,
            Self::SQLite(db) => db.find_one(collection, filter).await,
        }
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, DatabaseError> {
        match self {
            Self::Memory(db) => db.find_many(collection, filter).await,
            Self::SQLite(db) => db.find_many(collection, filter).await,
        }
    }

    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        document: Document,
    ) -> Result<bool, DatabaseError> {
        match self {
            Self::Memory(db) => db.replace_one(collection, filter, document).await,
            Self::SQLite(db) => db.replace_one(collection, filter, document).await,
        }
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<bool, DatabaseError> {
        match self {
            Self::Memory(db) => db.delete_one(collection, filter).await,
            Self::SQLite(db) => db.delete_one(collection, filter).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_database_type() {
        assert_eq!(detect_database_type("memory").unwrap(), DatabaseType::Memory);
        assert_eq!(
            detect_database_type("sqlite::memory:").unwrap(),
            DatabaseType::SQLite
        );
        assert_eq!(
            detect_database_type("sqlite:./data/catalog.db").unwrap(),
            DatabaseType::SQLite
        );
        assert!(detect_database_type("postgres://localhost/catalog").is_err());
    }

    #[tokio::test]
    async fn test_memory_backend_from_url() {
        let database = Database::from_url("memory").await.unwrap();
        assert_eq!(database.database_type(), DatabaseType::Memory);
    }
}
