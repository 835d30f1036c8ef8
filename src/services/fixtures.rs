// ABOUTME: Bulk fixture importer that seeds ingredients and recipes with their own ids
// ABOUTME: Validates a whole JSON array before inserting, then skips records the store rejects as duplicates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fixture import
//!
//! Fixtures carry caller-supplied `_id` values so recipe fixtures can point at
//! ingredient fixtures. Import ingredients before recipes.

use crate::database::{encode, CatalogStore, Collection};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::models::{decode_payload, Ingredient, ObjectId, Recipe};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

/// Entity that can be seeded from a fixture file
pub trait FixtureRecord: Serialize + DeserializeOwned + Send + Sync {
    /// Target collection
    const COLLECTION: Collection;

    /// Caller-supplied id
    fn id(&self) -> ObjectId;

    /// Record-level checks run before anything is inserted
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field
    fn validate(&self) -> AppResult<()>;
}

impl FixtureRecord for Ingredient {
    const COLLECTION: Collection = Collection::Ingredients;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn validate(&self) -> AppResult<()> {
        Self::validate(self)
    }
}

impl FixtureRecord for Recipe {
    const COLLECTION: Collection = Collection::Recipes;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn validate(&self) -> AppResult<()> {
        Self::validate(self)
    }
}

/// Outcome of one import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Collection written to
    pub collection: Collection,
    /// Records inserted
    pub imported: usize,
    /// Records the store rejected as duplicates
    pub skipped: usize,
}

/// Seeds collections from fixture resources
#[derive(Clone)]
pub struct FixtureImporter {
    store: CatalogStore,
}

impl FixtureImporter {
    /// Create a new importer
    #[must_use]
    pub const fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Import ingredients from a reader holding a JSON array
    ///
    /// # Errors
    ///
    /// See [`FixtureImporter::import`]
    pub async fn import_ingredients<R>(&self, reader: R) -> AppResult<ImportReport>
    where
        R: AsyncRead + Unpin + Send,
    {
        self.import::<Ingredient, R>(reader).await
    }

    /// Import recipes from a reader holding a JSON array
    ///
    /// # Errors
    ///
    /// See [`FixtureImporter::import`]
    pub async fn import_recipes<R>(&self, reader: R) -> AppResult<ImportReport>
    where
        R: AsyncRead + Unpin + Send,
    {
        self.import::<Recipe, R>(reader).await
    }

    /// Import ingredients from a file
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the file does not exist, otherwise see
    /// [`FixtureImporter::import`]
    pub async fn import_ingredients_from_path(&self, path: &Path) -> AppResult<ImportReport> {
        let file = open_fixture(path).await?;
        self.import_ingredients(file).await
    }

    /// Import recipes from a file
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the file does not exist, otherwise see
    /// [`FixtureImporter::import`]
    pub async fn import_recipes_from_path(&self, path: &Path) -> AppResult<ImportReport> {
        let file = open_fixture(path).await?;
        self.import_recipes(file).await
    }

    /// Read, validate, and insert one batch of records
    ///
    /// Nothing is inserted unless the whole batch reads, parses, and
    /// validates. A record whose id already exists is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be read, the JSON is malformed,
    /// a record is invalid, or the store fails for a reason other than a
    /// duplicate id; records inserted before such a failure stay, and the
    /// error details carry the counts so far
    pub async fn import<T, R>(&self, mut reader: R) -> AppResult<ImportReport>
    where
        T: FixtureRecord,
        R: AsyncRead + Unpin + Send,
    {
        let collection = T::COLLECTION;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await.map_err(|e| {
            AppError::internal(format!("Failed to read {collection} fixture: {e}")).with_source(e)
        })?;

        let records: Vec<T> = decode_payload(&bytes)?;
        for (index, record) in records.iter().enumerate() {
            record.validate().map_err(|e| {
                AppError::new(e.code, format!("{collection} fixture record {index}: {}", e.message))
                    .with_details(json!({ "index": index, "id": record.id().to_hex() }))
            })?;
        }
        debug!(collection = %collection, records = records.len(), "Fixture batch validated");

        let mut report = ImportReport {
            collection,
            imported: 0,
            skipped: 0,
        };
        for record in &records {
            let document = encode(collection, record)?;
            match self.store.insert_one(collection, document).await {
                Ok(_) => report.imported += 1,
                Err(e) if e.code == ErrorCode::ResourceAlreadyExists => {
                    warn!(
                        collection = %collection,
                        record.id = %record.id(),
                        "Skipping fixture record: {}",
                        e.message
                    );
                    report.skipped += 1;
                }
                Err(e) => {
                    return Err(e.with_details(json!({
                        "imported": report.imported,
                        "skipped": report.skipped,
                        "failed_id": record.id().to_hex(),
                    })))
                }
            }
        }

        AppLogger::log_import_summary(collection.as_str(), report.imported, report.skipped);
        Ok(report)
    }
}

async fn open_fixture(path: &Path) -> AppResult<File> {
    File::open(path).await.map_err(|e| {
        let message = format!("Fixture file {}", path.display());
        if e.kind() == io::ErrorKind::NotFound {
            AppError::not_found(message)
        } else {
            AppError::internal(format!("{message} could not be opened: {e}")).with_source(e)
        }
    })
}
