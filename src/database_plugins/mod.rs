// ABOUTME: Document store backends for the recipe catalog
// ABOUTME: In-memory and SQLite implementations of the entity store behind a factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Backend selection from the configured URL
pub mod factory;
/// Hash-map backed store
pub mod memory;
/// SQLite JSON document store
pub mod sqlite;

pub use factory::{detect_database_type, Database, DatabaseType};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
