// ABOUTME: Configuration management for the recipe catalog
// ABOUTME: Environment-only settings for the store backend, call budgets, and fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! Every setting comes from the environment and has a default, so an empty
//! environment yields a working configuration backed by `./data/catalog.db`.

use crate::errors::{AppError, AppResult};
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Store backend and call budget configuration
pub mod database;
/// Fixture file locations
pub mod fixtures;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use fixtures::FixtureConfig;

/// Complete catalog configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Store backend settings
    pub database: DatabaseConfig,
    /// Fixture settings
    pub fixtures: FixtureConfig,
}

impl CatalogConfig {
    /// Load the full configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            database: DatabaseConfig::from_env()?,
            fixtures: FixtureConfig::from_env(),
        };
        debug!(
            database.url = %config.database.url,
            fixtures.directory = %config.fixtures.directory.display(),
            "Catalog configuration loaded"
        );
        Ok(config)
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a variable, falling back to `default` when it is unset
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}
