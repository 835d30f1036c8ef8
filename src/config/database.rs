// ABOUTME: Store connection configuration and type-safe database URL parsing
// ABOUTME: Selects the in-memory or SQLite backend and carries pool size and call budgets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{env_var_or, parse_env};
use crate::constants::{database, env_config, timeouts};
use crate::database::StoreTimeouts;
use crate::errors::{AppError, AppResult};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::time::Duration;

/// Type-safe store location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory SQLite database
    SQLiteMemory,
    /// Process-local hash-map store
    InMemory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// Accepts `sqlite:<path>`, `sqlite::memory:`, and `memory`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheme is unsupported or the path is empty
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed == "memory" {
            return Ok(Self::InMemory);
        }

        let Some(path) = trimmed.strip_prefix("sqlite:") else {
            return Err(AppError::config(format!(
                "Unsupported database URL '{trimmed}'. Supported formats: sqlite:path/to/db.sqlite, sqlite::memory:, memory"
            )));
        };

        match path {
            ":memory:" => Ok(Self::SQLiteMemory),
            "" => Err(AppError::config("SQLite database URL has an empty path")),
            _ => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::SQLiteMemory => "sqlite::memory:".into(),
            Self::InMemory => "memory".into(),
        }
    }

    /// Whether data is lost when the process exits
    #[must_use]
    pub const fn is_ephemeral(&self) -> bool {
        matches!(self, Self::SQLiteMemory | Self::InMemory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(database::DEFAULT_URL).unwrap_or(Self::InMemory)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Store connection and call budget configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Backend location
    pub url: DatabaseUrl,
    /// SQLite pool size
    pub max_connections: u32,
    /// Budget for point operations, in seconds
    pub point_timeout_secs: u64,
    /// Budget for collection scans, in seconds
    pub scan_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            max_connections: database::DEFAULT_MAX_CONNECTIONS,
            point_timeout_secs: timeouts::POINT_OPERATION_SECS,
            scan_timeout_secs: timeouts::SCAN_OPERATION_SECS,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a given URL with default budgets
    #[must_use]
    pub fn with_url(url: DatabaseUrl) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }

    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            url: DatabaseUrl::parse_url(&env_var_or(
                env_config::DATABASE_URL,
                database::DEFAULT_URL,
            ))?,
            max_connections: parse_env(
                env_config::SQLITE_MAX_CONNECTIONS,
                database::DEFAULT_MAX_CONNECTIONS,
            )?,
            point_timeout_secs: parse_env(
                env_config::STORE_POINT_TIMEOUT_SECS,
                timeouts::POINT_OPERATION_SECS,
            )?,
            scan_timeout_secs: parse_env(
                env_config::STORE_SCAN_TIMEOUT_SECS,
                timeouts::SCAN_OPERATION_SECS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject zero pool sizes and zero budgets
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending setting
    pub fn validate(&self) -> AppResult<()> {
        if self.max_connections == 0 {
            return Err(AppError::config(format!(
                "{} must be at least 1",
                env_config::SQLITE_MAX_CONNECTIONS
            )));
        }
        if self.point_timeout_secs == 0 {
            return Err(AppError::config(format!(
                "{} must be at least 1",
                env_config::STORE_POINT_TIMEOUT_SECS
            )));
        }
        if self.scan_timeout_secs == 0 {
            return Err(AppError::config(format!(
                "{} must be at least 1",
                env_config::STORE_SCAN_TIMEOUT_SECS
            )));
        }
        Ok(())
    }

    /// Store call budgets
    #[must_use]
    pub const fn timeouts(&self) -> StoreTimeouts {
        StoreTimeouts {
            point: Duration::from_secs(self.point_timeout_secs),
            scan: Duration::from_secs(self.scan_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_variants() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/catalog.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/catalog.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::SQLiteMemory
        );
        assert_eq!(DatabaseUrl::parse_url("memory").unwrap(), DatabaseUrl::InMemory);
    }

    #[test]
    fn test_parse_url_rejects_unknown_schemes() {
        assert!(DatabaseUrl::parse_url("mongodb://localhost:27017").is_err());
        assert!(DatabaseUrl::parse_url("sqlite:").is_err());
    }

    #[test]
    fn test_connection_string_round_trips() {
        let url = DatabaseUrl::parse_url("sqlite:/tmp/catalog.db").unwrap();
        assert_eq!(url.to_string(), "sqlite:/tmp/catalog.db");
        assert!(!url.is_ephemeral());
    }

    #[test]
    fn test_default_budgets() {
        let timeouts = DatabaseConfig::default().timeouts();
        assert_eq!(timeouts.point, Duration::from_secs(5));
        assert_eq!(timeouts.scan, Duration::from_secs(30));
    }

    #[test]
    fn test_validate_rejects_zero_budgets() {
        let config = DatabaseConfig {
            point_timeout_secs: 0,
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
