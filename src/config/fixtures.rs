// ABOUTME: Fixture directory configuration for the seed importer
// ABOUTME: Resolves the ingredient and recipe fixture file paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::env_var_or;
use crate::constants::{env_config, fixtures};
use std::path::PathBuf;

/// Location of fixture files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    /// Directory holding `ingredients.json` and `recipes.json`
    pub directory: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(fixtures::DEFAULT_DIR),
        }
    }
}

impl FixtureConfig {
    /// Load fixture configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            directory: PathBuf::from(env_var_or(env_config::FIXTURE_DIR, fixtures::DEFAULT_DIR)),
        }
    }

    /// Ingredient fixture file
    #[must_use]
    pub fn ingredients_path(&self) -> PathBuf {
        self.directory.join(fixtures::INGREDIENTS_FILE)
    }

    /// Recipe fixture file
    #[must_use]
    pub fn recipes_path(&self) -> PathBuf {
        self.directory.join(fixtures::RECIPES_FILE)
    }
}
