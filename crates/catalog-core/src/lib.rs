// ABOUTME: Core types and constants for the recipe catalog data-access layer
// ABOUTME: Foundation crate with error handling, identifiers, catalog models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Catalog Core
//!
//! Foundation crate providing shared types and constants for the recipe
//! catalog. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Collection names, store timeouts, and environment variable names
//! - **models**: `ObjectId`, `Ingredient`, `Recipe`, `ResolvedRecipe`, and sparse update payloads

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Catalog data models and identifiers
pub mod models;
