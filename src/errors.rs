// ABOUTME: Unified error types re-exported from catalog-core
// ABOUTME: Provides AppError, ErrorCode, ErrorKind, and DatabaseError to the whole crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use catalog_core::errors::*;
