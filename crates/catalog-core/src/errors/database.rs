// ABOUTME: Structured error types for document store operations
// ABOUTME: Provides backend-agnostic errors with collection and operation context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised by entity store backends
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The backend could not be reached or the pool could not be created
    #[error("Failed to connect to document store: {context}")]
    ConnectionError {
        /// Backend-specific failure description
        context: String,
    },

    /// A store call exceeded its time budget
    #[error("{operation} on '{collection}' timed out after {timeout_ms}ms")]
    Timeout {
        /// Store primitive that timed out
        operation: &'static str,
        /// Collection the call targeted
        collection: String,
        /// Budget that was exceeded
        timeout_ms: u64,
    },

    /// Insert of a document whose identifier is already taken
    #[error("Document {id} already exists in '{collection}'")]
    DuplicateKey {
        /// Collection the insert targeted
        collection: String,
        /// Conflicting identifier
        id: String,
    },

    /// A stored document could not be decoded into the expected shape
    #[error("Failed to decode document from '{collection}': {context}")]
    DecodeError {
        /// Collection the document came from
        collection: String,
        /// Decoder message
        context: String,
    },

    /// A value could not be encoded into a document
    #[error("Failed to encode document for '{collection}': {context}")]
    EncodeError {
        /// Collection the document was destined for
        collection: String,
        /// Encoder message
        context: String,
    },

    /// Raw SQLx failure
    #[cfg(feature = "database-errors")]
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Build a decode error from any displayable cause
    pub fn decode(collection: &str, cause: impl std::fmt::Display) -> Self {
        Self::DecodeError {
            collection: collection.to_owned(),
            context: cause.to_string(),
        }
    }

    /// Build an encode error from any displayable cause
    pub fn encode(collection: &str, cause: impl std::fmt::Display) -> Self {
        Self::EncodeError {
            collection: collection.to_owned(),
            context: cause.to_string(),
        }
    }

    /// Whether the error is a duplicate-identifier rejection
    #[must_use]
    pub const fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}
