// ABOUTME: Document identifier newtype with strict 24-character lowercase hex wire form
// ABOUTME: Generates store-style ids (timestamp, process-unique bytes, counter) and validates caller ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;
use thiserror::Error;

/// Per-process random bytes embedded in every generated id
static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(|| rand::thread_rng().gen());

/// Monotonic counter, seeded randomly so restarts do not replay ids
static COUNTER: LazyLock<AtomicU32> = LazyLock::new(|| AtomicU32::new(rand::thread_rng().gen()));

/// Reasons an identifier string is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectIdError {
    /// Wrong number of characters
    #[error("identifier must be {expected} characters, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length received
        actual: usize,
    },
    /// A character outside `[0-9a-f]`
    #[error("identifier contains invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// Offending character
        character: char,
        /// Zero-based character position
        position: usize,
    },
}

impl From<ObjectIdError> for AppError {
    fn from(error: ObjectIdError) -> Self {
        Self::invalid_format(format!("Malformed identifier: {error}"))
    }
}

/// Opaque 12-byte document identifier
///
/// The wire form is always 24 lowercase hexadecimal characters. Uppercase
/// input is rejected so that ids compare equal as strings inside the store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Number of raw bytes
    pub const BYTE_LEN: usize = 12;
    /// Number of characters in the hex wire form
    pub const HEX_LEN: usize = 24;

    /// Generate a new identifier
    ///
    /// Layout: 4-byte big-endian unix seconds, 5 process-unique bytes,
    /// 3-byte big-endian counter.
    #[must_use]
    pub fn new() -> Self {
        let seconds = Utc::now().timestamp() as u32;
        let count = COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0_u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parse the 24-character lowercase hex wire form
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong or any character is not `[0-9a-f]`
    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        let actual = s.chars().count();
        if actual != Self::HEX_LEN {
            return Err(ObjectIdError::InvalidLength {
                expected: Self::HEX_LEN,
                actual,
            });
        }
        if let Some((position, character)) = s
            .chars()
            .enumerate()
            .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(ObjectIdError::InvalidCharacter {
                character,
                position,
            });
        }

        let mut bytes = [0_u8; 12];
        // Length and alphabet were checked above, so decoding cannot fail here
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ObjectIdError::InvalidLength {
            expected: Self::HEX_LEN,
            actual,
        })?;
        Ok(Self(bytes))
    }

    /// Hex wire form
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Creation time encoded in the first four bytes
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let seconds = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        DateTime::from_timestamp(i64::from(seconds), 0)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_str(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrips_lowercase_hex() {
        let id = ObjectId::parse_str("64b7f0c2a1e4d3b2c1a09f8e").unwrap();
        assert_eq!(id.to_hex(), "64b7f0c2a1e4d3b2c1a09f8e");
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(matches!(
            ObjectId::parse_str("not-a-hex-id"),
            Err(ObjectIdError::InvalidLength { actual: 12, .. })
        ));
        assert!(matches!(
            ObjectId::parse_str("64B7F0C2A1E4D3B2C1A09F8E"),
            Err(ObjectIdError::InvalidCharacter { position: 2, .. })
        ));
        assert!(matches!(
            ObjectId::parse_str("64b7f0c2a1e4d3b2c1a09f8g"),
            Err(ObjectIdError::InvalidCharacter { character: 'g', .. })
        ));
        assert!(ObjectId::parse_str("").is_err());
    }

    #[test]
    fn test_generated_ids_are_unique_and_valid() {
        let first = ObjectId::new();
        let second = ObjectId::new();

        assert_ne!(first, second);
        assert_eq!(first.to_hex().len(), ObjectId::HEX_LEN);
        assert!(ObjectId::parse_str(&second.to_hex()).is_ok());
        assert!(first.timestamp().is_some());
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let id = ObjectId::parse_str("000000000000000000000001").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"000000000000000000000001\"");

        let bad: Result<ObjectId, _> = serde_json::from_str("\"xyz\"");
        assert!(bad.is_err());
    }
}
