// ABOUTME: Three-state sparse field for partial updates (unset, clear, set)
// ABOUTME: Distinguishes an absent JSON field from an explicit null from a provided value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field of a sparse update payload
///
/// Use with `#[serde(default, skip_serializing_if = "Patch::is_unset")]` so a
/// missing field deserializes to [`Patch::Unset`] and an explicit `null`
/// deserializes to [`Patch::Clear`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field not present in the payload; keep the stored value
    #[default]
    Unset,
    /// Field present as `null`; remove the stored value
    Clear,
    /// Field present with a value; replace the stored value
    Set(T),
}

impl<T> Patch<T> {
    /// Whether the payload omitted this field
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Resolve against the stored value
    #[must_use]
    pub fn apply(self, original: Option<T>) -> Option<T> {
        match self {
            Self::Unset => original,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }

    /// Borrow the carried value
    #[must_use]
    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Unset => Patch::Unset,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(value),
        }
    }
}

impl<T: Clone> Patch<&T> {
    /// Resolve a borrowed patch against a borrowed stored value
    #[must_use]
    pub fn apply_cloned(self, original: Option<&T>) -> Option<T> {
        match self {
            Patch::Unset => original.cloned(),
            Patch::Clear => None,
            Patch::Set(value) => Some(value.clone()),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset | Self::Clear => serializer.serialize_none(),
            Self::Set(value) => serializer.serialize_some(value),
        }
    }
}
