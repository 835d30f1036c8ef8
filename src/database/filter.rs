// ABOUTME: Store filters limited to equality and set-membership predicates
// ABOUTME: A filter is a conjunction of predicates; the empty filter matches every document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Document;
use crate::constants::fields;
use crate::models::ObjectId;
use serde_json::Value;

/// Single filter clause
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field == value`; a missing field compares equal to `null` and
    /// numbers compare by value, so `2` equals `2.0`
    Eq {
        /// Top-level document field
        field: String,
        /// Value to compare against
        value: Value,
    },
    /// `field` equals one of `values` (`$in`)
    In {
        /// Top-level document field
        field: String,
        /// Accepted values; an empty set matches nothing
        values: Vec<Value>,
    },
}

impl Predicate {
    /// Field the predicate reads
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Eq { field, .. } | Self::In { field, .. } => field,
        }
    }

    /// Evaluate against a document
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        let actual = document.get(self.field()).unwrap_or(&Value::Null);
        match self {
            Self::Eq { value, .. } => same_value(actual, value),
            Self::In { values, .. } => values.iter().any(|value| same_value(actual, value)),
        }
    }
}

fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_f64(), r.as_f64()) {
            (Some(l), Some(r)) => (l - r).abs() <= f64::EPSILON * l.abs().max(r.abs()),
            _ => l == r,
        },
        _ => left == right,
    }
}

/// Conjunction of predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Filter matching every document
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter on the primary key
    #[must_use]
    pub fn by_id(id: ObjectId) -> Self {
        Self::all().and_eq(fields::ID, Value::from(id.to_hex()))
    }

    /// Filter on a set of primary keys
    #[must_use]
    pub fn by_ids(ids: &[ObjectId]) -> Self {
        Self::all().and_in(fields::ID, ids.iter().map(|id| Value::from(id.to_hex())))
    }

    /// Filter on a single field value
    #[must_use]
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::all().and_eq(field, value)
    }

    /// Add an equality clause
    #[must_use]
    pub fn and_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate::Eq {
            field: field.to_owned(),
            value: value.into(),
        });
        self
    }

    /// Add a set-membership clause
    #[must_use]
    pub fn and_in<I, V>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.predicates.push(Predicate::In {
            field: field.to_owned(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Clauses of the conjunction
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Evaluate against a document
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test documents are objects"),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::all().matches(&document(json!({"name": "flour"}))));
    }

    #[test]
    fn test_eq_and_in() {
        let doc = document(json!({"_id": "000000000000000000000001", "name": "flour"}));

        assert!(Filter::eq("name", "flour").matches(&doc));
        assert!(!Filter::eq("name", "Flour").matches(&doc));
        assert!(Filter::all()
            .and_in("name", ["sugar", "flour"])
            .matches(&doc));
        assert!(!Filter::by_ids(&[]).matches(&doc));
    }

    #[test]
    fn test_conjunction_requires_every_clause() {
        let doc = document(json!({"name": "Cake", "category": "DESSERT"}));

        assert!(Filter::eq("name", "Cake")
            .and_eq("category", "DESSERT")
            .matches(&doc));
        assert!(!Filter::eq("name", "Cake")
            .and_eq("category", "DRINK")
            .matches(&doc));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        let doc = document(json!({"quantity": 2.0}));

        assert!(Filter::eq("quantity", 2).matches(&doc));
        assert!(Filter::all().and_in("quantity", [1, 2]).matches(&doc));
        assert!(!Filter::eq("quantity", 3).matches(&doc));
        assert!(!Filter::eq("quantity", "2").matches(&doc));
    }

    #[test]
    fn test_missing_field_equals_null() {
        let doc = document(json!({"name": "Cake"}));
        assert!(Filter::eq("description", Value::Null).matches(&doc));
    }
}
