// ABOUTME: SQLite document store keeping each entity as a JSON body keyed by collection and id
// ABOUTME: Filters compile to json_extract comparisons so the store stays schema-less
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! SQLite backend for the entity store
//!
//! Every collection shares one `documents` table. The primary key is
//! `(collection, id)`, which gives the same duplicate-key behavior a document
//! store enforces on `_id`.

use crate::constants::fields;
use crate::database::{document_id, Collection, Document, EntityStore, Filter, Predicate};
use crate::errors::DatabaseError;
use crate::models::ObjectId;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::time::Duration;
use tracing::debug;

/// SQLite-backed entity store
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect and run migrations
    ///
    /// In-memory databases are private to a connection, so they are pinned to
    /// a single pooled connection that is never recycled.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the migration fails
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, DatabaseError> {
        let in_memory = database_url.contains(":memory:");
        let connection_url = if in_memory || database_url.contains('?') {
            database_url.to_owned()
        } else {
            format!("{database_url}?mode=rwc")
        };

        let options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = options
            .connect(&connection_url)
            .await
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("failed to open {database_url}: {e}"),
            })?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Create the documents table
    ///
    /// # Errors
    ///
    /// Returns an error if the DDL statement fails
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        debug!("SQLite document table ready");
        Ok(())
    }

    async fn matching_id(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<String>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT id FROM documents");
        push_filter(&mut builder, collection, filter);
        builder.push(" LIMIT 1");

        Ok(builder
            .build_query_scalar::<String>()
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[async_trait]
impl EntityStore for SqliteStore {
    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<ObjectId, DatabaseError> {
        let id = if document.contains_key(fields::ID) {
            document_id(collection, &document)?
        } else {
            let generated = ObjectId::new();
            document.insert(fields::ID.to_owned(), Value::from(generated.to_hex()));
            generated
        };
        let body = serde_json::to_string(&document)
            .map_err(|e| DatabaseError::encode(collection.as_str(), e))?;

        let result = sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(id.to_hex())
            .bind(body)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(id),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DatabaseError::DuplicateKey {
                    collection: collection.as_str().to_owned(),
                    id: id.to_hex(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT body FROM documents");
        push_filter(&mut builder, collection, filter);
        builder.push(" LIMIT 1");

        let body = builder
            .build_query_scalar::<String>()
            .fetch_optional(&self.pool)
            .await?;
        body.map(|body| parse_body(collection, &body)).transpose()
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT body FROM documents");
        push_filter(&mut builder, collection, filter);

        let bodies = builder
            .build_query_scalar::<String>()
            .fetch_all(&self.pool)
            .await?;
        bodies
            .iter()
            .map(|body| parse_body(collection, body))
            .collect()
    }

    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        mut document: Document,
    ) -> Result<bool, DatabaseError> {
        let Some(id) = self.matching_id(collection, filter).await? else {
            return Ok(false);
        };

        document.insert(fields::ID.to_owned(), Value::from(id.clone()));
        let body = serde_json::to_string(&document)
            .map_err(|e| DatabaseError::encode(collection.as_str(), e))?;

        let result = sqlx::query("UPDATE documents SET body = $1 WHERE collection = $2 AND id = $3")
            .bind(body)
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<bool, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "DELETE FROM documents WHERE rowid IN (SELECT rowid FROM documents",
        );
        push_filter(&mut builder, collection, filter);
        builder.push(" LIMIT 1)");

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

fn parse_body(collection: Collection, body: &str) -> Result<Document, DatabaseError> {
    serde_json::from_str(body).map_err(|e| DatabaseError::decode(collection.as_str(), e))
}

/// Bindable form of a JSON scalar as `json_extract` returns it
enum Scalar {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Scalar {
    /// `None` for JSON null, which has to be compared with `IS NULL`
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Integer(i64::from(*flag))),
            Value::Number(number) => Some(
                number
                    .as_i64()
                    .map_or_else(|| Self::Real(number.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            ),
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Array(_) | Value::Object(_) => Some(Self::Text(value.to_string())),
        }
    }

    fn push(self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Self::Integer(v) => {
                builder.push_bind(v);
            }
            Self::Real(v) => {
                builder.push_bind(v);
            }
            Self::Text(v) => {
                builder.push_bind(v);
            }
        }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, collection: Collection, filter: &Filter) {
    builder.push(" WHERE collection = ");
    builder.push_bind(collection.as_str());
    for predicate in filter.predicates() {
        builder.push(" AND ");
        push_predicate(builder, predicate);
    }
}

fn push_field(builder: &mut QueryBuilder<'_, Sqlite>, field: &str) {
    if field == fields::ID {
        builder.push("id");
    } else {
        builder.push("json_extract(body, ");
        builder.push_bind(format!("$.\"{field}\""));
        builder.push(")");
    }
}

fn push_predicate(builder: &mut QueryBuilder<'_, Sqlite>, predicate: &Predicate) {
    match predicate {
        Predicate::Eq { field, value } => {
            push_field(builder, field);
            match Scalar::from_json(value) {
                Some(scalar) => {
                    builder.push(" = ");
                    scalar.push(builder);
                }
                None => {
                    builder.push(" IS NULL");
                }
            }
        }
        Predicate::In { field, values } => {
            let accepts_null = values.iter().any(Value::is_null);
            let scalars: Vec<Scalar> = values.iter().filter_map(Scalar::from_json).collect();

            if scalars.is_empty() && !accepts_null {
                builder.push("0 = 1");
                return;
            }

            builder.push("(");
            if !scalars.is_empty() {
                push_field(builder, field);
                builder.push(" IN (");
                for (index, scalar) in scalars.into_iter().enumerate() {
                    if index > 0 {
                        builder.push(", ");
                    }
                    scalar.push(builder);
                }
                builder.push(")");
                if accepts_null {
                    builder.push(" OR ");
                }
            }
            if accepts_null {
                push_field(builder, field);
                builder.push(" IS NULL");
            }
            builder.push(")");
        }
    }
}
