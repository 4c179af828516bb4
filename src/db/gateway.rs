//! Document store gateway: insert-one and equality-filtered find over named collections.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use thiserror::Error;

use crate::config::Config;
use crate::models::Entity;

/// Failures raised by the document store gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No connection exists; the startup connection attempt failed or was never made.
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document store write failed: {0}")]
    Write(String),
    #[error("document store read failed: {0}")]
    Read(String),
}

/// Equality predicates over top-level document fields.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    predicates: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value` exactly.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push((field.into(), value.into()));
        self
    }

    /// Add the predicate only when `value` is present and non-empty.
    pub fn eq_opt(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.eq(field, v),
            _ => self,
        }
    }
}

/// A stored record together with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Flatten into a plain record exposing the identifier as `id`.
    pub fn into_record(self) -> Map<String, Value> {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        fields
    }
}

/// Connectivity snapshot used by the diagnostic endpoints.
#[derive(Debug, Clone)]
pub struct StoreStatus {
    pub connected: bool,
    pub database_name: String,
    pub url_configured: bool,
    pub failure: Option<String>,
}

/// Handle to the document store.
///
/// Built once at startup. A gateway whose connection attempt failed stays unavailable for
/// the process lifetime and never reconnects.
#[derive(Clone)]
pub struct Gateway {
    pool: Option<SqlitePool>,
    database_name: String,
    url_configured: bool,
    failure: Option<String>,
}

impl Gateway {
    /// Make the single startup connection attempt described by `config`.
    pub async fn connect(config: &Config) -> Self {
        let Some(url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL is not set; document store is unavailable");
            return Self::unavailable(&config.database_name, "DATABASE_URL is not set");
        };

        match super::init_database(url).await {
            Ok(pool) => {
                tracing::info!("Connected to document store {:?}", config.database_name);
                Self::connected(pool, &config.database_name)
            }
            Err(e) => {
                tracing::error!("Document store connection failed: {}", e);
                let mut gateway = Self::unavailable(&config.database_name, e.to_string());
                gateway.url_configured = true;
                gateway
            }
        }
    }

    pub fn connected(pool: SqlitePool, database_name: &str) -> Self {
        Self {
            pool: Some(pool),
            database_name: database_name.to_string(),
            url_configured: true,
            failure: None,
        }
    }

    pub fn unavailable(database_name: &str, reason: impl Into<String>) -> Self {
        Self {
            pool: None,
            database_name: database_name.to_string(),
            url_configured: false,
            failure: Some(reason.into()),
        }
    }

    pub fn status(&self) -> StoreStatus {
        StoreStatus {
            connected: self.pool.is_some(),
            database_name: self.database_name.clone(),
            url_configured: self.url_configured,
            failure: self.failure.clone(),
        }
    }

    fn pool(&self) -> Result<&SqlitePool, StoreError> {
        self.pool.as_ref().ok_or_else(|| {
            StoreError::Unavailable(
                self.failure
                    .clone()
                    .unwrap_or_else(|| "not connected".to_string()),
            )
        })
    }

    /// Insert a validated entity into its own collection.
    pub async fn insert_entity<E: Entity>(&self, record: &E) -> Result<String, StoreError> {
        self.insert(E::KIND, record).await
    }

    /// Append `record` to the `kind` collection and return the new identifier.
    pub async fn insert<T: Serialize>(&self, kind: &str, record: &T) -> Result<String, StoreError> {
        let pool = self.pool()?;

        let mut fields = match serde_json::to_value(record) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return Err(StoreError::Write(format!(
                    "record must be an object, got {}",
                    json_type_name(&other)
                )))
            }
            Err(e) => return Err(StoreError::Write(e.to_string())),
        };

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        fields.insert("created_at".to_string(), Value::String(now.clone()));
        fields.insert("updated_at".to_string(), Value::String(now.clone()));

        let id = uuid::Uuid::new_v4().to_string();
        let body = Value::Object(fields).to_string();

        sqlx::query("INSERT INTO documents (id, collection, body, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(kind)
            .bind(&body)
            .bind(&now)
            .execute(pool)
            .await
            .map_err(|e| classify(e, StoreError::Write))?;

        tracing::debug!("Inserted {} document {}", kind, id);
        Ok(id)
    }

    /// Return up to `limit` documents of `kind` matching every predicate of `filter`,
    /// in insertion order.
    pub async fn find(
        &self,
        kind: &str,
        filter: &Filter,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let pool = self.pool()?;

        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT id, body FROM documents WHERE collection = ");
        query.push_bind(kind.to_string());

        for (field, value) in &filter.predicates {
            if !is_plain_field(field) {
                return Err(StoreError::Read(format!(
                    "filter field {:?} is not a top-level field name",
                    field
                )));
            }

            query.push(" AND json_extract(body, ");
            query.push_bind(format!("$.{}", field));
            match value {
                Value::Null => {
                    query.push(") IS NULL");
                }
                Value::Bool(b) => {
                    query.push(") = ");
                    query.push_bind(i64::from(*b));
                }
                Value::Number(n) => {
                    query.push(") = ");
                    match n.as_i64() {
                        Some(i) => query.push_bind(i),
                        None => query.push_bind(n.as_f64().unwrap_or(f64::NAN)),
                    };
                }
                Value::String(s) => {
                    query.push(") = ");
                    query.push_bind(s.clone());
                }
                Value::Array(_) | Value::Object(_) => {
                    query.push(") = json(");
                    query.push_bind(value.to_string());
                    query.push(")");
                }
            }
        }

        query.push(" ORDER BY seq LIMIT ");
        query.push_bind(limit);

        let rows = query
            .build()
            .fetch_all(pool)
            .await
            .map_err(|e| classify(e, StoreError::Read))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let body: String = row.get("body");
                let fields = serde_json::from_str::<Map<String, Value>>(&body).map_err(|e| {
                    StoreError::Read(format!("document {} is not a JSON object: {}", id, e))
                })?;
                Ok(Document { id, fields })
            })
            .collect()
    }

    /// Names of collections holding at least one document, oldest first.
    pub async fn collections(&self) -> Result<Vec<String>, StoreError> {
        let pool = self.pool()?;
        let rows = sqlx::query(
            "SELECT collection FROM documents GROUP BY collection ORDER BY MIN(seq)",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| classify(e, StoreError::Read))?;

        Ok(rows.iter().map(|row| row.get("collection")).collect())
    }
}

fn classify(err: sqlx::Error, otherwise: fn(String) -> StoreError) -> StoreError {
    match err {
        sqlx::Error::PoolClosed => StoreError::Unavailable("connection pool closed".to_string()),
        other => otherwise(other.to_string()),
    }
}

fn is_plain_field(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
