use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};

use super::validate::Validate;

/// A value bound to a named column, either for writes or for equality filters
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Text(String),
    Int(i64),
    Bool(bool),
    Decimal(Decimal),
    Timestamp(DateTime<Utc>),
}

impl ColumnValue {
    /// Canonical text form used to compare against serialized entity fields
    fn canonical(&self) -> Option<String> {
        match self {
            ColumnValue::Null => None,
            ColumnValue::Text(s) => Some(s.clone()),
            ColumnValue::Int(i) => Some(i.to_string()),
            ColumnValue::Bool(b) => Some(b.to_string()),
            ColumnValue::Decimal(d) => Some(d.normalize().to_string()),
            ColumnValue::Timestamp(ts) => serde_json::to_value(ts)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string)),
        }
    }

    /// Whether a serialized entity field equals this value
    pub fn matches(&self, field: &serde_json::Value) -> bool {
        let field = match field {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(match s.parse::<Decimal>() {
                Ok(d) if matches!(self, ColumnValue::Decimal(_)) => d.normalize().to_string(),
                _ => s.clone(),
            }),
            other => Some(other.to_string()),
        };

        field == self.canonical()
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::Text(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Text(value.to_string())
    }
}

impl From<Decimal> for ColumnValue {
    fn from(value: Decimal) -> Self {
        ColumnValue::Decimal(value)
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(value: DateTime<Utc>) -> Self {
        ColumnValue::Timestamp(value)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ColumnValue::Null)
    }
}

/// Input payloads that write a set of columns
pub trait Columns {
    /// Columns to write; update payloads return only the fields that were supplied
    fn columns(&self) -> Vec<(&'static str, ColumnValue)>;
}

/// A persisted record addressed by an immutable string identifier.
///
/// The generic service, controller and repositories are written against this
/// trait only; each domain type supplies its table, route and payload types.
pub trait Entity: Clone + Serialize + Send + Sync + Unpin + 'static {
    /// Create payload
    type Create: Columns + Validate + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Partial update payload
    type Update: Columns + Validate + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Human-readable name used in error messages
    const NAME: &'static str;

    /// Backing table
    const TABLE: &'static str;

    /// Route prefix, e.g. `/coworkers`
    const PATH: &'static str;

    /// Stored columns; also the set of columns equality filters may reference
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    /// Build a new record from a create payload and server-generated fields
    fn from_create(id: String, data: &Self::Create, now: DateTime<Utc>) -> Self;

    /// Apply a partial update in place
    fn apply_update(&mut self, data: &Self::Update, now: DateTime<Utc>);
}
