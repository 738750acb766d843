//! Entity model: schema descriptors, rows, and the `Model` trait every resource implements.

mod cat;

pub use cat::{Cat, NewCat};

use crate::error::StoreError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Column name to scalar value. Moves data between an entity and its storage encoding.
pub type Row = serde_json::Map<String, Value>;

/// Storage type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Auto-incrementing 64-bit primary key.
    Serial,
    Text,
}

impl ColumnKind {
    pub fn pg_type(&self) -> &'static str {
        match self {
            ColumnKind::Serial => "BIGSERIAL",
            ColumnKind::Text => "TEXT",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Must be present and non-null in a create payload.
    pub required: bool,
}

/// Hand-written table layout for an entity. Consumed by the schema preparer and SQL builder.
#[derive(Clone, Copy, Debug)]
pub struct SchemaDescriptor {
    pub table: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
}

impl SchemaDescriptor {
    /// Columns supplied by the client (everything but the primary key).
    pub fn data_columns(&self) -> impl Iterator<Item = &ColumnDef> + '_ {
        self.columns.iter().filter(move |c| c.name != self.primary_key)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }
}

/// A persistable resource: a draft (no id) becomes a stored entity once the store assigns an id.
pub trait Model: Serialize + Clone + Send + Sync + Sized + 'static {
    /// The entity before it has been stored.
    type Draft: DeserializeOwned + Send + Sync + 'static;

    fn schema() -> &'static SchemaDescriptor;

    fn id(&self) -> i64;

    fn draft_to_row(draft: &Self::Draft) -> Row;

    fn to_row(&self) -> Row;

    /// Rebuild an entity from storage. Fails with `MalformedRecord` on missing or mistyped columns.
    fn from_row(row: &Row) -> Result<Self, StoreError>;
}

pub(crate) fn text_column(row: &Row, column: &str) -> Result<String, StoreError> {
    match row.get(column) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(malformed(column, format!("expected text, got {}", json_kind(other)))),
        None => Err(malformed(column, "is missing".into())),
    }
}

pub(crate) fn int_column(row: &Row, column: &str) -> Result<i64, StoreError> {
    match row.get(column) {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| malformed(column, format!("expected integer, got {}", n))),
        Some(other) => Err(malformed(column, format!("expected integer, got {}", json_kind(other)))),
        None => Err(malformed(column, "is missing".into())),
    }
}

fn malformed(column: &str, reason: String) -> StoreError {
    StoreError::MalformedRecord {
        column: column.to_string(),
        reason,
    }
}

pub(crate) fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
