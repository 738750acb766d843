//! Request validation from schema column rules.

use crate::error::AppError;
use crate::model::{json_kind, ColumnKind, Model, SchemaDescriptor};
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body against the schema. Every required data column must be present, non-null, and of the column's type.
    pub fn validate(body: &Value, schema: &SchemaDescriptor) -> Result<(), AppError> {
        let obj = body
            .as_object()
            .ok_or_else(|| AppError::Validation("body must be a JSON object".into()))?;
        for col in schema.data_columns() {
            match obj.get(col.name) {
                None | Some(Value::Null) if col.required => {
                    return Err(AppError::Validation(format!("{} is required", col.name)));
                }
                None | Some(Value::Null) => {}
                Some(v) => validate_field(col.name, col.kind, v)?,
            }
        }
        Ok(())
    }

    /// Validate and deserialize a create body into the model's draft type.
    pub fn draft<M: Model>(body: Value) -> Result<M::Draft, AppError> {
        Self::validate(&body, M::schema())?;
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
    }
}

fn validate_field(col: &str, kind: ColumnKind, v: &Value) -> Result<(), AppError> {
    if kind == ColumnKind::Text && !v.is_string() {
        return Err(AppError::Validation(format!(
            "{} must be a string, got {}",
            col,
            json_kind(v)
        )));
    }
    Ok(())
}
