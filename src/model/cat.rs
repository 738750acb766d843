use super::{int_column, text_column, ColumnDef, ColumnKind, Model, Row, SchemaDescriptor};
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static CAT_SCHEMA: SchemaDescriptor = SchemaDescriptor {
    table: "cats",
    primary_key: "id",
    columns: &[
        ColumnDef { name: "id", kind: ColumnKind::Serial, required: false },
        ColumnDef { name: "name", kind: ColumnKind::Text, required: true },
        ColumnDef { name: "breed", kind: ColumnKind::Text, required: true },
        ColumnDef { name: "snack", kind: ColumnKind::Text, required: true },
    ],
};

/// A stored cat. The id is assigned by the store on first save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub snack: String,
}

/// Create payload for a cat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCat {
    pub name: String,
    pub breed: String,
    pub snack: String,
}

impl Model for Cat {
    type Draft = NewCat;

    fn schema() -> &'static SchemaDescriptor {
        &CAT_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn draft_to_row(draft: &NewCat) -> Row {
        let mut row = Row::new();
        row.insert("name".into(), Value::String(draft.name.clone()));
        row.insert("breed".into(), Value::String(draft.breed.clone()));
        row.insert("snack".into(), Value::String(draft.snack.clone()));
        row
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("id".into(), Value::Number(self.id.into()));
        row.insert("name".into(), Value::String(self.name.clone()));
        row.insert("breed".into(), Value::String(self.breed.clone()));
        row.insert("snack".into(), Value::String(self.snack.clone()));
        row
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Cat {
            id: int_column(row, "id")?,
            name: text_column(row, "name")?,
            breed: text_column(row, "breed")?,
            snack: text_column(row, "snack")?,
        })
    }
}
