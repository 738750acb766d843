//! Builds parameterized INSERT and SELECT statements, plus table DDL, from a schema descriptor.

use crate::model::{Row, SchemaDescriptor};
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from schema descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

fn select_column_list(schema: &SchemaDescriptor) -> String {
    schema.column_names().map(quoted).collect::<Vec<_>>().join(", ")
}

/// SELECT every row ordered by primary key.
pub fn select_all(schema: &SchemaDescriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(schema),
        quoted(schema.table),
        quoted(schema.primary_key)
    );
    q
}

/// SELECT by primary key. Caller passes the id as sole param.
pub fn select_by_id(schema: &SchemaDescriptor, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::Number(id.into()));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(schema),
        quoted(schema.table),
        quoted(schema.primary_key),
        n
    );
    q
}

/// INSERT the data columns of `row` and return the stored row. The primary key is left to the database.
pub fn insert(schema: &SchemaDescriptor, row: &Row) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for col in schema.data_columns() {
        let v = row.get(col.name).cloned().unwrap_or(Value::Null);
        let n = q.push_param(v);
        cols.push(quoted(col.name));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(schema.table),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(schema)
    );
    q
}

/// CREATE TABLE IF NOT EXISTS with one column per descriptor entry.
pub fn create_table(schema: &SchemaDescriptor) -> String {
    let defs: Vec<String> = schema
        .columns
        .iter()
        .map(|c| {
            let mut def = format!("{} {}", quoted(c.name), c.kind.pg_type());
            if c.name == schema.primary_key {
                def.push_str(" PRIMARY KEY");
            } else if c.required {
                def.push_str(" NOT NULL");
            }
            def
        })
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(schema.table),
        defs.join(", ")
    )
}

pub fn drop_table(schema: &SchemaDescriptor) -> String {
    format!("DROP TABLE IF EXISTS {}", quoted(schema.table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cat, Model};
    use serde_json::json;

    #[test]
    fn insert_binds_data_columns_in_schema_order() {
        let mut row = Row::new();
        row.insert("snack".into(), json!("Tuna"));
        row.insert("name".into(), json!("Whiskers"));
        row.insert("breed".into(), json!("Tabby"));
        let q = insert(Cat::schema(), &row);
        assert_eq!(
            q.sql,
            r#"INSERT INTO "cats" ("name", "breed", "snack") VALUES ($1, $2, $3) RETURNING "id", "name", "breed", "snack""#
        );
        assert_eq!(q.params, vec![json!("Whiskers"), json!("Tabby"), json!("Tuna")]);
    }

    #[test]
    fn select_by_id_binds_id() {
        let q = select_by_id(Cat::schema(), 42);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "name", "breed", "snack" FROM "cats" WHERE "id" = $1"#
        );
        assert_eq!(q.params, vec![json!(42)]);
    }

    #[test]
    fn select_all_orders_by_primary_key() {
        let q = select_all(Cat::schema());
        assert!(q.sql.ends_with(r#"ORDER BY "id""#));
        assert!(q.params.is_empty());
    }

    #[test]
    fn ddl_is_idempotent() {
        assert_eq!(
            create_table(Cat::schema()),
            r#"CREATE TABLE IF NOT EXISTS "cats" ("id" BIGSERIAL PRIMARY KEY, "name" TEXT NOT NULL, "breed" TEXT NOT NULL, "snack" TEXT NOT NULL)"#
        );
        assert_eq!(drop_table(Cat::schema()), r#"DROP TABLE IF EXISTS "cats""#);
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quoted(r#"we"ird"#), r#""we""ird""#);
    }
}
