//! SQLite backend: one relational table per named table, dumped and
//! reloaded wholesale. Replacement runs inside a `BEGIN IMMEDIATE`
//! transaction so a failed write never leaves a half-emptied table.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::error::StoreError;
use crate::schema::{ColumnKind, TableSchema};
use crate::table::{Row, Value, DATE_FORMAT};

use super::{migrations, TableBackend};

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open (or create) the database file and bring the schema current.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::CreateDir(parent.to_path_buf(), e))?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))?;

        // WAL keeps concurrent readers cheap
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        migrations::run_migrations(&conn).map_err(StoreError::Migration)?;

        Ok(Self { conn })
    }

    /// Execute a closure within a transaction. Commits on Ok, rolls back
    /// on Err.
    fn with_transaction<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        match f(&self.conn) {
            Ok(val) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(val)
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}

impl TableBackend for SqliteBackend {
    fn read_table(&self, schema: &'static TableSchema) -> Result<Vec<Row>, StoreError> {
        let column_list = schema
            .columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT {column_list} FROM {} ORDER BY rowid", schema.name);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut sql_rows = stmt.query([])?;

        let mut rows = Vec::new();
        while let Some(sql_row) = sql_rows.next()? {
            let mut row = Row::new();
            for (i, column) in schema.columns.iter().enumerate() {
                let value = coerce_read(column.kind, sql_row.get_ref(i)?);
                row.set(column.name, value);
            }
            rows.push(row);
        }
        Ok(rows)
    }

    fn write_table(&self, schema: &'static TableSchema, rows: &[Row]) -> Result<(), StoreError> {
        let column_list = schema
            .columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=schema.columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let insert_sql = format!(
            "INSERT INTO {} ({column_list}) VALUES ({placeholders})",
            schema.name
        );

        self.with_transaction(|conn| {
            conn.execute(&format!("DELETE FROM {}", schema.name), [])?;
            let mut stmt = conn.prepare(&insert_sql)?;
            for row in rows {
                let params: Vec<rusqlite::types::Value> = schema
                    .columns
                    .iter()
                    .map(|column| serialize(column.kind, row.get(column.name)))
                    .collect();
                stmt.execute(rusqlite::params_from_iter(params))?;
            }
            Ok(())
        })
    }
}

/// Normalize a stored cell into the column's declared kind. Anything that
/// doesn't fit degrades to Empty rather than erroring.
fn coerce_read(kind: ColumnKind, raw: ValueRef<'_>) -> Value {
    let value = match raw {
        ValueRef::Null | ValueRef::Blob(_) => Value::Empty,
        ValueRef::Integer(n) => Value::Number(n as f64),
        ValueRef::Real(f) => Value::Number(f),
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Value::from(text),
            Err(_) => Value::Empty,
        },
    };

    match kind {
        ColumnKind::Text => value,
        ColumnKind::Number => match value {
            Value::Empty => Value::Empty,
            other => Value::Number(other.as_number()),
        },
        ColumnKind::Date => match value.as_date() {
            Some(d) => Value::Date(d),
            None => Value::Empty,
        },
    }
}

/// Serialize a cell for storage: dates in canonical form, numbers as
/// REAL, empties as NULL.
fn serialize(kind: ColumnKind, value: &Value) -> rusqlite::types::Value {
    use rusqlite::types::Value as SqlValue;

    if value.is_empty() {
        return SqlValue::Null;
    }
    match kind {
        ColumnKind::Number => SqlValue::Real(value.as_number()),
        ColumnKind::Date => match value.as_date() {
            Some(d) => SqlValue::Text(d.format(DATE_FORMAT).to_string()),
            None => SqlValue::Null,
        },
        ColumnKind::Text => SqlValue::Text(value.as_text()),
    }
}
