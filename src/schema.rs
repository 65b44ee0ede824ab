//! Declarative schemas for the named tables.
//!
//! Column sets here MUST match the end state of the SQL migrations in
//! `store/migrations/`. The store reads and writes exactly these columns;
//! rows missing a column (created before a migration added it) are filled
//! with defaults during coercion.

use crate::error::StoreError;

/// Storage shape of a column, used by backends to pick an affinity and by
/// coercion to normalize values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Date,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn col(name: &'static str, kind: ColumnKind) -> ColumnDef {
    ColumnDef { name, kind }
}

#[derive(Debug)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

pub const PUNCH_LIST: TableSchema = TableSchema {
    name: "punch_list",
    columns: &[
        col("id", ColumnKind::Text),
        col("property_name", ColumnKind::Text),
        col("date", ColumnKind::Date),
        col("category", ColumnKind::Text),
        col("item", ColumnKind::Text),
        col("status", ColumnKind::Text),
        col("impact", ColumnKind::Text),
        col("due_date", ColumnKind::Date),
        col("cost", ColumnKind::Number),
    ],
};

pub const MASTER_CALENDAR: TableSchema = TableSchema {
    name: "master_calendar",
    columns: &[
        col("id", ColumnKind::Text),
        col("property_name", ColumnKind::Text),
        col("frequency", ColumnKind::Text),
        col("system", ColumnKind::Text),
        col("task", ColumnKind::Text),
        col("instructions", ColumnKind::Text),
    ],
};

pub const VENDORS: TableSchema = TableSchema {
    name: "vendors",
    columns: &[
        col("id", ColumnKind::Text),
        col("company_name", ColumnKind::Text),
        col("service", ColumnKind::Text),
        col("name", ColumnKind::Text),
        col("phone", ColumnKind::Text),
        col("email", ColumnKind::Text),
    ],
};

/// All tables the store manages.
pub const ALL_TABLES: &[&TableSchema] = &[&PUNCH_LIST, &MASTER_CALENDAR, &VENDORS];

/// Resolve a table name to its schema.
pub fn lookup(name: &str) -> Result<&'static TableSchema, StoreError> {
    ALL_TABLES
        .iter()
        .find(|schema| schema.name == name)
        .copied()
        .ok_or_else(|| StoreError::UnknownTable(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_tables() {
        assert_eq!(lookup("punch_list").unwrap().name, "punch_list");
        assert_eq!(lookup("master_calendar").unwrap().name, "master_calendar");
        assert_eq!(lookup("vendors").unwrap().name, "vendors");
    }

    #[test]
    fn test_lookup_unknown_table() {
        assert!(matches!(
            lookup("tenants"),
            Err(StoreError::UnknownTable(_))
        ));
    }

    #[test]
    fn test_every_table_has_an_id_column() {
        for schema in ALL_TABLES {
            assert_eq!(schema.columns[0].name, "id", "{}", schema.name);
        }
    }
}
