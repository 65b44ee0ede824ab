//! In-memory backend: a table map behind a shared lock. Used by tests and
//! headless setups that don't want a database file.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::StoreError;
use crate::schema::TableSchema;
use crate::table::Row;

use super::TableBackend;

/// Clones share the same underlying tables, so a test can hold a handle
/// to the data a [`super::TableStore`] writes through.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    tables: Arc<Mutex<HashMap<&'static str, Vec<Row>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableBackend for MemoryBackend {
    fn read_table(&self, schema: &'static TableSchema) -> Result<Vec<Row>, StoreError> {
        Ok(self
            .tables
            .lock()
            .get(schema.name)
            .cloned()
            .unwrap_or_default())
    }

    fn write_table(&self, schema: &'static TableSchema, rows: &[Row]) -> Result<(), StoreError> {
        self.tables.lock().insert(schema.name, rows.to_vec());
        Ok(())
    }
}
