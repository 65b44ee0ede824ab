//! Cached accessor over the named tables.
//!
//! [`TableStore`] owns a backend (SQLite in production, in-memory for
//! tests) and a per-store TTL cache. Every write is a full-table
//! replacement followed by immediate cache invalidation, so a fetch right
//! after a save always observes the written rows.
//!
//! There is no cross-process locking: two concurrent writers race and the
//! later save wins (full overwrite). Deployments assume a single operator;
//! the sequential single-writer path is the supported contract.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::config::Config;
use crate::error::StoreError;
use crate::schema::{self, TableSchema};
use crate::table::{Row, Table};

mod memory;
mod migrations;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Storage seam: whole-table read and whole-table replace, keyed by the
/// declared schema. No partial updates exist at this layer.
pub trait TableBackend: Send {
    fn read_table(&self, schema: &'static TableSchema) -> Result<Vec<Row>, StoreError>;
    fn write_table(&self, schema: &'static TableSchema, rows: &[Row]) -> Result<(), StoreError>;
}

struct CachedTable {
    rows: Vec<Row>,
    fetched_at: Instant,
}

pub struct TableStore {
    backend: Box<dyn TableBackend>,
    cache: Mutex<HashMap<&'static str, CachedTable>>,
    ttl: Duration,
}

impl TableStore {
    /// Open the production store: SQLite at the configured path, schema
    /// brought current by migrations.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let path = config.resolve_store_path()?;
        let backend = SqliteBackend::open_at(&path)?;
        log::info!("Table store ready at {}", path.display());
        Ok(Self::with_backend(
            Box::new(backend),
            Duration::from_secs(config.cache_ttl_seconds),
        ))
    }

    /// Build a store over an explicit backend. Useful for tests.
    pub fn with_backend(backend: Box<dyn TableBackend>, ttl: Duration) -> Self {
        Self {
            backend,
            cache: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Volatile store with no backing file.
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryBackend::new()), Duration::from_secs(60))
    }

    /// Full contents of a named table, served from the cache when the
    /// cached copy is younger than the TTL.
    pub fn fetch(&self, table: &str) -> Result<Table, StoreError> {
        let schema = schema::lookup(table)?;

        if self.ttl > Duration::ZERO {
            let cache = self.cache.lock();
            if let Some(entry) = cache.get(schema.name) {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Ok(Table {
                        schema,
                        rows: entry.rows.clone(),
                    });
                }
            }
        }

        let rows = self.backend.read_table(schema)?;
        if self.ttl > Duration::ZERO {
            self.cache.lock().insert(
                schema.name,
                CachedTable {
                    rows: rows.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }
        Ok(Table { schema, rows })
    }

    /// Append one row: read the full table, concat, write the full table
    /// back. A row arriving without an `id` gets a generated one.
    pub fn append(&self, table: &str, mut row: Row) -> Result<(), StoreError> {
        if row.get("id").is_empty() {
            row.set("id", Uuid::new_v4().to_string());
        }
        let snapshot = self.fetch(table)?;
        let mut rows = snapshot.rows;
        rows.push(row);
        self.save(table, rows)?;
        log::info!("Appended row to {table} ({} rows)", self.row_count(table));
        Ok(())
    }

    /// Replace the full contents of a named table, then drop any cached
    /// copy so the next fetch observes the written rows.
    pub fn save(&self, table: &str, rows: Vec<Row>) -> Result<(), StoreError> {
        let schema = schema::lookup(table)?;
        self.backend.write_table(schema, &rows)?;
        self.invalidate(schema.name);
        Ok(())
    }

    /// Read-modify-write of the single row whose `id` matches. Returns
    /// whether a row matched; no save happens when none does.
    pub fn update_row<F>(&self, table: &str, id: &str, mutate: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut Row),
    {
        let snapshot = self.fetch(table)?;
        let mut rows = snapshot.rows;
        let Some(row) = rows.iter_mut().find(|r| r.text("id") == id) else {
            return Ok(false);
        };
        mutate(row);
        self.save(table, rows)?;
        Ok(true)
    }

    fn invalidate(&self, table: &'static str) {
        self.cache.lock().remove(table);
    }

    fn row_count(&self, table: &str) -> usize {
        self.fetch(table).map(|t| t.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PUNCH_LIST;

    fn test_store() -> TableStore {
        let _ = env_logger::builder().is_test(true).try_init();
        TableStore::in_memory()
    }

    fn finding_row(item: &str) -> Row {
        Row::new()
            .with("date", "2026-08-01")
            .with("category", "Mechanical")
            .with("item", item)
            .with("status", "Pending")
            .with("impact", "Low")
    }

    #[test]
    fn test_fetch_after_save_observes_written_rows() {
        let store = test_store();
        let before = store.fetch("punch_list").unwrap();
        assert!(before.is_empty());

        let mut rows = before.rows;
        rows.push(finding_row("HVAC filter"));
        store.save("punch_list", rows).unwrap();

        let after = store.fetch("punch_list").unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after.rows[0].text("item"), "HVAC filter");
    }

    #[test]
    fn test_two_sequential_appends_keep_both_rows() {
        let store = test_store();
        store.append("punch_list", finding_row("Gutter leak")).unwrap();
        store.append("punch_list", finding_row("Pool pump")).unwrap();

        let table = store.fetch("punch_list").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].text("item"), "Gutter leak");
        assert_eq!(table.rows[1].text("item"), "Pool pump");
    }

    #[test]
    fn test_append_generates_id() {
        let store = test_store();
        store.append("punch_list", finding_row("Deck stain")).unwrap();
        let table = store.fetch("punch_list").unwrap();
        assert!(!table.rows[0].text("id").is_empty());
    }

    #[test]
    fn test_append_keeps_supplied_id() {
        let store = test_store();
        store
            .append("punch_list", finding_row("Deck stain").with("id", "f-1"))
            .unwrap();
        let table = store.fetch("punch_list").unwrap();
        assert_eq!(table.rows[0].text("id"), "f-1");
    }

    #[test]
    fn test_cache_serves_within_ttl() {
        // Write through the backend directly; a cached fetch must not see it.
        let backend = MemoryBackend::new();
        let handle = backend.clone();
        let store = TableStore::with_backend(Box::new(backend), Duration::from_secs(300));

        store.append("punch_list", finding_row("First")).unwrap();
        assert_eq!(store.fetch("punch_list").unwrap().len(), 1);

        handle
            .write_table(&PUNCH_LIST, &[finding_row("First"), finding_row("Second")])
            .unwrap();
        // Still the cached single-row copy
        assert_eq!(store.fetch("punch_list").unwrap().len(), 1);
    }

    #[test]
    fn test_save_invalidates_cache() {
        let store = test_store();
        store.append("punch_list", finding_row("First")).unwrap();
        assert_eq!(store.fetch("punch_list").unwrap().len(), 1);

        // Save through the store; the very next fetch must be fresh.
        store.save("punch_list", vec![finding_row("Replaced")]).unwrap();
        let table = store.fetch("punch_list").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].text("item"), "Replaced");
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let backend = MemoryBackend::new();
        let handle = backend.clone();
        let store = TableStore::with_backend(Box::new(backend), Duration::ZERO);

        store.append("punch_list", finding_row("First")).unwrap();
        handle
            .write_table(&PUNCH_LIST, &[finding_row("First"), finding_row("Second")])
            .unwrap();
        assert_eq!(store.fetch("punch_list").unwrap().len(), 2);
    }

    #[test]
    fn test_update_row_by_id() {
        let store = test_store();
        store
            .append("punch_list", finding_row("Pool pump").with("id", "f-9"))
            .unwrap();

        let found = store
            .update_row("punch_list", "f-9", |row| row.set("status", "Resolved"))
            .unwrap();
        assert!(found);
        assert_eq!(
            store.fetch("punch_list").unwrap().rows[0].text("status"),
            "Resolved"
        );

        let missing = store
            .update_row("punch_list", "no-such-id", |row| row.set("status", "Resolved"))
            .unwrap();
        assert!(!missing);
    }

    #[test]
    fn test_unknown_table_is_an_error() {
        let store = test_store();
        assert!(matches!(
            store.fetch("tenants"),
            Err(StoreError::UnknownTable(_))
        ));
    }
}
