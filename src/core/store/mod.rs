//! SQLite-backed catalog store
//!
//! Holds one table per record shape (four item tables plus treasures and
//! random spells). Item tables are written through [`ItemStore::upsert_item`],
//! everything else in this module is read-only.

mod queries;
mod schema;
mod upsert;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, ErrorCode, Transaction};
use thiserror::Error;

use crate::core::item::{ItemDefaults, ItemKind, ItemRecord};

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Every table the store owns, in display order
pub const TABLES: &[&str] = &[
    "greater_potions",
    "lesser_potions",
    "magic_items",
    "magic_weapons_or_armour",
    "treasures",
    "random_spells",
];

/// The "upsert by key" primitive the importer writes through
pub trait ItemStore {
    /// Look up the item of `kind` whose `die_roll` matches; overwrite its
    /// non-key fields if found, otherwise insert a new row.
    ///
    /// Returns the stored record and `true` when a row was created.
    fn upsert_item(
        &mut self,
        kind: ItemKind,
        die_roll: i64,
        defaults: &ItemDefaults,
    ) -> Result<(ItemRecord, bool), StoreError>;
}

/// The catalog database
pub struct CatalogStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl CatalogStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        tracing::debug!(path = %path.display(), "opened catalog database");

        let mut store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let mut store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Location on disk (None for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Schema version stamped in the database
    pub fn schema_version(&self) -> Result<i32, StoreError> {
        let version: Option<i32> = self
            .conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    /// Begin a transaction that batches a whole import run
    pub fn session(&mut self) -> Result<ImportSession<'_>, StoreError> {
        Ok(ImportSession {
            tx: self.conn.transaction()?,
        })
    }

    /// Row count per table
    pub fn table_counts(&self) -> Result<BTreeMap<&'static str, usize>, StoreError> {
        let mut counts = BTreeMap::new();
        for table in TABLES {
            let count: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", table),
                [],
                |row| row.get(0),
            )?;
            counts.insert(*table, count as usize);
        }
        Ok(counts)
    }

    /// Execute a read-only SQL query, returning column names and stringified rows
    pub fn query_raw(&self, sql: &str) -> Result<(Vec<String>, Vec<Vec<String>>), StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        if !stmt.readonly() {
            return Err(StoreError::ReadOnly(sql.to_string()));
        }

        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let column_count = columns.len();

        let rows = stmt.query_map([], |row| {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value = match row.get::<_, rusqlite::types::Value>(i)? {
                    rusqlite::types::Value::Null => "NULL".to_string(),
                    rusqlite::types::Value::Integer(i) => i.to_string(),
                    rusqlite::types::Value::Real(f) => f.to_string(),
                    rusqlite::types::Value::Text(s) => s,
                    rusqlite::types::Value::Blob(_) => "<blob>".to_string(),
                };
                values.push(value);
            }
            Ok(values)
        })?;

        let rows = rows.collect::<Result<Vec<_>, _>>()?;
        Ok((columns, rows))
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl ItemStore for CatalogStore {
    fn upsert_item(
        &mut self,
        kind: ItemKind,
        die_roll: i64,
        defaults: &ItemDefaults,
    ) -> Result<(ItemRecord, bool), StoreError> {
        upsert::upsert_on(&self.conn, kind, die_roll, defaults)
    }
}

/// A transaction spanning one import run
///
/// Dropping the session without calling [`ImportSession::commit`] rolls it back.
pub struct ImportSession<'a> {
    tx: Transaction<'a>,
}

impl ImportSession<'_> {
    pub fn commit(self) -> Result<(), StoreError> {
        self.tx.commit()?;
        Ok(())
    }

    pub fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback()?;
        Ok(())
    }
}

impl ItemStore for ImportSession<'_> {
    fn upsert_item(
        &mut self,
        kind: ItemKind,
        die_roll: i64,
        defaults: &ItemDefaults,
    ) -> Result<(ItemRecord, bool), StoreError> {
        upsert::upsert_on(&self.tx, kind, die_roll, defaults)
    }
}

/// Errors raised by the catalog store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("constraint violation on {table}: {message}")]
    Constraint { table: &'static str, message: String },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("cannot create database directory {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database schema version {found} is newer than this binary supports ({supported})")]
    SchemaTooNew { found: i32, supported: i32 },

    #[error("refusing to run a statement that modifies the database: {0}")]
    ReadOnly(String),
}

impl StoreError {
    /// Classify a SQLite error raised while writing to `table`
    fn from_write(table: &'static str, err: rusqlite::Error) -> Self {
        if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
            StoreError::Constraint {
                table,
                message: err.to_string(),
            }
        } else {
            StoreError::Sqlite(err)
        }
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, StoreError::Constraint { .. })
    }
}

#[cfg(test)]
mod tests;
