//! SQLite database module for gavel

mod assignments;
mod rubrics;
mod schema;
mod scores;
mod submissions;

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::error::{GavelError, Result};
use crate::store::paths::DB_FILE;

pub use schema::create_schema;

/// SQLite database for gavel
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the given store root
    pub fn open(store_root: &Path) -> Result<Self> {
        let db_path = store_root.join(DB_FILE);

        let conn = Connection::open(&db_path).map_err(|e| {
            GavelError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| GavelError::Other(format!("failed to enable WAL mode: {}", e)))?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| GavelError::Other(format!("failed to enable foreign keys: {}", e)))?;

        let state = create_schema(&conn)
            .map_err(|e| GavelError::Other(format!("failed to create database schema: {}", e)))?;

        if let schema::SchemaState::Incompatible { found } = state {
            return Err(GavelError::InvalidStore {
                reason: format!(
                    "database schema version {} is not supported (expected {})",
                    found,
                    schema::CURRENT_SCHEMA_VERSION
                ),
            });
        }

        Ok(Database { conn })
    }

    pub fn get_schema_version(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT value FROM meta WHERE key = 'schema_version'", [], |r| {
                let s: String = r.get(0)?;
                Ok(s.parse().unwrap_or(0))
            })
            .map_err(|e| GavelError::db_operation("get schema version", e))
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Checkpoint WAL so rapid sequential commands observe each other's
        // committed writes.
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}

/// Parse an RFC 3339 timestamp column
fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| GavelError::Other(format!("invalid {} timestamp {:?}: {}", column, value, e)))
}
