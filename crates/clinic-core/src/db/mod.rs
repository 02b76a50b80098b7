//! Database layer for the clinic registry.
//!
//! [`Database`] is the persistence session: repositories borrow it for the
//! duration of a request and every mutating call commits before returning.

mod patients;
mod professionals;
mod schema;

pub use patients::*;
pub use professionals::*;
pub use schema::*;

use rusqlite::{Connection, ErrorCode};
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(err, msg) if err.code == ErrorCode::ConstraintViolation => {
                DbError::Constraint(msg.unwrap_or_else(|| err.to_string()))
            }
            other => DbError::Sqlite(other),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        tracing::debug!("Schema initialized");
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> DbResult<rusqlite::Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"patients".to_string()));
        assert!(tables.contains(&"professionals".to_string()));
    }

    #[test]
    fn test_schema_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.initialize().is_ok());
    }

    #[test]
    fn test_check_violation_maps_to_constraint() {
        let db = Database::open_in_memory().unwrap();

        let err = db
            .conn()
            .execute(
                "INSERT INTO professionals (id, name, specialty, license_number, duration) \
                 VALUES (x'01', 'Al', 'Cardiology', 'CRM 1', '30')",
                [],
            )
            .map_err(DbError::from)
            .unwrap_err();

        assert!(matches!(err, DbError::Constraint(_)));
    }

    #[test]
    fn test_transaction_rolls_back_on_drop() {
        let mut db = Database::open_in_memory().unwrap();
        {
            let tx = db.transaction().unwrap();
            tx.execute(
                "INSERT INTO professionals (id, name, specialty, license_number, duration) \
                 VALUES (x'01', 'Ana Lima', 'Cardiology', 'CRM 1', '30')",
                [],
            )
            .unwrap();
        }

        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM professionals", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
