//! Implements a SQLite backed key-value store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, stores::KeyValueStore};

/// Stores key-value pairs in the `cache` table of a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteKeyValueStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteKeyValueStore {
    /// Create a new store for the SQLite `connection`, creating the `cache`
    /// table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_cache_table(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Open, or create, the cache database at `path`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the file cannot be opened as a SQLite
    /// database.
    pub fn open(path: &str) -> Result<Self, Error> {
        let connection = Connection::open(path)?;

        Self::new(connection)
    }
}

/// Create the table that holds cached values.
pub fn create_cache_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS cache (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

impl KeyValueStore for SQLiteKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection
            .query_row("SELECT value FROM cache WHERE key = ?1", (key,), |row| {
                row.get(0)
            })
            .optional()
            .map_err(Error::from)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection.execute(
            "INSERT INTO cache (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}
