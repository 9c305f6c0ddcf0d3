//! SQLite persistence for holiday periods, plan tiers and the habit catalog.
//!
//! Every [`Database`] owns one connection. Callers open a fresh one per
//! operation; SQLite's own locking together with `IMMEDIATE` transactions
//! serializes writers across connections and processes.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod habit_queries;
pub mod migrations;
pub mod period_queries;
pub mod tier_queries;

/// How long a connection waits on a locked database before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
