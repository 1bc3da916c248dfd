//! Database operations and SQLite management for plants, photos and tasks.
//!
//! This module is the storage engine. It owns three collections (`plants`,
//! `photos`, `tasks`), their secondary indexes, and every multi-collection
//! operation. Operations that touch more than one collection, or more than
//! one row, run inside a single SQLite transaction so a failure part-way
//! through leaves nothing applied.
//!
//! The engine performs no retries; failures surface as
//! [`GardenError::Database`](crate::GardenError::Database).

use std::path::Path;

use jiff::Timestamp;
use rusqlite::{ffi, types::Type, Connection, ErrorCode};

use crate::error::{DatabaseResultExt, GardenError, Result};

pub mod migrations;
pub mod photo_queries;
pub mod plant_queries;
pub mod task_queries;

pub use migrations::SCHEMA_VERSION;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database, mostly useful in tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Reads an epoch-millisecond column into a [`Timestamp`].
fn timestamp_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
    let millis: i64 = row.get(idx)?;
    Timestamp::from_millisecond(millis)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

/// Maps a primary-key or unique violation to [`GardenError::DuplicateKey`], anything
/// else to a database error with `message`.
fn insert_error(
    error: rusqlite::Error,
    collection: &'static str,
    key: &str,
    message: &str,
) -> GardenError {
    match error {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && matches!(
                    failure.extended_code,
                    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
                ) =>
        {
            GardenError::DuplicateKey {
                collection,
                key: key.to_string(),
            }
        }
        other => GardenError::database(message).with_source(other),
    }
}
