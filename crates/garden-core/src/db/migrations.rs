//! Database schema initialization and migrations.

use log::{debug, warn};

use crate::error::{DatabaseResultExt, Result};

/// Schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    ///
    /// Safe to run on every open: collections and indexes are created only
    /// when missing, and a stored version is never lowered.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let stored_version = self.schema_version()?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        if stored_version < SCHEMA_VERSION {
            debug!("Upgrading schema from version {stored_version} to {SCHEMA_VERSION}");
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .db_context("Failed to record schema version")?;
        } else if stored_version > SCHEMA_VERSION {
            warn!(
                "Database schema version {stored_version} is newer than supported version {SCHEMA_VERSION}; leaving it as is"
            );
        }

        Ok(())
    }

    /// Returns the schema version recorded in the database file.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }
}
