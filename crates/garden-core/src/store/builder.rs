//! Builder for creating and configuring GardenStore instances.

use std::path::{Path, PathBuf};

use super::{GardenStore, Location};
use crate::error::{GardenError, Result};

/// Builder for creating and configuring [`GardenStore`] instances.
#[derive(Debug, Clone, Default)]
pub struct GardenStoreBuilder {
    database_path: Option<PathBuf>,
    in_memory: bool,
}

impl GardenStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/garden/garden.db` or `~/.local/share/garden/garden.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Keeps all data in memory; nothing survives the process.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Builds the configured store.
    ///
    /// The database itself is opened lazily on first use; this only resolves
    /// the path and makes sure its parent directory exists.
    ///
    /// # Errors
    ///
    /// Returns `GardenError::XdgDirectory` if the default path cannot be
    /// resolved, or `GardenError::FileSystem` if its directory cannot be
    /// created.
    pub fn build(self) -> Result<GardenStore> {
        if self.in_memory {
            return Ok(GardenStore::new(Location::Memory));
        }

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| GardenError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        Ok(GardenStore::new(Location::File(db_path)))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("garden")
            .place_data_file("garden.db")
            .map_err(|e| GardenError::XdgDirectory(e.to_string()))
    }
}
