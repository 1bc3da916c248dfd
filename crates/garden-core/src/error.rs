//! Error types for the garden library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all garden operations.
#[derive(Error, Debug)]
pub enum GardenError {
    /// Storage failures: I/O, quota, corrupt records, aborted transactions
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A record with the same primary key already exists
    #[error("A record with key '{key}' already exists in {collection}")]
    DuplicateKey {
        collection: &'static str,
        key: String,
    },
    /// Plant not found for the given ID
    #[error("Plant with ID {id} not found")]
    PlantNotFound { id: String },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The chat-completion service rejected the request
    #[error("{message}")]
    Upstream { message: String },
    /// Transport-level failure talking to the chat-completion service
    #[error("Failed to communicate with the AI service: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
    /// The AI reply could not be turned into the requested structure
    #[error("Could not parse AI output: {reason}")]
    AiOutput { reason: String },
    /// The image collaborator failed to compress a photo
    #[error("{message}")]
    ImageProcessing { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> GardenError {
        GardenError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> GardenError {
        GardenError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl GardenError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::database(message).with_source(source)
    }

    /// Whether this error is a storage-layer failure.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Database { .. } | Self::DuplicateKey { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| GardenError::database(message).with_source(e))
    }
}

/// Result type alias for garden operations
pub type Result<T> = std::result::Result<T, GardenError>;
