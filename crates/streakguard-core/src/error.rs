//! Error types for the freeze engine and its store.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure the holiday-period engine, store and service can report.
#[derive(Error, Debug)]
pub enum FreezeError {
    /// End before start, or a start date in the past
    #[error("Invalid date range: {reason}")]
    InvalidDateRange { reason: String },

    /// Free-tier quota (count or duration) exhausted
    #[error("Holiday allowance exceeded: {reason}")]
    AllowanceExceeded {
        reason: String,
        requires_premium: bool,
    },

    /// A non-"all" scope that names no habit or task
    #[error("Empty selection: a '{scope}' holiday must name at least one {scope} target")]
    EmptySelection { scope: String },

    /// The user already has an active period
    #[error("Holiday period {id} is already active; cancel it before creating another")]
    ActivePeriodExists { id: u64 },

    /// The period is already inactive (cancelled or expired)
    #[error("Holiday period {id} is already inactive")]
    AlreadyInactive { id: u64 },

    /// No period with this ID belongs to the user
    #[error("Holiday period with ID {id} not found")]
    NotFound { id: u64 },

    /// Opaque store failure while creating a period
    #[error("Failed to create holiday period: {message}")]
    CreateFailed { message: String },

    /// Opaque store failure while cancelling a period
    #[error("Failed to cancel holiday period: {message}")]
    CancelFailed { message: String },

    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),

    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

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
    pub fn with_source(self, source: rusqlite::Error) -> FreezeError {
        FreezeError::Database {
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
    pub fn with_reason(self, reason: impl Into<String>) -> FreezeError {
        FreezeError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl FreezeError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an [`FreezeError::InvalidDateRange`] with the given reason.
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidDateRange {
            reason: reason.into(),
        }
    }

    /// Whether the caller should route the user to an upgrade flow.
    pub fn requires_premium(&self) -> bool {
        matches!(
            self,
            FreezeError::AllowanceExceeded {
                requires_premium: true,
                ..
            }
        )
    }

    /// Errors that the caller may treat as success.
    ///
    /// Cancelling a period twice lands here: the period is inactive either
    /// way.
    pub fn is_idempotent_success(&self) -> bool {
        matches!(self, FreezeError::AlreadyInactive { .. })
    }

    /// Store-side failures that are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FreezeError::CreateFailed { .. }
                | FreezeError::CancelFailed { .. }
                | FreezeError::Database { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;

    /// Map database errors to [`FreezeError::CreateFailed`].
    fn create_context(self, message: &str) -> Result<T>;

    /// Map database errors to [`FreezeError::CancelFailed`].
    fn cancel_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| FreezeError::database(message).with_source(e))
    }

    fn create_context(self, message: &str) -> Result<T> {
        self.map_err(|e| FreezeError::CreateFailed {
            message: format!("{message}: {e}"),
        })
    }

    fn cancel_context(self, message: &str) -> Result<T> {
        self.map_err(|e| FreezeError::CancelFailed {
            message: format!("{message}: {e}"),
        })
    }
}

/// Result type alias for freeze engine operations
pub type Result<T> = std::result::Result<T, FreezeError>;
