//! # Database Error Types
//!
//! Error types for database operations and the services built on them.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)           Rule violation (CoreError)        │
//! │       │                                     │                           │
//! │       ▼                                     │                           │
//! │  DbError ← Adds context and categorization  │                           │
//! │       │                                     │                           │
//! │       └──────────────┬──────────────────────┘                           │
//! │                      ▼                                                  │
//! │  ServiceError (what every service returns)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Calling layer maps ServiceError::kind() to a response                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kitchen_core::{CoreError, ErrorKind};
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `fetch_one` returns no rows
    /// - ID doesn't exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A guarded write matched no row.
    ///
    /// ## When This Occurs
    /// - The row changed between the rule check and the UPDATE
    ///   (table grouped meanwhile, order status already moved on)
    #[error("{entity} {id} was changed concurrently")]
    Conflict { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting an id twice
    /// - Any UNIQUE index violation
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Menu referencing a missing menu group
    /// - Line item referencing a missing product or menu
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// A stored value no longer passes validation.
    ///
    /// ## When This Occurs
    /// - Malformed UUID or price text
    /// - Row edited by hand outside the services
    #[error("Corrupt {column} value '{value}'")]
    Decode { column: String, value: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    ///
    /// ## When This Occurs
    /// - Invalid SQL in migration
    /// - Migration version conflict
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a Conflict error for a guarded write that matched nothing.
    pub fn conflict(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::Conflict {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Decode error for a column that failed to parse.
    pub fn decode(column: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::Decode {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite error codes for constraints:
                // UNIQUE constraint: "UNIQUE constraint failed: <table>.<column>"
                // FK constraint: "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Service Error
// =============================================================================

/// What every service operation returns on failure.
///
/// A rule violation never leaves a partial write behind: the transaction
/// it happened in is dropped without commit.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A kitchen-core rule rejected the request.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// The database failed.
    #[error(transparent)]
    Storage(#[from] DbError),
}

impl ServiceError {
    /// Returns the taxonomy bucket for this error.
    ///
    /// Guarded-write misses count as conflicts; every other storage
    /// failure is internal.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Domain(err) => err.kind(),
            ServiceError::Storage(DbError::Conflict { .. }) => ErrorKind::Conflict,
            ServiceError::Storage(DbError::NotFound { .. }) => ErrorKind::NotFound,
            ServiceError::Storage(_) => ErrorKind::Internal,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Storage(err.into())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================
