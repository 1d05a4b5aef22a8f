//! # Database & Store Error Types
//!
//! Error types for database operations and the shell-facing facade.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← adds context and categorization                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← merges domain errors from lavka-core        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation shell displays a user-friendly message                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The split matters: `DbError` means the storage layer misbehaved (I/O,
//! constraints, corruption), the only genuinely fatal class. `StoreError`
//! additionally carries recoverable rejections (bad credentials, forbidden
//! action, not found, insufficient stock, invalid input).

use thiserror::Error;

use lavka_core::{CoreError, ValidationError};

// =============================================================================
// DbError
// =============================================================================

/// Database operation errors.
///
/// These wrap sqlx errors and provide additional context for debugging and
/// user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation (duplicate product name or username).
    #[error("duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A stored value could not be decoded into its domain type.
    ///
    /// ## When This Occurs
    /// - A role string outside the closed {admin, user} set
    /// - Hand-edited rows with the wrong column affinity
    #[error("stored value could not be decoded: {0}")]
    Decode(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    ///
    /// Fatal at startup: the process cannot proceed without storage.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A transaction could not be committed.
    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound     → DbError::NotFound
/// sqlx::Error::Database        → Analyze message for constraint type
/// sqlx::Error::ColumnDecode    → DbError::Decode
/// sqlx::Error::PoolTimedOut    → DbError::PoolExhausted
/// Other                        → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports constraint failures as
                // "UNIQUE constraint failed: <table>.<column>"
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
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::ColumnDecode { index, source } => {
                DbError::Decode(format!("column {index}: {source}"))
            }

            sqlx::Error::Decode(source) => DbError::Decode(source.to_string()),

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

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
// StoreError
// =============================================================================

/// Everything the shell can see go wrong.
///
/// ## Taxonomy
/// - [`StoreError::InvalidCredentials`]: rejected login, re-prompt
/// - [`StoreError::Core`]: recoverable domain rejections: not found,
///   insufficient stock, forbidden action, invalid input
/// - [`StoreError::Db`]: storage-layer failure; fatal when raised during
///   startup, otherwise surfaced as-is
///
/// Empty catalogs and empty order histories are *not* errors: those paths
/// return empty sequences or zero.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Credentials do not match any user.
    ///
    /// Deliberately does not say whether the username or the password was
    /// wrong.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Domain rule violation from lavka-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage-layer failure.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl StoreError {
    /// Whether this error means storage itself is unusable.
    ///
    /// The shell aborts startup on fatal errors and re-prompts on the rest.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StoreError::Db(
                DbError::ConnectionFailed(_) | DbError::MigrationFailed(_) | DbError::PoolExhausted
            )
        )
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Db(err.into())
    }
}

/// Result type for store facade operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_db_error() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
    }

    #[test]
    fn test_fatal_classification() {
        let fatal = StoreError::Db(DbError::ConnectionFailed("disk full".to_string()));
        assert!(fatal.is_fatal());

        let recoverable = StoreError::InvalidCredentials;
        assert!(!recoverable.is_fatal());

        let not_found: StoreError = CoreError::ProductNotFound("цветы".to_string()).into();
        assert!(!not_found.is_fatal());
    }

    #[test]
    fn test_validation_chains_into_store_error() {
        let err: StoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));
    }
}
