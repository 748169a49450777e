//! # Storage Error Types
//!
//! Error types for durable storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ├──► CartStore: logged and swallowed (cart stays usable)         │
//! │       │                                                                 │
//! │       └──► ApiError (storefront app): startup failures only            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// The store refused the operation (closed, read-only, injected failure).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Internal storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to StorageError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → StorageError::QueryFailed
/// sqlx::Error::PoolTimedOut   → StorageError::PoolExhausted
/// sqlx::Error::PoolClosed     → StorageError::Unavailable
/// Other                       → StorageError::Internal
/// ```
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StorageError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => StorageError::PoolExhausted,
            sqlx::Error::PoolClosed => StorageError::Unavailable("Pool is closed".to_string()),
            _ => StorageError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StorageError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map() {
        assert!(matches!(
            StorageError::from(sqlx::Error::PoolTimedOut),
            StorageError::PoolExhausted
        ));
        assert!(matches!(
            StorageError::from(sqlx::Error::PoolClosed),
            StorageError::Unavailable(_)
        ));
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::Unavailable("read-only".into());
        assert_eq!(err.to_string(), "Storage unavailable: read-only");
    }
}
