//! Mapping between diesel errors and the core error taxonomy.

use holocron_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Diesel-aware error wrapper; converts into core errors at the crate
/// boundary so the driver never leaks upward.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database query failed: {0}")]
    QueryFailed(#[from] diesel::result::Error),

    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::QueryFailed(diesel::result::Error::NotFound) => {
                Error::NotFound("Record".to_string())
            }
            StorageError::QueryFailed(diesel::result::Error::DatabaseError(kind, info)) => {
                match kind {
                    diesel::result::DatabaseErrorKind::UniqueViolation => Error::Validation(
                        format!("Unique constraint violated: {}", info.message()),
                    ),
                    diesel::result::DatabaseErrorKind::ForeignKeyViolation => Error::Validation(
                        format!("Referenced record does not exist: {}", info.message()),
                    ),
                    _ => Error::Database(DatabaseError::QueryFailed(info.message().to_string())),
                }
            }
            StorageError::QueryFailed(other) => {
                Error::Database(DatabaseError::QueryFailed(other.to_string()))
            }
            StorageError::ConnectionFailed(message) => {
                Error::Database(DatabaseError::ConnectionFailed(message))
            }
        }
    }
}
