use thiserror::Error;

/// Failure taxonomy for storage and ingestion.
///
/// Every variant surfaces to HTTP callers as a 500 with a
/// `{"success": false, "error": ...}` body; the distinction only matters for
/// logging and for library callers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required request field missing, or a value that cannot be interpreted
    #[error("validation error: {0}")]
    Validation(String),

    /// Storage unreachable or the connection URL unusable
    #[error("connectivity error: {0}")]
    Connectivity(String),

    /// Referential integrity rejection from the storage backend
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Any other storage failure
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::Constraint(db.message().to_string())
            }
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::Connectivity(err.to_string())
            }
            _ => AppError::Database(err),
        }
    }
}
