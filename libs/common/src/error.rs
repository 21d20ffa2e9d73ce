//! Custom error types for the common library

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Custom error type for session-token operations
#[derive(Error, Debug)]
pub enum TokenError {
    /// Token is malformed, has a bad signature, or has expired
    #[error("Invalid or expired token")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// Configuration error
    #[error("Token configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with TokenError
pub type TokenResult<T> = Result<T, TokenError>;
