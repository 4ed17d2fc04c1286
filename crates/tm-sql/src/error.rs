//! Error types for tm-sql

use thiserror::Error;

/// SQL tokenizing and splitting errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// SQL could not be tokenized (S001)
    #[error("[S001] SQL tokenize error at line {line}, column {column}: {message}")]
    TokenizeError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Unknown dialect name (S002)
    #[error("[S002] Unknown SQL dialect: {0}")]
    UnknownDialect(String),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
