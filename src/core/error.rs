/// Shell Error Module
///
/// This module defines the error type shared by every part of sqlshell.
/// Splitting and rendering never fail; errors come from the database,
/// the configuration file, I/O, or a malformed shell command.
use thiserror::Error;

/// Error type for the sqlshell application.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Database-related errors from SQLite operations (opening, pragmas)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A statement rejected by the database engine (syntax, missing table, constraint)
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown shell meta-command or bad arguments to one
    #[error("Command error: {0}")]
    Command(String),
}

/// Type alias for Result to use ShellError as the error type.
pub type Result<T> = std::result::Result<T, ShellError>;
