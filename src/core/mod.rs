/// Core Module for sqlshell
///
/// Shared infrastructure: the error type and the SQLite execution adapter.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{Result, ShellError};
