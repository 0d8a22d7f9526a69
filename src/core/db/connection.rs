/// Connection Module
///
/// Opens SQLite databases for the shell and applies the configured
/// startup pragmas.

use crate::core::Result;
use rusqlite::Connection;
use tracing::{debug, info};

/// Path that selects a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Pragmas applied to every connection when the configuration names none.
pub fn default_pragmas() -> Vec<String> {
    vec!["foreign_keys = ON".to_string()]
}

/// Opens the database at `db_path` and applies each pragma in order.
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file, or ":memory:" for an in-memory database
/// * `pragmas` - Pragma bodies such as `"foreign_keys = ON"`, without the `PRAGMA` keyword
///
/// # Returns
///
/// The open connection, or `ShellError::Database` when the file cannot be
/// opened or a pragma is rejected.
pub fn open_connection(db_path: &str, pragmas: &[String]) -> Result<Connection> {
    let conn = if db_path == MEMORY_PATH {
        Connection::open_in_memory()?
    } else {
        Connection::open(db_path)?
    };
    info!(path = db_path, "opened database");

    for pragma in pragmas {
        debug!(pragma = pragma.as_str(), "applying pragma");
        conn.execute_batch(&format!("PRAGMA {};", pragma))?;
    }

    Ok(conn)
}
