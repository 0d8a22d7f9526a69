/// Database Module
///
/// The SQLite side of the shell:
/// - **Connection** (`connection.rs`): opens a database and applies startup pragmas
/// - **Query Execution** (`query.rs`): the `Executor` implementation that runs
///   one statement and converts its values to display text
///
/// All database operations report failures as `ShellError`.
pub mod connection;
pub mod query;

pub use connection::*;
pub use query::*;
