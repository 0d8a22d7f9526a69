/// Query Execution Module
///
/// Runs one statement against a SQLite connection and converts the result
/// into an `Outcome` with display-ready text cells.

use crate::core::{Result, ShellError};
use crate::session::{Executor, Outcome, Rowset};
use rusqlite::{types::ValueRef, Batch, Connection};

/// Executor that runs statements on a borrowed SQLite connection.
pub struct SqliteExecutor<'a> {
    connection: &'a Connection,
}

impl<'a> SqliteExecutor<'a> {
    /// Creates a new SqliteExecutor for the given connection
    pub fn new(connection: &'a Connection) -> Self {
        SqliteExecutor { connection }
    }

    /// Executes a single SQL statement.
    ///
    /// Statements without result columns are run to completion and yield
    /// `Outcome::Empty`, as does text holding only comments. Everything
    /// else yields its rowset, even when no row matched.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Query` carrying the engine's message if the
    /// statement cannot be prepared or fails while stepping. Text holding
    /// more than one statement is rejected before anything runs.
    pub fn run_statement(&self, sql: &str) -> Result<Outcome> {
        let mut batch = Batch::new(self.connection, sql);
        let Some(mut stmt) = batch.next().map_err(query_error)? else {
            return Ok(Outcome::Empty);
        };
        // Anything the batch can still prepare, or fails to prepare, is SQL
        // that a single prepare would silently drop.
        if !matches!(batch.next(), Ok(None)) {
            return Err(ShellError::Query(format!(
                "input contains more than one statement, nothing was executed: {}",
                sql
            )));
        }

        if stmt.column_count() == 0 {
            stmt.execute([]).map_err(query_error)?;
            return Ok(Outcome::Empty);
        }

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let column_count = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([]).map_err(query_error)?;
        while let Some(row) = cursor.next().map_err(query_error)? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(format_value(row.get_ref(i).map_err(query_error)?));
            }
            rows.push(values);
        }

        Ok(Outcome::Rows(Rowset::new(columns, rows)))
    }
}

impl Executor for SqliteExecutor<'_> {
    fn execute(&mut self, statement: &str) -> Result<Outcome> {
        self.run_statement(statement)
    }
}

fn query_error(err: rusqlite::Error) -> ShellError {
    ShellError::Query(err.to_string())
}

/// Formats a SQLite value for display
pub fn format_value(value: ValueRef) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => escape_line_breaks(&String::from_utf8_lossy(t)),
        ValueRef::Blob(b) => format!("<BLOB: {} bytes>", b.len()),
    }
}

/// Keeps every cell on one line so table columns stay aligned.
fn escape_line_breaks(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionOptions};
    use crate::test_utils::DatabaseFixture;

    fn count_rows(fixture: &DatabaseFixture) -> i64 {
        fixture
            .connection
            .query_row("SELECT COUNT(*) FROM simple_table", [], |row| row.get(0))
            .unwrap()
    }

    fn rowset(outcome: Outcome) -> Rowset {
        match outcome {
            Outcome::Rows(rowset) => rowset,
            Outcome::Empty => panic!("Expected a rowset"),
        }
    }

    #[test]
    fn test_ddl_and_dml_are_empty() {
        let fixture = DatabaseFixture::new().unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);

        assert_eq!(
            executor
                .run_statement("CREATE TABLE t (id INTEGER PRIMARY KEY, value TEXT)")
                .unwrap(),
            Outcome::Empty
        );
        assert_eq!(
            executor.run_statement("INSERT INTO t (value) VALUES ('a')").unwrap(),
            Outcome::Empty
        );
    }

    #[test]
    fn test_select_returns_text_rows() {
        let fixture = DatabaseFixture::with_simple_table(&[("value1", 1), ("value2", 2)]).unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);

        let result = rowset(executor.run_statement("SELECT * FROM simple_table").unwrap());
        assert_eq!(result.columns, vec!["id", "textField", "intField"]);
        assert_eq!(
            result.rows,
            vec![vec!["1", "value1", "1"], vec!["2", "value2", "2"]]
        );
    }

    #[test]
    fn test_select_without_rows_keeps_columns() {
        let fixture = DatabaseFixture::with_simple_table(&[]).unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);

        let result = rowset(executor.run_statement("SELECT * FROM simple_table").unwrap());
        assert_eq!(result.columns, vec!["id", "textField", "intField"]);
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_value_formatting() {
        let fixture = DatabaseFixture::new().unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);

        let result = rowset(
            executor
                .run_statement("SELECT NULL, 42, 1.5, 'text', x'0102'")
                .unwrap(),
        );
        assert_eq!(result.rows, vec![vec!["NULL", "42", "1.5", "text", "<BLOB: 2 bytes>"]]);
    }

    #[test]
    fn test_returning_clause_yields_rows() {
        let fixture = DatabaseFixture::with_simple_table(&[]).unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);

        let result = rowset(
            executor
                .run_statement("INSERT INTO simple_table (textField, intField) VALUES ('x', 7) RETURNING intField")
                .unwrap(),
        );
        assert_eq!(result.rows, vec![vec!["7"]]);
    }

    #[test]
    fn test_query_error_handling() {
        let fixture = DatabaseFixture::new().unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);

        match executor.run_statement("SELECT * FROM nonexistent_table") {
            Err(ShellError::Query(msg)) => assert!(msg.contains("no such table")),
            other => panic!("Expected Query error, got {:?}", other),
        }
    }

    #[test]
    fn test_constraint_violation_is_an_error() {
        let fixture = DatabaseFixture::new().unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);
        executor
            .run_statement("CREATE TABLE u (name TEXT UNIQUE)")
            .unwrap();
        executor.run_statement("INSERT INTO u VALUES ('a')").unwrap();

        let result = executor.run_statement("INSERT INTO u VALUES ('a')");
        assert!(matches!(result, Err(ShellError::Query(_))));
    }

    #[test]
    fn test_trailing_statement_is_rejected_not_dropped() {
        let fixture = DatabaseFixture::with_simple_table(&[]).unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);

        let result = executor.run_statement(
            "SELECT 1 AS a; INSERT INTO simple_table(textField, intField) VALUES ('x', 1)",
        );
        match result {
            Err(ShellError::Query(msg)) => assert!(msg.contains("more than one statement")),
            other => panic!("Expected Query error, got {:?}", other),
        }
        assert_eq!(count_rows(&fixture), 0);
    }

    #[test]
    fn test_apostrophe_in_comment_does_not_hide_statements() {
        let fixture = DatabaseFixture::with_simple_table(&[]).unwrap();
        let mut session = Session::new(SqliteExecutor::new(&fixture.connection), SessionOptions::default());

        let report = session.run(
            "-- don't forget\nSELECT 1 AS a; INSERT INTO simple_table(textField, intField) VALUES ('x', 1)",
        );
        assert!(matches!(report.error, Some(ShellError::Query(_))));
        assert_eq!(report.output, "");
        assert_eq!(count_rows(&fixture), 0);
    }

    #[test]
    fn test_apostrophe_in_quoted_identifier_does_not_hide_statements() {
        let fixture = DatabaseFixture::new().unwrap();
        let mut session = Session::new(SqliteExecutor::new(&fixture.connection), SessionOptions::default());

        let report = session.run("SELECT 1 AS \"it's\"; SELECT 2 AS b");
        assert!(matches!(report.error, Some(ShellError::Query(_))));
    }

    #[test]
    fn test_trailing_comment_is_not_a_second_statement() {
        let fixture = DatabaseFixture::new().unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);

        let result = rowset(executor.run_statement("SELECT 1 AS a; -- done").unwrap());
        assert_eq!(result.rows, vec![vec!["1"]]);
    }

    #[test]
    fn test_comment_only_statement_is_empty() {
        let fixture = DatabaseFixture::new().unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);

        assert_eq!(executor.run_statement("/* note */").unwrap(), Outcome::Empty);
        assert_eq!(executor.run_statement("-- note").unwrap(), Outcome::Empty);
    }

    #[test]
    fn test_comment_only_passthrough_runs_on_sqlite() {
        let fixture = DatabaseFixture::new().unwrap();
        let options = SessionOptions {
            skip_comment_only: false,
            ..SessionOptions::default()
        };
        let mut session = Session::new(SqliteExecutor::new(&fixture.connection), options);

        assert_eq!(session.execute("/* note */; SELECT 1 AS a").unwrap(), "a\n1");
    }

    #[test]
    fn test_line_breaks_in_text_are_escaped() {
        let fixture = DatabaseFixture::new().unwrap();
        let executor = SqliteExecutor::new(&fixture.connection);

        let result = rowset(
            executor
                .run_statement("SELECT 'a' || char(10) || 'bbbb' AS x, 'c' || char(13) || 'd' AS y")
                .unwrap(),
        );
        assert_eq!(result.rows, vec![vec!["a\\nbbbb", "c\\rd"]]);
    }
}
