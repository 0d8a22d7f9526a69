//! Session runner
//!
//! Splits one input into statements, executes them in order through an
//! [`Executor`], renders every rowset and joins the rendered tables. The
//! first failing statement ends the run: nothing after it is executed.

use crate::core::{Result, ShellError};
use crate::results_grid::{ResultsGrid, TABLE_SEPARATOR};
use crate::statements::{is_comment_only, split_statements};
use tracing::{debug, warn};

/// Column names and display-ready rows returned by one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rowset {
    /// Column names in result order, not necessarily unique
    pub columns: Vec<String>,
    /// Rows of cells already converted to display text
    pub rows: Vec<Vec<String>>,
}

impl Rowset {
    /// Creates a rowset from column names and text rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Rowset { columns, rows }
    }
}

/// What executing a single statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No rowset (DDL, DML without RETURNING, pragmas that set values)
    Empty,
    /// A rowset, possibly with zero rows
    Rows(Rowset),
}

/// Executes one statement at a time against a database.
///
/// Implementations own the conversion of values to text and report any
/// failure as an error, never as a partial rowset.
pub trait Executor {
    fn execute(&mut self, statement: &str) -> Result<Outcome>;
}

impl<F> Executor for F
where
    F: FnMut(&str) -> Result<Outcome>,
{
    fn execute(&mut self, statement: &str) -> Result<Outcome> {
        self(statement)
    }
}

/// Knobs for a session run.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// Keep the output of statements that ran before a failure
    pub keep_partial_output: bool,
    /// Drop statements made only of comments instead of executing them
    pub skip_comment_only: bool,
    /// Text placed between two consecutive rendered tables
    pub table_separator: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            keep_partial_output: false,
            skip_comment_only: true,
            table_separator: TABLE_SEPARATOR.to_string(),
        }
    }
}

/// Result of running one input.
#[derive(Debug)]
pub struct RunReport {
    /// Rendered tables joined in statement order
    pub output: String,
    /// The error of the statement that stopped the run, if any
    pub error: Option<ShellError>,
    /// Number of statements handed to the executor, including a failing one
    pub executed: usize,
    /// Number of statements never executed because an earlier one failed
    pub skipped: usize,
}

impl RunReport {
    /// True when every statement ran without error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts the report into the output or the stopping error.
    pub fn into_result(self) -> Result<String> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.output),
        }
    }
}

/// Runs raw input through an executor.
pub struct Session<E: Executor> {
    executor: E,
    options: SessionOptions,
}

impl<E: Executor> Session<E> {
    /// Creates a session that runs statements through `executor`.
    pub fn new(executor: E, options: SessionOptions) -> Self {
        Session { executor, options }
    }

    /// The executor statements are handed to.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Executes every statement of `input` in order.
    ///
    /// Empty outcomes add nothing to the output. On the first error the
    /// run stops; the output gathered so far is kept only when
    /// `keep_partial_output` is set.
    pub fn run(&mut self, input: &str) -> RunReport {
        let statements: Vec<&str> = split_statements(input)
            .into_iter()
            .filter(|statement| !(self.options.skip_comment_only && is_comment_only(statement)))
            .collect();

        let mut fragments: Vec<String> = Vec::new();
        let mut executed = 0;

        for (index, statement) in statements.iter().enumerate() {
            debug!(index, statement, "executing statement");
            executed += 1;
            match self.executor.execute(statement) {
                Ok(Outcome::Empty) => {}
                Ok(Outcome::Rows(rowset)) => {
                    debug!(index, rows = rowset.rows.len(), "statement returned rows");
                    fragments.push(ResultsGrid::from(rowset).render());
                }
                Err(err) => {
                    let skipped = statements.len() - executed;
                    warn!(index, skipped, error = %err, "statement failed, stopping");
                    let output = if self.options.keep_partial_output {
                        fragments.join(&self.options.table_separator)
                    } else {
                        String::new()
                    };
                    return RunReport {
                        output,
                        error: Some(err),
                        executed,
                        skipped,
                    };
                }
            }
        }

        RunReport {
            output: fragments.join(&self.options.table_separator),
            error: None,
            executed,
            skipped: 0,
        }
    }

    /// Runs `input` and returns either the whole output or the error.
    pub fn execute(&mut self, input: &str) -> Result<String> {
        self.run(input).into_result()
    }
}
