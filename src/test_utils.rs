/// # Test Utilities Module
///
/// Fixtures shared by the unit tests: a scripted executor that replays
/// canned outcomes and records every statement it receives, and an
/// in-memory SQLite fixture with the simple table used across tests.

use crate::core::db::open_connection;
use crate::core::{Result, ShellError};
use crate::session::{Executor, Outcome};
use rusqlite::Connection;
use std::collections::VecDeque;

/// Executor that returns scripted results in order and records calls.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    script: VecDeque<Result<Outcome>>,
    calls: Vec<String>,
}

impl ScriptedExecutor {
    pub fn new(script: Vec<Result<Outcome>>) -> Self {
        ScriptedExecutor {
            script: script.into(),
            calls: Vec::new(),
        }
    }

    /// Statements received so far, in order
    pub fn calls(&self) -> Vec<&str> {
        self.calls.iter().map(String::as_str).collect()
    }
}

impl Executor for ScriptedExecutor {
    fn execute(&mut self, statement: &str) -> Result<Outcome> {
        self.calls.push(statement.to_string());
        self.script.pop_front().unwrap_or_else(|| {
            Err(ShellError::Query(format!(
                "no scripted result for statement: {}",
                statement
            )))
        })
    }
}

/// Isolated in-memory database fixture
pub struct DatabaseFixture {
    pub connection: Connection,
}

impl DatabaseFixture {
    pub fn new() -> Result<Self> {
        let connection = open_connection(":memory:", &["foreign_keys = ON".to_string()])?;
        Ok(DatabaseFixture { connection })
    }

    /// Creates `simple_table` and inserts one row per `(text, int)` pair.
    pub fn with_simple_table(entries: &[(&str, i64)]) -> Result<Self> {
        let fixture = Self::new()?;
        fixture.connection.execute_batch(
            "CREATE TABLE simple_table (id INTEGER PRIMARY KEY, textField TEXT, intField INTEGER);",
        )?;
        for (text, int) in entries {
            fixture.connection.execute(
                "INSERT INTO simple_table (textField, intField) VALUES (?1, ?2)",
                rusqlite::params![text, int],
            )?;
        }
        Ok(fixture)
    }
}
