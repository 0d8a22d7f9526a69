use crate::core::db::default_pragmas;
use crate::core::{Result, ShellError};
use crate::results_grid::TABLE_SEPARATOR;
use crate::session::SessionOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure parsed from a TOML file.
///
/// Every section is optional; missing keys fall back to the defaults the
/// shell uses without a configuration file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub statements: StatementsConfig,
    pub sqlite: SqliteConfig,
    pub log: LogConfig,
}

/// How results are laid out.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub table_separator: String,
    pub keep_partial_output: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            table_separator: TABLE_SEPARATOR.to_string(),
            keep_partial_output: false,
        }
    }
}

/// Statement filtering.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatementsConfig {
    pub skip_comment_only: bool,
}

impl Default for StatementsConfig {
    fn default() -> Self {
        StatementsConfig {
            skip_comment_only: true,
        }
    }
}

/// SQLite-related configuration.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SqliteConfig {
    /// Pragma bodies applied at connection time, e.g. `"foreign_keys = ON"`
    pub pragmas: Vec<String>,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        SqliteConfig {
            pragmas: default_pragmas(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from the default location if the file
    /// exists, otherwise returns the defaults.
    pub fn load_default() -> Result<Config> {
        match default_config_path() {
            Some(path) if path.exists() => load_config(path),
            _ => Ok(Config::default()),
        }
    }

    /// Session options derived from the `[output]` and `[statements]` sections.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            keep_partial_output: self.output.keep_partial_output,
            skip_comment_only: self.statements.skip_comment_only,
            table_separator: self.output.table_separator.clone(),
        }
    }

    /// The configured log level.
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log
            .level
            .parse()
            .map_err(|_| ShellError::Config(format!("Unknown log level: '{}'", self.log.level)))
    }
}

/// `<config dir>/sqlshell/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sqlshell").join("config.toml"))
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// let config = sqlshell::config::load_config("config.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| ShellError::Config(e.to_string()))
}
