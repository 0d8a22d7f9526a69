use clap::Parser;
use sqlshell::{
    config::{self, Config},
    core::{db, Result},
    repl,
    session::Session,
};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// sqlshell - SQL shell for SQLite databases
#[derive(Parser, Debug)]
#[command(name = "sqlshell")]
#[command(version)]
#[command(about = "Interactive and batch SQL shell for SQLite", long_about = None)]
struct Cli {
    /// Database file, or :memory: for a private in-memory database
    #[arg(default_value = db::MEMORY_PATH)]
    database: String,

    /// Execute SQL statements and exit
    #[arg(short = 'c', long = "command", conflicts_with = "file")]
    command: Option<String>,

    /// Execute SQL statements from a file and exit
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/sqlshell/config.toml)
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Print the tables produced before a failing statement
    #[arg(long = "keep-partial-output")]
    keep_partial_output: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "sqlshell failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::load_default()?,
    };

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()?
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    info!("Starting sqlshell...");

    let connection = db::open_connection(&cli.database, &config.sqlite.pragmas)?;
    let mut options = config.session_options();
    options.keep_partial_output |= cli.keep_partial_output;
    let mut session = Session::new(db::SqliteExecutor::new(&connection), options);

    let batch_input = match (&cli.command, &cli.file) {
        (Some(command), _) => Some(command.clone()),
        (None, Some(path)) => Some(std::fs::read_to_string(path)?),
        (None, None) if !io::stdin().is_terminal() => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Some(input)
        }
        (None, None) => None,
    };

    match batch_input {
        Some(input) => {
            let report = session.run(&input);
            Ok(repl::print_report(&report, &mut io::stdout(), &mut io::stderr())?)
        }
        None => {
            repl::run_repl(&mut session)?;
            Ok(true)
        }
    }
}
