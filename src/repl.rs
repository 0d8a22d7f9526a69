use crate::core::{Result, ShellError};
use crate::session::{Executor, RunReport, Session};
use crate::statements::has_open_literal;
use reedline::{DefaultPrompt, Reedline, Signal, ValidationResult, Validator};
use std::io::{self, Write};
use tracing::{debug, info};

const TABLES_QUERY: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

/// Represents a parsed REPL command.
#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Tables,
    Sql(String),
    Unknown(String),
}

/// What the loop does after a command.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Parses a user input string into a corresponding `Command`.
///
/// Input starting with a dot (`.`) is a shell command; anything else is
/// SQL handed to the session.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let Some(name) = input.strip_prefix('.') else {
        return Command::Sql(input.to_string());
    };
    match name.split_whitespace().next() {
        Some("quit") | Some("exit") => Command::Quit,
        Some("help") => Command::Help,
        Some("tables") => Command::Tables,
        _ => Command::Unknown(input.to_string()),
    }
}

/// Keeps the editor reading while a string literal is still open.
struct LiteralValidator;

impl Validator for LiteralValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        if has_open_literal(line) {
            ValidationResult::Incomplete
        } else {
            ValidationResult::Complete
        }
    }
}

/// Writes a run's output to `out` and its error to `err`.
///
/// Returns whether the run succeeded.
pub fn print_report(report: &RunReport, out: &mut impl Write, err: &mut impl Write) -> io::Result<bool> {
    if !report.output.is_empty() {
        writeln!(out, "{}", report.output)?;
    }
    match &report.error {
        None => Ok(true),
        Some(error) => {
            writeln!(err, "Error: {}", error)?;
            if report.skipped > 0 {
                writeln!(
                    err,
                    "{} statement(s) after the failing one were not executed",
                    report.skipped
                )?;
            }
            Ok(false)
        }
    }
}

/// Executes one parsed command against the session.
pub fn dispatch<E: Executor>(
    session: &mut Session<E>,
    command: Command,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<Flow> {
    match command {
        Command::Quit => return Ok(Flow::Exit),
        Command::Help => {
            writeln!(out, "Available commands:")?;
            writeln!(out, "  .help   - List all available commands")?;
            writeln!(out, "  .tables - List the tables of the database")?;
            writeln!(out, "  .quit   - Leave the shell (also .exit)")?;
            writeln!(out, "\nOr enter SQL statements separated by ';'.")?;
        }
        Command::Tables => {
            print_report(&session.run(TABLES_QUERY), out, err)?;
        }
        Command::Sql(sql) => {
            if !sql.is_empty() {
                print_report(&session.run(&sql), out, err)?;
            }
        }
        Command::Unknown(input) => {
            let error = ShellError::Command(format!("unknown command '{}' (try .help)", input));
            writeln!(err, "Error: {}", error)?;
        }
    }
    Ok(Flow::Continue)
}

/// Runs the interactive shell until `.quit`, Ctrl-C or Ctrl-D.
pub fn run_repl<E: Executor>(session: &mut Session<E>) -> Result<()> {
    println!("Welcome to sqlshell! Type .help for help, .quit to exit.");

    let mut line_editor = Reedline::create().with_validator(Box::new(LiteralValidator));
    let prompt = DefaultPrompt::default();

    loop {
        let line = match line_editor.read_line(&prompt)? {
            Signal::Success(line) => line,
            Signal::CtrlC | Signal::CtrlD => break,
            #[allow(unreachable_patterns)]
            _ => continue,
        };
        debug!(line = line.as_str(), "read line");

        let stdout = io::stdout();
        let stderr = io::stderr();
        let flow = dispatch(session, parse_command(&line), &mut stdout.lock(), &mut stderr.lock())?;
        if flow == Flow::Exit {
            break;
        }
    }

    info!("leaving interactive shell");
    Ok(())
}
