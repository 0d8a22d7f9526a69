//! Statement splitting for multi-statement input.
//!
//! Input is cut on `;` terminators that sit outside single-quoted
//! literals. The scan is a single forward pass over two states; a doubled
//! `''` inside a literal toggles the state twice and so never closes it.
//! The splitter never rejects input: an unterminated literal simply runs
//! to the end of the text and the database decides what to make of it.

const TERMINATOR: char = ';';
const QUOTE: char = '\'';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InString,
}

impl ScanState {
    fn toggled(self) -> Self {
        match self {
            ScanState::Normal => ScanState::InString,
            ScanState::InString => ScanState::Normal,
        }
    }
}

/// Splits raw input into trimmed, non-empty statements in input order.
///
/// The returned slices borrow from `input` and keep its internal
/// whitespace and casing. Runs of terminators and a trailing terminator
/// never produce empty statements.
///
/// ```
/// use sqlshell::statements::split_statements;
///
/// let statements = split_statements("INSERT INTO t VALUES ('a;b');;; SELECT 1;");
/// assert_eq!(statements, vec!["INSERT INTO t VALUES ('a;b')", "SELECT 1"]);
/// ```
pub fn split_statements(input: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut state = ScanState::Normal;
    let mut start = 0;

    for (idx, ch) in input.char_indices() {
        match ch {
            QUOTE => state = state.toggled(),
            TERMINATOR if state == ScanState::Normal => {
                push_trimmed(&mut statements, &input[start..idx]);
                start = idx + ch.len_utf8();
            }
            _ => {}
        }
    }
    push_trimmed(&mut statements, &input[start..]);

    statements
}

fn push_trimmed<'a>(statements: &mut Vec<&'a str>, segment: &'a str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed);
    }
}

/// Returns true when `input` ends inside a single-quoted literal.
///
/// The line editor uses this to keep reading continuation lines.
pub fn has_open_literal(input: &str) -> bool {
    input
        .chars()
        .filter(|&ch| ch == QUOTE)
        .fold(ScanState::Normal, |state, _| state.toggled())
        == ScanState::InString
}

/// Returns true when a statement holds nothing but SQL comments.
///
/// Recognises `--` line comments and `/* */` block comments. An
/// unterminated block comment swallows the rest of the statement.
pub fn is_comment_only(statement: &str) -> bool {
    let mut rest = statement.trim_start();
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("--") {
            rest = match after.find('\n') {
                Some(end) => &after[end + 1..],
                None => "",
            };
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = match after.find("*/") {
                Some(end) => &after[end + 2..],
                None => "",
            };
        } else {
            return false;
        }
        rest = rest.trim_start();
    }
    true
}
