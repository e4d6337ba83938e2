use std::{
    collections::HashSet,
    fmt::Display,
    path::PathBuf,
};

use log::trace;
use thiserror::Error;

/// Which pass a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Lexical,
    Syntactic,
    /// Reserved for a semantic analyser; nothing in this crate produces them.
    Semantic,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[error("illegal symbol")]
    IllegalSymbol,
    #[error("missing semicolon")]
    MissingSemicolon,
    #[error("missing closing parenthesis")]
    MissingRightParen,
    #[error("missing closing bracket")]
    MissingRightBracket,
    #[error("name redefined")]
    NameRedefined,
    #[error("name undefined")]
    NameUndefined,
    #[error("parameter count mismatch")]
    ParamCountMismatch,
    #[error("parameter type mismatch")]
    ParamTypeMismatch,
    #[error("void function returns a value")]
    VoidFunctionReturnsValue,
    #[error("missing return in non-void function")]
    MissingReturn,
    #[error("assignment to a constant")]
    ConstantAssignment,
    #[error("printf argument count mismatch")]
    PrintfArgCountMismatch,
    #[error("break or continue outside of a loop")]
    BreakContinueOutsideLoop,
}

impl ErrorKind {
    /// The single-character code used in the error report.
    pub fn code(&self) -> char {
        match self {
            ErrorKind::IllegalSymbol => 'a',
            ErrorKind::NameRedefined => 'b',
            ErrorKind::NameUndefined => 'c',
            ErrorKind::ParamCountMismatch => 'd',
            ErrorKind::ParamTypeMismatch => 'e',
            ErrorKind::VoidFunctionReturnsValue => 'f',
            ErrorKind::MissingReturn => 'g',
            ErrorKind::ConstantAssignment => 'h',
            ErrorKind::MissingSemicolon => 'i',
            ErrorKind::MissingRightParen => 'j',
            ErrorKind::MissingRightBracket => 'k',
            ErrorKind::PrintfArgCountMismatch => 'l',
            ErrorKind::BreakContinueOutsideLoop => 'm',
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::IllegalSymbol => ErrorCategory::Lexical,
            ErrorKind::MissingSemicolon
            | ErrorKind::MissingRightParen
            | ErrorKind::MissingRightBracket => ErrorCategory::Syntactic,
            _ => ErrorCategory::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match self {
            ErrorKind::IllegalSymbol => "IllegalSymbol",
            ErrorKind::MissingSemicolon => "MissingSemicolon",
            ErrorKind::MissingRightParen => "MissingRightParen",
            ErrorKind::MissingRightBracket => "MissingRightBracket",
            ErrorKind::NameRedefined => "NameRedefined",
            ErrorKind::NameUndefined => "NameUndefined",
            ErrorKind::ParamCountMismatch => "ParamCountMismatch",
            ErrorKind::ParamTypeMismatch => "ParamTypeMismatch",
            ErrorKind::VoidFunctionReturnsValue => "VoidFunctionReturnsValue",
            ErrorKind::MissingReturn => "MissingReturn",
            ErrorKind::ConstantAssignment => "ConstantAssignment",
            ErrorKind::PrintfArgCountMismatch => "PrintfArgCountMismatch",
            ErrorKind::BreakContinueOutsideLoop => "BreakContinueOutsideLoop",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match self {
            ErrorKind::IllegalSymbol => ErrorTip::Suggestion(String::from(
                "only `&&` and `||` are valid; lone `&`, `|` and unknown characters are rejected",
            )),
            ErrorKind::MissingSemicolon => {
                ErrorTip::Suggestion(String::from("expected `;` at the end of this line"))
            }
            ErrorKind::MissingRightParen => {
                ErrorTip::Suggestion(String::from("expected `)` to close the parenthesis"))
            }
            ErrorKind::MissingRightBracket => {
                ErrorTip::Suggestion(String::from("expected `]` to close the subscript"))
            }
            _ => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// One reported problem, rendered as `<line> <code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorRecord {
    pub line: usize,
    pub kind: ErrorKind,
}

impl ErrorRecord {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        ErrorRecord { line, kind }
    }
}

impl Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.line, self.kind.code())
    }
}

/// Collector for every diagnostic of one compilation run.
///
/// Owned by the caller and lent to the lexer and then the parser. A
/// syntactic record aimed at a line that already carries a lexical record is
/// dropped on arrival.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    records: Vec<ErrorRecord>,
    lexical_lines: HashSet<usize>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Records `kind` on `line`. Returns whether the record was kept.
    pub fn report(&mut self, line: usize, kind: ErrorKind) -> bool {
        match kind.category() {
            ErrorCategory::Lexical => {
                self.lexical_lines.insert(line);
            }
            ErrorCategory::Syntactic if self.has_lexical_error_on_line(line) => {
                trace!("suppressing {} on line {}: line has a lexical error", kind, line);
                return false;
            }
            _ => {}
        }

        self.records.push(ErrorRecord::new(line, kind));
        true
    }

    pub fn has_lexical_error_on_line(&self, line: usize) -> bool {
        self.lexical_lines.contains(&line)
    }

    pub fn has_errors(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in the order they were reported.
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// Records ordered by line; records sharing a line keep report order.
    pub fn sorted(&self) -> Vec<ErrorRecord> {
        let mut records = self.records.clone();
        records.sort_by_key(|record| record.line);
        records
    }

    /// The error report: one `<line> <code>` line per record, ascending.
    pub fn render(&self) -> String {
        self.sorted()
            .iter()
            .map(|record| format!("{}\n", record))
            .collect()
    }
}

/// Failures of the file-level driver. Problems in the compiled program are
/// never surfaced through this type.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("failed to read source file {path:?}: {source}")]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path:?}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}
