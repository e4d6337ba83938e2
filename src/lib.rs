#![allow(clippy::module_inception)]

use std::path::Path;

use log::debug;

use crate::{
    errors::errors::{Diagnostics, ErrorRecord, ErrorTip},
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
    trace::trace::Trace,
};

pub mod config;
pub mod driver;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod trace;

extern crate regex;

/// Everything one pass of the front end produced for a source text.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub trace: Trace,
    pub diagnostics: Diagnostics,
}

/// The single artifact a compilation is reported as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// No errors: the rendered derivation trace
    Trace(String),
    /// At least one error: the rendered error report, trace withheld
    Errors(String),
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Errors ordered by line.
    pub fn errors(&self) -> Vec<ErrorRecord> {
        self.diagnostics.sorted()
    }

    pub fn report(&self) -> Report {
        if self.has_errors() {
            Report::Errors(self.diagnostics.render())
        } else {
            Report::Trace(self.trace.render())
        }
    }
}

/// Scans and parses `source` with a fresh diagnostics collector.
pub fn compile(source: &str) -> Compilation {
    let mut diagnostics = Diagnostics::new();

    let tokens = tokenize(source, &mut diagnostics);
    let trace = parse(tokens.clone(), &mut diagnostics);

    debug!(
        "compiled {} tokens into {} trace lines with {} errors",
        tokens.len(),
        trace.len(),
        diagnostics.len()
    );

    Compilation {
        tokens,
        trace,
        diagnostics,
    }
}

/// Returns the text of 1-based `line` in `source`, without its line break.
pub fn get_source_line(source: &str, line: usize) -> Option<&str> {
    source
        .split('\n')
        .nth(line.checked_sub(1)?)
        .map(|text| text.trim_end_matches('\r'))
}

/// Renders an error with the source line it points at:
///
/// ```text
/// Error: MissingSemicolon (expected `;` at the end of this line)
/// -> testfile.txt
///   |
/// 2 | int a = 1
///   |
/// ```
pub fn format_error(record: &ErrorRecord, source: &str, file: &Path) -> String {
    let line_string = record.line.to_string();
    let padding = line_string.len() + 2;

    let mut output = match record.kind.get_tip() {
        ErrorTip::None => format!("Error: {}\n", record.kind.get_error_name()),
        tip => format!("Error: {} ({})\n", record.kind.get_error_name(), tip),
    };
    output.push_str(&format!("-> {}\n", file.to_string_lossy()));
    output.push_str(&format!("{:>padding$}\n", "|"));

    if let Some(line_text) = get_source_line(source, record.line) {
        output.push_str(&format!("{} | {}\n", line_string, line_text.trim()));
        output.push_str(&format!("{:>padding$}\n", "|"));
    }

    output
}

pub fn display_error(record: &ErrorRecord, source: &str, file: &Path) {
    eprint!("{}", format_error(record, source, file));
}
