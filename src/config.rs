//! Command-line arguments and the run configuration built from them.

use std::path::PathBuf;

use clap::{value_parser, ArgAction};
use log::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(
    author,
    version,
    about = "Scans and parses a source file, writing its derivation trace or error report"
)]
pub struct Args {
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,

    /// Source file to compile
    #[clap(default_value = "testfile.txt", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,
    /// Where the derivation trace is written when there are no errors
    #[clap(default_value = "parser.txt")]
    pub parser_output: PathBuf,
    /// Where the error report is written when there are errors
    #[clap(default_value = "error.txt")]
    pub error_output: PathBuf,
    /// Parse without writing the derivation trace
    #[clap(long)]
    pub no_trace: bool,
    /// Also print each error with its source line to stderr
    #[clap(long)]
    pub explain: bool,
}

impl Args {
    /// Gets the logging level when `-v[v]` or `-q[q]` has been used. `None`
    /// leaves the level to `RUST_LOG`.
    pub fn log_level_filter(&self) -> Option<LevelFilter> {
        let sum = self.verbose as i8 - self.quiet as i8;
        match sum {
            -2 => Some(LevelFilter::Off),
            -1 => Some(LevelFilter::Error),
            0 => None,
            1 => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }
}

/// Everything one driver run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub parser_output: PathBuf,
    pub error_output: PathBuf,
    pub emit_trace: bool,
    pub explain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: PathBuf::from("testfile.txt"),
            parser_output: PathBuf::from("parser.txt"),
            error_output: PathBuf::from("error.txt"),
            emit_trace: true,
            explain: false,
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            input: args.input.clone(),
            parser_output: args.parser_output.clone(),
            error_output: args.error_output.clone(),
            emit_trace: !args.no_trace,
            explain: args.explain,
        }
    }
}
