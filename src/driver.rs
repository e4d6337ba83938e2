//! File-level pipeline: read the source, compile it, write one artifact.

use std::{
    fs,
    path::{Path, PathBuf},
};

use encoding_rs::GBK;
use log::{debug, info, warn};

use crate::{compile, config::Config, display_error, errors::errors::DriverError, Report};

/// Which file a run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Trace(PathBuf),
    Errors(PathBuf),
    /// Clean compilation with trace output disabled
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub tokens: usize,
    pub errors: usize,
    pub artifact: Artifact,
}

pub fn run(config: &Config) -> Result<RunSummary, DriverError> {
    let bytes = fs::read(&config.input).map_err(|source| DriverError::ReadSource {
        path: config.input.clone(),
        source,
    })?;
    let source = decode_source(bytes, &config.input);

    let compilation = compile(&source);

    if config.explain {
        for record in compilation.errors() {
            display_error(&record, &source, &config.input);
        }
    }

    let artifact = match compilation.report() {
        Report::Errors(report) => {
            write_output(&config.error_output, &report)?;
            Artifact::Errors(config.error_output.clone())
        }
        Report::Trace(trace) if config.emit_trace => {
            write_output(&config.parser_output, &trace)?;
            Artifact::Trace(config.parser_output.clone())
        }
        Report::Trace(_) => Artifact::Nothing,
    };

    let summary = RunSummary {
        tokens: compilation.tokens.len(),
        errors: compilation.diagnostics.len(),
        artifact,
    };
    info!(
        "{}: {} tokens, {} errors",
        config.input.display(),
        summary.tokens,
        summary.errors
    );

    Ok(summary)
}

/// Decodes the source as UTF-8, falling back to GBK. Bytes that are valid
/// in neither become U+FFFD and scan as illegal symbols.
pub fn decode_source(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(err) => {
            warn!(
                "{} is not valid UTF-8 ({}); decoding as GBK",
                path.display(),
                err.utf8_error()
            );
            let (source, had_errors) = GBK.decode_without_bom_handling(err.as_bytes());
            if had_errors {
                warn!("{} is not valid GBK either; invalid bytes replaced", path.display());
            }
            source.into_owned()
        }
    }
}

fn write_output(path: &Path, contents: &str) -> Result<(), DriverError> {
    debug!("writing {} bytes to {}", contents.len(), path.display());
    fs::write(path, contents).map_err(|source| DriverError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}
