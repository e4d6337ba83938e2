//! Error types and error collection for the front end.
//!
//! This module defines:
//!
//! - The error kinds with their one-character report codes
//! - The `Diagnostics` collector threaded through the lexer and parser
//! - The suppression rule for syntactic errors on lexically broken lines
//! - Driver errors for source reading and output writing

pub mod errors;
