//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Recognition of reserved words, identifiers, integer and string literals
//! - One- and two-character operators resolved by one character of lookahead
//! - Line tracking for every token, including across comments and strings
//! - Comments and whitespace handling
//! - Reporting illegal symbols without stopping the scan

pub mod lexer;
pub mod tokens;
