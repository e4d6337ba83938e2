//! Parser module producing the derivation trace.
//!
//! This module contains the recursive-descent parser that consumes the token
//! stream and records a derivation trace instead of building a syntax tree.
//! It handles:
//!
//! - Declarations, function definitions and the entry point (`decl`)
//! - Statements, blocks and block-level recovery (`stmt`)
//! - The layered expression grammar (`expr`)
//! - Assignment vs. expression statement disambiguation by forward scan
//! - Error reporting through expectations, plus a bounded skip after `if`
//!   and `for` headers
//!
//! Expression layers are described by `BindingPower`, loosest to tightest.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
