//! Derivation trace produced by the parser.
//!
//! The trace stands in for a syntax tree: every consumed token and every
//! completed nonterminal is appended in order, so external tooling can
//! rebuild the parse tree from the text alone.

pub mod trace;
