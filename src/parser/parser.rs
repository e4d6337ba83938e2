//! Parser implementation producing the derivation trace.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser is a predictive recursive-descent parser with one procedure
//! per nonterminal. Its only state is the cursor into the token stream; the
//! call stack of active procedures is the current path through the parse
//! tree.
//!
//! It maintains a lookup table of statement handlers keyed by the token
//! that introduces the statement.

use std::collections::HashMap;

use log::{debug, trace};
use thiserror::Error;

use crate::{
    errors::errors::{Diagnostics, ErrorKind},
    lexer::tokens::{Lookahead, Token, TokenKind},
    trace::trace::{NonTerminal, Trace},
};

use super::{
    decl::parse_comp_unit,
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
};

/// Tokens the bounded skip never swallows.
pub const SKIP_BOUNDARIES: [TokenKind; 3] = [
    TokenKind::OpenCurly,
    TokenKind::CloseCurly,
    TokenKind::Semicolon,
];

/// Free stack below which a nested procedure moves to a fresh segment.
const RED_ZONE: usize = 128 * 1024;
/// Size of each fresh stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f` on a new stack segment when the current one is nearly used up.
///
/// Wraps the procedures that recurse with the input's nesting depth, so
/// `((((...))))` or `{{{{...}}}}` of any depth parses instead of
/// overflowing the thread's stack.
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// An expected token was not found. Any diagnostic has already been
/// recorded by the time a caller sees this.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} after line {line}")]
pub struct MissingToken {
    pub expected: TokenKind,
    pub line: usize,
}

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Index of the next unconsumed token
    pos: usize,
    /// Where syntactic errors are reported
    diagnostics: &'a mut Diagnostics,
    /// Consumed tokens and completed nonterminals so far
    trace: Trace,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, diagnostics: &'a mut Diagnostics) -> Self {
        Parser {
            tokens,
            pos: 0,
            diagnostics,
            trace: Trace::new(),
            stmt_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> Lookahead<'_> {
        self.peek(0)
    }

    /// Returns the token `offset` places ahead of the cursor without
    /// advancing. Past the end this is `EndOfInput` carrying the line of the
    /// last real token, or line 1 for an empty stream.
    pub fn peek(&self, offset: usize) -> Lookahead<'_> {
        match self.tokens.get(self.pos + offset) {
            Some(token) => Lookahead::Real(token),
            None => Lookahead::EndOfInput(self.tokens.last().map_or(1, |token| token.line)),
        }
    }

    /// Returns the kind of the current token, `None` at end of input.
    pub fn current_token_kind(&self) -> Option<TokenKind> {
        self.current_token().kind()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_token().is(kind)
    }

    pub fn check_any(&self, kinds: &[TokenKind]) -> bool {
        self.current_token().is_one_of_many(kinds)
    }

    pub fn at_end(&self) -> bool {
        self.current_token().is_end()
    }

    /// Tokens from the cursor onwards, for unbounded lookahead.
    pub fn remaining(&self) -> &[Token] {
        self.tokens.get(self.pos..).unwrap_or(&[])
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consumes the current token, recording it in the trace. Does nothing
    /// at end of input.
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        self.trace.push_token(token.clone());
        Some(token)
    }

    /// Consumes the current token if it is any of `kinds`.
    pub fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if self.check_any(kinds) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects structural punctuation whose absence is not reported.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, MissingToken> {
        self.expect_inner(expected_kind, None)
    }

    /// Expects a token, reporting `error` against the previous token's line
    /// when it is missing.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: ErrorKind,
    ) -> Result<Token, MissingToken> {
        self.expect_inner(expected_kind, Some(error))
    }

    /// Like `expect_error`, then skips forward looking for the expected
    /// token. The skip stops without consuming at any of `SKIP_BOUNDARIES`.
    pub fn expect_or_skip(
        &mut self,
        expected_kind: TokenKind,
        error: ErrorKind,
    ) -> Result<Token, MissingToken> {
        let missing = match self.expect_inner(expected_kind, Some(error)) {
            Ok(token) => return Ok(token),
            Err(missing) => missing,
        };

        while !self.at_end() && !self.check(expected_kind) {
            if self.check_any(&SKIP_BOUNDARIES) {
                break;
            }
            trace!("skipping {} looking for {}", self.current_token_line(), expected_kind);
            self.advance();
        }

        if self.check(expected_kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }

        Err(missing)
    }

    fn expect_inner(
        &mut self,
        expected_kind: TokenKind,
        error: Option<ErrorKind>,
    ) -> Result<Token, MissingToken> {
        if self.check(expected_kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }

        let line = self.error_line();
        if let Some(error) = error {
            self.diagnostics.report(line, error);
        }

        Err(MissingToken {
            expected: expected_kind,
            line,
        })
    }

    /// The line errors are attributed to: that of the last consumed token,
    /// or of the current one when nothing has been consumed yet.
    pub fn error_line(&self) -> usize {
        match self.pos.checked_sub(1).and_then(|index| self.tokens.get(index)) {
            Some(previous) => previous.line,
            None => self.current_token().line(),
        }
    }

    fn current_token_line(&self) -> String {
        match self.current_token() {
            Lookahead::Real(token) => format!("`{}` on line {}", token.value, token.line),
            Lookahead::EndOfInput(line) => format!("end of input on line {}", line),
        }
    }

    /// Records a completed nonterminal.
    pub fn emit(&mut self, nonterminal: NonTerminal) {
        self.trace.push_nonterminal(nonterminal);
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn into_trace(self) -> Trace {
        self.trace
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for the token that introduces it.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a token stream as a compilation unit.
///
/// Never fails: syntactic errors go to `diagnostics` and parsing carries on
/// until the compilation unit is complete. Tokens after the entry point are
/// left unconsumed.
pub fn parse(tokens: Vec<Token>, diagnostics: &mut Diagnostics) -> Trace {
    let mut parser = Parser::new(tokens, diagnostics);
    create_token_lookups(&mut parser);

    parse_comp_unit(&mut parser);

    if !parser.at_end() {
        debug!(
            "{} tokens left after the entry point were not parsed",
            parser.remaining().len()
        );
    }
    debug!("derivation trace has {} lines", parser.trace().len());

    parser.into_trace()
}
