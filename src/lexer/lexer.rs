use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::{
    errors::errors::{Diagnostics, ErrorKind},
    MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP, SINGLE_CHAR_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// Multi-character lexemes recognised by longest match at the cursor.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
    ];
}

/// Single forward pass over the source. Illegal characters are reported to
/// the borrowed `Diagnostics` and never produce a token.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    /// Byte offset of the next unread character
    pos: usize,
    /// 1-based line of the next unread character
    line: usize,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, diagnostics: &'a mut Diagnostics) -> Lexer<'a> {
        Lexer {
            source,
            tokens: vec![],
            pos: 0,
            line: 1,
            diagnostics,
        }
    }

    pub fn scan(mut self) -> Vec<Token> {
        while !self.at_eof() {
            self.scan_token();
        }

        debug!(
            "scanned {} tokens over {} lines",
            self.tokens.len(),
            self.line
        );
        self.tokens
    }

    fn scan_token(&mut self) {
        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(self.remainder()) {
                (pattern.handler)(self, &pattern.regex);
                return;
            }
        }

        let Some(c) = self.advance() else {
            return;
        };

        if let Some(kind) = SINGLE_CHAR_LOOKUP.get(&c) {
            self.push(*kind, c.to_string());
            return;
        }

        match c {
            '!' => self.push_one_or_two(c, '=', TokenKind::Not, TokenKind::NotEquals),
            '=' => self.push_one_or_two(c, '=', TokenKind::Assignment, TokenKind::Equals),
            '<' => self.push_one_or_two(c, '=', TokenKind::Less, TokenKind::LessEquals),
            '>' => self.push_one_or_two(c, '=', TokenKind::Greater, TokenKind::GreaterEquals),
            '&' => self.push_doubled_or_illegal(c, TokenKind::And),
            '|' => self.push_doubled_or_illegal(c, TokenKind::Or),
            '/' => {
                if self.matches('/') {
                    while self.at().is_some_and(|next| next != '\n') {
                        self.advance();
                    }
                } else if self.matches('*') {
                    self.skip_block_comment();
                } else {
                    self.push(TokenKind::Slash, c.to_string());
                }
            }
            '"' => self.scan_string(),
            ' ' | '\t' | '\r' => {}
            '\n' => self.line += 1,
            _ => self.illegal(c),
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.at()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.at() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn push(&mut self, kind: TokenKind, value: String) {
        self.tokens.push(MK_TOKEN!(kind, value, self.line));
    }

    fn push_one_or_two(&mut self, first: char, second: char, single: TokenKind, double: TokenKind) {
        if self.matches(second) {
            self.push(double, format!("{}{}", first, second));
        } else {
            self.push(single, first.to_string());
        }
    }

    fn push_doubled_or_illegal(&mut self, c: char, double: TokenKind) {
        if self.matches(c) {
            self.push(double, format!("{}{}", c, c));
        } else {
            self.illegal(c);
        }
    }

    fn illegal(&mut self, c: char) {
        trace!("illegal symbol {:?} on line {}", c, self.line);
        self.diagnostics.report(self.line, ErrorKind::IllegalSymbol);
    }

    /// Consumes through the closing `*/`, or silently to the end of input.
    fn skip_block_comment(&mut self) {
        while !self.at_eof() && !self.remainder().starts_with("*/") {
            if self.advance() == Some('\n') {
                self.line += 1;
            }
        }

        if self.at_eof() {
            trace!("block comment runs to end of input");
        } else {
            self.advance_n(2);
        }
    }

    /// The opening quote is already consumed. The token text keeps both
    /// quotes and escapes are left as written; an unterminated literal is
    /// dropped without a diagnostic.
    fn scan_string(&mut self) {
        let start = self.pos - 1;
        let start_line = self.line;

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\n') => self.line += 1,
                Some(_) => {}
                None => {
                    trace!("unterminated string literal from line {}", start_line);
                    return;
                }
            }
        }

        let value = self.source[start..self.pos].to_string();
        self.tokens.push(MK_TOKEN!(TokenKind::String, value, start_line));
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(matched) = regex.find(lexer.remainder()) else {
        return;
    };
    let value = matched.as_str().to_string();

    lexer.advance_n(value.len());
    lexer.push(TokenKind::Number, value);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(matched) = regex.find(lexer.remainder()) else {
        return;
    };
    let value = matched.as_str().to_string();
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.advance_n(value.len());
    lexer.push(kind, value);
}

/// Scans `source` into tokens, reporting illegal symbols into `diagnostics`.
pub fn tokenize(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    Lexer::new(source, diagnostics).scan()
}
