use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("const", TokenKind::Const);
        map.insert("int", TokenKind::Int);
        map.insert("static", TokenKind::Static);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map.insert("void", TokenKind::Void);
        map.insert("main", TokenKind::Main);
        map.insert("printf", TokenKind::Printf);
        map
    };

    /// Characters that always form a token on their own.
    pub static ref SINGLE_CHAR_LOOKUP: HashMap<char, TokenKind> = {
        let mut map = HashMap::new();
        map.insert('+', TokenKind::Plus);
        map.insert('-', TokenKind::Dash);
        map.insert('*', TokenKind::Star);
        map.insert('%', TokenKind::Percent);
        map.insert(';', TokenKind::Semicolon);
        map.insert(',', TokenKind::Comma);
        map.insert('(', TokenKind::OpenParen);
        map.insert(')', TokenKind::CloseParen);
        map.insert('[', TokenKind::OpenBracket);
        map.insert(']', TokenKind::CloseBracket);
        map.insert('{', TokenKind::OpenCurly);
        map.insert('}', TokenKind::CloseCurly);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Number,
    String,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Const,
    Int,
    Static,
    Break,
    Continue,
    If,
    Else,
    For,
    Return,
    Void,
    Main,
    Printf,
}

impl TokenKind {
    /// The fixed name graders match on in the derivation trace.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENFR",
            TokenKind::Number => "INTCON",
            TokenKind::String => "STRCON",
            TokenKind::OpenBracket => "LBRACK",
            TokenKind::CloseBracket => "RBRACK",
            TokenKind::OpenCurly => "LBRACE",
            TokenKind::CloseCurly => "RBRACE",
            TokenKind::OpenParen => "LPARENT",
            TokenKind::CloseParen => "RPARENT",
            TokenKind::Assignment => "ASSIGN",
            TokenKind::Equals => "EQL",
            TokenKind::Not => "NOT",
            TokenKind::NotEquals => "NEQ",
            TokenKind::Less => "LSS",
            TokenKind::LessEquals => "LEQ",
            TokenKind::Greater => "GRE",
            TokenKind::GreaterEquals => "GEQ",
            TokenKind::Or => "OR",
            TokenKind::And => "AND",
            TokenKind::Semicolon => "SEMICN",
            TokenKind::Comma => "COMMA",
            TokenKind::Plus => "PLUS",
            TokenKind::Dash => "MINU",
            TokenKind::Slash => "DIV",
            TokenKind::Star => "MULT",
            TokenKind::Percent => "MOD",
            TokenKind::Const => "CONSTTK",
            TokenKind::Int => "INTTK",
            TokenKind::Static => "STATICTK",
            TokenKind::Break => "BREAKTK",
            TokenKind::Continue => "CONTINUETK",
            TokenKind::If => "IFTK",
            TokenKind::Else => "ELSETK",
            TokenKind::For => "FORTK",
            TokenKind::Return => "RETURNTK",
            TokenKind::Void => "VOIDTK",
            TokenKind::Main => "MAINTK",
            TokenKind::Printf => "PRINTFTK",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scanned lexeme. `line` is the 1-based line of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

/// What the parser sees at a cursor offset: a real token, or the end of the
/// token stream carrying the line of the last real token (1 when empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookahead<'a> {
    Real(&'a Token),
    EndOfInput(usize),
}

impl<'a> Lookahead<'a> {
    pub fn is(&self, kind: TokenKind) -> bool {
        matches!(self, Lookahead::Real(token) if token.kind == kind)
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        match self {
            Lookahead::Real(token) => token.is_one_of_many(kinds),
            Lookahead::EndOfInput(_) => false,
        }
    }

    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Lookahead::Real(token) => Some(token.kind),
            Lookahead::EndOfInput(_) => None,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Lookahead::Real(token) => token.line,
            Lookahead::EndOfInput(line) => *line,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Lookahead::EndOfInput(_))
    }
}
