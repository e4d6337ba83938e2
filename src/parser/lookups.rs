use std::collections::HashMap;

use crate::{lexer::tokens::TokenKind, trace::trace::NonTerminal};

use super::{parser::Parser, stmt::*};

/// Binary operator layers, loosest first. Each layer's operands are parsed
/// at the next tighter layer; the tightest layer's operands are unary
/// expressions.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
}

impl BindingPower {
    pub fn operators(&self) -> &'static [TokenKind] {
        match self {
            BindingPower::LogicalOr => &[TokenKind::Or],
            BindingPower::LogicalAnd => &[TokenKind::And],
            BindingPower::Equality => &[TokenKind::Equals, TokenKind::NotEquals],
            BindingPower::Relational => &[
                TokenKind::Less,
                TokenKind::LessEquals,
                TokenKind::Greater,
                TokenKind::GreaterEquals,
            ],
            BindingPower::Additive => &[TokenKind::Plus, TokenKind::Dash],
            BindingPower::Multiplicative => &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
        }
    }

    pub fn nonterminal(&self) -> NonTerminal {
        match self {
            BindingPower::LogicalOr => NonTerminal::LOrExp,
            BindingPower::LogicalAnd => NonTerminal::LAndExp,
            BindingPower::Equality => NonTerminal::EqExp,
            BindingPower::Relational => NonTerminal::RelExp,
            BindingPower::Additive => NonTerminal::AddExp,
            BindingPower::Multiplicative => NonTerminal::MulExp,
        }
    }

    pub fn tighter(&self) -> Option<BindingPower> {
        match self {
            BindingPower::LogicalOr => Some(BindingPower::LogicalAnd),
            BindingPower::LogicalAnd => Some(BindingPower::Equality),
            BindingPower::Equality => Some(BindingPower::Relational),
            BindingPower::Relational => Some(BindingPower::Additive),
            BindingPower::Additive => Some(BindingPower::Multiplicative),
            BindingPower::Multiplicative => None,
        }
    }
}

pub const UNARY_OPERATORS: [TokenKind; 3] = [TokenKind::Plus, TokenKind::Dash, TokenKind::Not];

/// Tokens that open a declaration inside a block.
pub const DECL_STARTERS: [TokenKind; 3] = [TokenKind::Const, TokenKind::Int, TokenKind::Static];

pub type StmtHandler = fn(&mut Parser);

pub fn create_token_lookups(parser: &mut Parser) {
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Break, parse_jump_stmt);
    parser.stmt(TokenKind::Continue, parse_jump_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Printf, parse_printf_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::Semicolon, parse_empty_stmt);
}

// Kept on the parser itself; handlers only ever see `&mut Parser`
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
