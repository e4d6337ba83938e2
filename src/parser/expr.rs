use crate::{
    errors::errors::ErrorKind,
    lexer::tokens::TokenKind,
    trace::trace::NonTerminal,
};

use super::{
    lookups::{BindingPower, UNARY_OPERATORS},
    parser::{ensure_sufficient_stack, Parser},
};

/// Exp -> AddExp
pub fn parse_exp(parser: &mut Parser) {
    parse_binary_expr(parser, BindingPower::Additive);
    parser.emit(NonTerminal::Exp);
}

/// Cond -> LOrExp
pub fn parse_cond(parser: &mut Parser) {
    parse_binary_expr(parser, BindingPower::LogicalOr);
    parser.emit(NonTerminal::Cond);
}

/// ConstExp -> AddExp
pub fn parse_const_exp(parser: &mut Parser) {
    parse_binary_expr(parser, BindingPower::Additive);
    parser.emit(NonTerminal::ConstExp);
}

/// One left-associative layer: `Layer -> Operand { op Operand }`.
///
/// The layer's nonterminal is emitted after the first operand and again
/// after every further operand, so `a + b` traces as
/// `... <AddExp> PLUS + ... <AddExp>`.
pub fn parse_binary_expr(parser: &mut Parser, bp: BindingPower) {
    parse_operand(parser, bp);
    parser.emit(bp.nonterminal());

    while parser.matches(bp.operators()) {
        parse_operand(parser, bp);
        parser.emit(bp.nonterminal());
    }
}

fn parse_operand(parser: &mut Parser, bp: BindingPower) {
    match bp.tighter() {
        Some(tighter) => parse_binary_expr(parser, tighter),
        None => parse_unary_expr(parser),
    }
}

/// UnaryExp -> PrimaryExp | Ident '(' [FuncRParams] ')' | UnaryOp UnaryExp
pub fn parse_unary_expr(parser: &mut Parser) {
    ensure_sufficient_stack(|| {
        if parser.check_any(&UNARY_OPERATORS) {
            parse_unary_op(parser);
            parse_unary_expr(parser);
        } else if parser.check(TokenKind::Identifier) && parser.peek(1).is(TokenKind::OpenParen) {
            parse_call_expr(parser);
        } else {
            parse_primary_expr(parser);
        }
        parser.emit(NonTerminal::UnaryExp);
    })
}

/// Ident '(' [FuncRParams] ')'
fn parse_call_expr(parser: &mut Parser) {
    parser.advance();
    parser.advance();
    if !parser.check(TokenKind::CloseParen) {
        parse_func_rparams(parser);
    }
    let _ = parser.expect_error(TokenKind::CloseParen, ErrorKind::MissingRightParen);
}

/// UnaryOp -> '+' | '-' | '!'
pub fn parse_unary_op(parser: &mut Parser) {
    parser.matches(&UNARY_OPERATORS);
    parser.emit(NonTerminal::UnaryOp);
}

/// FuncRParams -> Exp { ',' Exp }
pub fn parse_func_rparams(parser: &mut Parser) {
    parse_exp(parser);
    while parser.matches(&[TokenKind::Comma]) {
        parse_exp(parser);
    }
    parser.emit(NonTerminal::FuncRParams);
}

/// PrimaryExp -> '(' Exp ')' | LVal | Number
pub fn parse_primary_expr(parser: &mut Parser) {
    if parser.matches(&[TokenKind::OpenParen]) {
        parse_exp(parser);
        let _ = parser.expect_error(TokenKind::CloseParen, ErrorKind::MissingRightParen);
    } else if parser.check(TokenKind::Number) {
        parse_number(parser);
    } else {
        parse_lval(parser);
    }
    parser.emit(NonTerminal::PrimaryExp);
}

/// Number -> IntConst
pub fn parse_number(parser: &mut Parser) {
    let _ = parser.expect(TokenKind::Number);
    parser.emit(NonTerminal::Number);
}

/// LVal -> Ident [ '[' Exp ']' ]
pub fn parse_lval(parser: &mut Parser) {
    let _ = parser.expect(TokenKind::Identifier);
    if parser.matches(&[TokenKind::OpenBracket]) {
        parse_exp(parser);
        let _ = parser.expect_error(TokenKind::CloseBracket, ErrorKind::MissingRightBracket);
    }
    parser.emit(NonTerminal::LVal);
}
