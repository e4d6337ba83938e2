use log::trace;

use crate::{
    errors::errors::ErrorKind,
    lexer::tokens::TokenKind,
    trace::trace::NonTerminal,
};

use super::{
    decl::parse_decl,
    expr::{parse_cond, parse_exp, parse_lval},
    lookups::DECL_STARTERS,
    parser::{ensure_sufficient_stack, Parser},
};

/// Block -> '{' { BlockItem } '}'
pub fn parse_block(parser: &mut Parser) {
    ensure_sufficient_stack(|| {
        let _ = parser.expect(TokenKind::OpenCurly);

        while !parser.check(TokenKind::CloseCurly) && !parser.at_end() {
            let before = parser.position();
            parse_block_item(parser);
            recover_stalled_item(parser, before);
        }

        let _ = parser.expect(TokenKind::CloseCurly);
        parser.emit(NonTerminal::Block);
    })
}

/// Block recovery: if a block item consumed nothing and the block is not
/// about to close, consume one token so the block loop always advances.
///
/// Returns whether a token was forced out.
pub fn recover_stalled_item(parser: &mut Parser, before: usize) -> bool {
    if parser.position() != before
        || parser.check(TokenKind::CloseCurly)
        || parser.at_end()
    {
        return false;
    }

    match parser.advance() {
        Some(token) => {
            trace!("block item stalled; dropping `{}` on line {}", token.value, token.line);
            true
        }
        None => false,
    }
}

/// BlockItem -> Decl | Stmt, not emitted
pub fn parse_block_item(parser: &mut Parser) {
    if parser.check_any(&DECL_STARTERS) {
        parse_decl(parser);
    } else {
        parse_stmt(parser);
    }
}

pub fn parse_stmt(parser: &mut Parser) {
    let handler = parser
        .current_token_kind()
        .and_then(|kind| parser.get_stmt_lookup().get(&kind).copied());

    ensure_sufficient_stack(|| match handler {
        Some(handler) => handler(parser),
        None => parse_assign_or_expr_stmt(parser),
    })
}

/// Stmt -> LVal '=' Exp ';' | [Exp] ';'
///
/// Which form applies is decided by `is_assign_stmt`.
pub fn parse_assign_or_expr_stmt(parser: &mut Parser) {
    if parser.check(TokenKind::Identifier) && is_assign_stmt(parser) {
        parse_lval(parser);
        let _ = parser.expect(TokenKind::Assignment);
        parse_exp(parser);
        let _ = parser.expect_error(TokenKind::Semicolon, ErrorKind::MissingSemicolon);
    } else if !parser.at_end() {
        parse_exp(parser);
        let _ = parser.expect_error(TokenKind::Semicolon, ErrorKind::MissingSemicolon);
    }

    parser.emit(NonTerminal::Stmt);
}

/// Scans forward from the cursor without consuming: `=` before any `;`
/// means an assignment. Reaching the end of input means an expression.
pub fn is_assign_stmt(parser: &Parser) -> bool {
    for token in parser.remaining() {
        match token.kind {
            TokenKind::Semicolon => return false,
            TokenKind::Assignment => return true,
            _ => {}
        }
    }

    false
}

/// Stmt -> 'if' '(' Cond ')' Stmt [ 'else' Stmt ]
pub fn parse_if_stmt(parser: &mut Parser) {
    parser.advance();
    let _ = parser.expect(TokenKind::OpenParen);
    parse_cond(parser);
    let _ = parser.expect_or_skip(TokenKind::CloseParen, ErrorKind::MissingRightParen);
    parse_stmt(parser);
    if parser.matches(&[TokenKind::Else]) {
        parse_stmt(parser);
    }
    parser.emit(NonTerminal::Stmt);
}

/// Stmt -> 'for' '(' [ForStmt] ';' [Cond] ';' [ForStmt] ')' Stmt
pub fn parse_for_stmt(parser: &mut Parser) {
    parser.advance();
    let _ = parser.expect(TokenKind::OpenParen);

    if !parser.check(TokenKind::Semicolon) {
        parse_for_clause(parser);
    }
    let _ = parser.expect(TokenKind::Semicolon);

    if !parser.check(TokenKind::Semicolon) {
        parse_cond(parser);
    }
    let _ = parser.expect(TokenKind::Semicolon);

    if !parser.check(TokenKind::CloseParen) {
        parse_for_clause(parser);
    }
    let _ = parser.expect_or_skip(TokenKind::CloseParen, ErrorKind::MissingRightParen);

    parse_stmt(parser);
    parser.emit(NonTerminal::Stmt);
}

/// ForStmt -> LVal '=' Exp { ',' LVal '=' Exp }
pub fn parse_for_clause(parser: &mut Parser) {
    loop {
        parse_lval(parser);
        let _ = parser.expect(TokenKind::Assignment);
        parse_exp(parser);

        if !parser.matches(&[TokenKind::Comma]) {
            break;
        }
    }
    parser.emit(NonTerminal::ForStmt);
}

/// Stmt -> 'break' ';' | 'continue' ';'
pub fn parse_jump_stmt(parser: &mut Parser) {
    parser.advance();
    let _ = parser.expect_error(TokenKind::Semicolon, ErrorKind::MissingSemicolon);
    parser.emit(NonTerminal::Stmt);
}

/// Stmt -> 'return' [Exp] ';'
pub fn parse_return_stmt(parser: &mut Parser) {
    parser.advance();
    if !parser.check(TokenKind::Semicolon) {
        parse_exp(parser);
    }
    let _ = parser.expect_error(TokenKind::Semicolon, ErrorKind::MissingSemicolon);
    parser.emit(NonTerminal::Stmt);
}

/// Stmt -> 'printf' '(' StringConst { ',' Exp } ')' ';'
pub fn parse_printf_stmt(parser: &mut Parser) {
    parser.advance();
    let _ = parser.expect(TokenKind::OpenParen);
    let _ = parser.expect(TokenKind::String);
    while parser.matches(&[TokenKind::Comma]) {
        parse_exp(parser);
    }
    let _ = parser.expect_error(TokenKind::CloseParen, ErrorKind::MissingRightParen);
    let _ = parser.expect_error(TokenKind::Semicolon, ErrorKind::MissingSemicolon);
    parser.emit(NonTerminal::Stmt);
}

/// Stmt -> Block
pub fn parse_block_stmt(parser: &mut Parser) {
    parse_block(parser);
    parser.emit(NonTerminal::Stmt);
}

/// Stmt -> ';'
pub fn parse_empty_stmt(parser: &mut Parser) {
    parser.advance();
    parser.emit(NonTerminal::Stmt);
}
