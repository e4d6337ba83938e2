//! Compilation unit, declarations and function definitions.

use crate::{
    errors::errors::ErrorKind,
    lexer::tokens::TokenKind,
    trace::trace::NonTerminal,
};

use super::{
    expr::{parse_const_exp, parse_exp},
    parser::Parser,
    stmt::parse_block,
};

/// CompUnit -> {Decl} {FuncDef} MainFuncDef
///
/// `int` opens a declaration unless the token two ahead is `(`, and opens
/// an ordinary function unless the next token is `main`.
pub fn parse_comp_unit(parser: &mut Parser) {
    while is_decl_start(parser) {
        parse_decl(parser);
    }

    while parser.check(TokenKind::Void)
        || (parser.check(TokenKind::Int) && !parser.peek(1).is(TokenKind::Main))
    {
        parse_func_def(parser);
    }

    if parser.check(TokenKind::Int) && parser.peek(1).is(TokenKind::Main) {
        parse_main_func_def(parser);
    }

    parser.emit(NonTerminal::CompUnit);
}

fn is_decl_start(parser: &Parser) -> bool {
    parser.check(TokenKind::Const)
        || parser.check(TokenKind::Static)
        || (parser.check(TokenKind::Int) && !parser.peek(2).is(TokenKind::OpenParen))
}

/// Decl -> ConstDecl | VarDecl
pub fn parse_decl(parser: &mut Parser) {
    if parser.check(TokenKind::Const) {
        parse_const_decl(parser);
    } else {
        parse_var_decl(parser);
    }
}

/// ConstDecl -> 'const' BType ConstDef { ',' ConstDef } ';'
pub fn parse_const_decl(parser: &mut Parser) {
    parser.advance();
    parse_btype(parser);
    parse_const_def(parser);
    while parser.matches(&[TokenKind::Comma]) {
        parse_const_def(parser);
    }
    let _ = parser.expect_error(TokenKind::Semicolon, ErrorKind::MissingSemicolon);
    parser.emit(NonTerminal::ConstDecl);
}

/// VarDecl -> [ 'static' ] BType VarDef { ',' VarDef } ';'
pub fn parse_var_decl(parser: &mut Parser) {
    parser.matches(&[TokenKind::Static]);
    parse_btype(parser);
    parse_var_def(parser);
    while parser.matches(&[TokenKind::Comma]) {
        parse_var_def(parser);
    }
    let _ = parser.expect_error(TokenKind::Semicolon, ErrorKind::MissingSemicolon);
    parser.emit(NonTerminal::VarDecl);
}

/// BType -> 'int', not emitted
fn parse_btype(parser: &mut Parser) {
    parser.matches(&[TokenKind::Int]);
}

/// `[ '[' ConstExp ']' ]` after a defined name.
fn parse_array_dimension(parser: &mut Parser) {
    if parser.matches(&[TokenKind::OpenBracket]) {
        parse_const_exp(parser);
        let _ = parser.expect_error(TokenKind::CloseBracket, ErrorKind::MissingRightBracket);
    }
}

/// ConstDef -> Ident [ '[' ConstExp ']' ] '=' ConstInitVal
pub fn parse_const_def(parser: &mut Parser) {
    parser.matches(&[TokenKind::Identifier]);
    parse_array_dimension(parser);
    let _ = parser.expect(TokenKind::Assignment);
    parse_const_init_val(parser);
    parser.emit(NonTerminal::ConstDef);
}

/// VarDef -> Ident [ '[' ConstExp ']' ] [ '=' InitVal ]
pub fn parse_var_def(parser: &mut Parser) {
    parser.matches(&[TokenKind::Identifier]);
    parse_array_dimension(parser);
    if parser.matches(&[TokenKind::Assignment]) {
        parse_init_val(parser);
    }
    parser.emit(NonTerminal::VarDef);
}

/// ConstInitVal -> ConstExp | '{' [ ConstExp { ',' ConstExp } ] '}'
pub fn parse_const_init_val(parser: &mut Parser) {
    parse_initializer(parser, parse_const_exp);
    parser.emit(NonTerminal::ConstInitVal);
}

/// InitVal -> Exp | '{' [ Exp { ',' Exp } ] '}'
pub fn parse_init_val(parser: &mut Parser) {
    parse_initializer(parser, parse_exp);
    parser.emit(NonTerminal::InitVal);
}

fn parse_initializer(parser: &mut Parser, element: fn(&mut Parser)) {
    if !parser.matches(&[TokenKind::OpenCurly]) {
        element(parser);
        return;
    }

    if !parser.check(TokenKind::CloseCurly) {
        element(parser);
        while parser.matches(&[TokenKind::Comma]) {
            element(parser);
        }
    }
    let _ = parser.expect(TokenKind::CloseCurly);
}

/// FuncDef -> FuncType Ident '(' [FuncFParams] ')' Block
pub fn parse_func_def(parser: &mut Parser) {
    parse_func_type(parser);
    parser.matches(&[TokenKind::Identifier]);
    let _ = parser.expect(TokenKind::OpenParen);
    if !parser.check(TokenKind::CloseParen) {
        parse_func_fparams(parser);
    }
    let _ = parser.expect_error(TokenKind::CloseParen, ErrorKind::MissingRightParen);
    parse_block(parser);
    parser.emit(NonTerminal::FuncDef);
}

/// MainFuncDef -> 'int' 'main' '(' ')' Block
pub fn parse_main_func_def(parser: &mut Parser) {
    parser.matches(&[TokenKind::Int]);
    parser.matches(&[TokenKind::Main]);
    let _ = parser.expect(TokenKind::OpenParen);
    let _ = parser.expect_error(TokenKind::CloseParen, ErrorKind::MissingRightParen);
    parse_block(parser);
    parser.emit(NonTerminal::MainFuncDef);
}

/// FuncType -> 'void' | 'int'
pub fn parse_func_type(parser: &mut Parser) {
    parser.matches(&[TokenKind::Void, TokenKind::Int]);
    parser.emit(NonTerminal::FuncType);
}

/// FuncFParams -> FuncFParam { ',' FuncFParam }
pub fn parse_func_fparams(parser: &mut Parser) {
    parse_func_fparam(parser);
    while parser.matches(&[TokenKind::Comma]) {
        parse_func_fparam(parser);
    }
    parser.emit(NonTerminal::FuncFParams);
}

/// FuncFParam -> BType Ident [ '[' ']' ]
pub fn parse_func_fparam(parser: &mut Parser) {
    parse_btype(parser);
    parser.matches(&[TokenKind::Identifier]);
    if parser.matches(&[TokenKind::OpenBracket]) {
        let _ = parser.expect_error(TokenKind::CloseBracket, ErrorKind::MissingRightBracket);
    }
    parser.emit(NonTerminal::FuncFParam);
}
