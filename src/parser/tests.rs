//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Declarations and function definitions
//! - Every statement form
//! - The expression layers
//! - Assignment vs. expression statement disambiguation
//! - Error attribution and recovery

use test_log::test;

use super::{
    parser::{parse, Parser},
    stmt::{is_assign_stmt, recover_stalled_item},
};
use crate::{
    errors::errors::{Diagnostics, ErrorKind},
    lexer::lexer::tokenize,
    trace::trace::{NonTerminal, Trace},
};

fn parse_source(source: &str) -> (Trace, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source, &mut diagnostics);
    let trace = parse(tokens, &mut diagnostics);
    (trace, diagnostics)
}

fn lines(trace: &Trace) -> Vec<String> {
    trace.lines().iter().map(|line| line.to_string()).collect()
}

fn count(trace: &Trace, nonterminal: NonTerminal) -> usize {
    trace.nonterminals().filter(|found| *found == nonterminal).count()
}

fn contains_window(lines: &[String], window: &[&str]) -> bool {
    lines
        .windows(window.len())
        .any(|candidate| candidate.iter().zip(window).all(|(line, expected)| line == expected))
}

fn errors(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics.sorted().iter().map(|record| record.to_string()).collect()
}

#[test]
fn test_parse_minimal_main() {
    let (trace, diagnostics) = parse_source("int main(){return 0;}");

    assert!(diagnostics.is_empty());
    assert_eq!(
        lines(&trace),
        vec![
            "INTTK int",
            "MAINTK main",
            "LPARENT (",
            "RPARENT )",
            "LBRACE {",
            "RETURNTK return",
            "INTCON 0",
            "<Number>",
            "<PrimaryExp>",
            "<UnaryExp>",
            "<MulExp>",
            "<AddExp>",
            "<Exp>",
            "SEMICN ;",
            "<Stmt>",
            "RBRACE }",
            "<Block>",
            "<MainFuncDef>",
            "<CompUnit>",
        ]
    );
}

#[test]
fn test_parse_empty_program() {
    let (trace, diagnostics) = parse_source("");

    assert!(diagnostics.is_empty());
    assert_eq!(lines(&trace), vec!["<CompUnit>"]);
}

#[test]
fn test_parse_declarations() {
    let source = "const int a = 1, b[2] = {1, 2};\nint c;\nstatic int d[3];\nint main(){return 0;}";
    let (trace, diagnostics) = parse_source(source);

    assert!(diagnostics.is_empty());
    assert_eq!(count(&trace, NonTerminal::ConstDecl), 1);
    assert_eq!(count(&trace, NonTerminal::ConstDef), 2);
    assert_eq!(count(&trace, NonTerminal::ConstInitVal), 2);
    assert_eq!(count(&trace, NonTerminal::VarDecl), 2);
    assert_eq!(count(&trace, NonTerminal::VarDef), 2);
    assert_eq!(count(&trace, NonTerminal::ConstExp), 5);
    assert_eq!(count(&trace, NonTerminal::MainFuncDef), 1);
}

#[test]
fn test_parse_var_initializers() {
    let source = "int main() {\n int a = 3, b[2] = {a, a + 1}, c[1] = {};\n return 0;\n}";
    let (trace, diagnostics) = parse_source(source);

    assert!(diagnostics.is_empty());
    assert_eq!(count(&trace, NonTerminal::InitVal), 3);
    assert_eq!(count(&trace, NonTerminal::VarDef), 3);
}

#[test]
fn test_parse_function_definitions() {
    let source = "void f(int a, int b[]) { return; }\nint g() { return f(1, 2); }\nint main(){ return g(); }";
    let (trace, diagnostics) = parse_source(source);

    assert!(diagnostics.is_empty());
    assert_eq!(count(&trace, NonTerminal::FuncDef), 2);
    assert_eq!(count(&trace, NonTerminal::FuncType), 2);
    assert_eq!(count(&trace, NonTerminal::FuncFParams), 1);
    assert_eq!(count(&trace, NonTerminal::FuncFParam), 2);
    assert_eq!(count(&trace, NonTerminal::FuncRParams), 1);
    assert_eq!(trace.nonterminals().last(), Some(NonTerminal::CompUnit));
}

#[test]
fn test_parse_statements() {
    let source = r#"int main() {
    int i;
    for (i = 0; i < 10; i = i + 1) {
        if (i == 5) break; else continue;
    }
    for (;;) {}
    printf("%d\n", i);
    ;
    return 0;
}"#;
    let (trace, diagnostics) = parse_source(source);

    assert!(diagnostics.is_empty());
    assert_eq!(count(&trace, NonTerminal::Stmt), 10);
    assert_eq!(count(&trace, NonTerminal::ForStmt), 2);
    assert_eq!(count(&trace, NonTerminal::Cond), 2);
    assert_eq!(count(&trace, NonTerminal::Block), 3);
    assert!(lines(&trace).contains(&String::from(r#"STRCON "%d\n""#)));
}

#[test]
fn test_for_clause_with_multiple_assignments() {
    let source = "int main() {\n for (i = 0, j = 1; ; i = i + 1, j = j - 1) ;\n return 0;\n}";
    let (trace, diagnostics) = parse_source(source);

    assert!(diagnostics.is_empty());
    assert_eq!(count(&trace, NonTerminal::ForStmt), 2);
    assert_eq!(count(&trace, NonTerminal::LVal), 6);
    assert_eq!(count(&trace, NonTerminal::Cond), 0);
}

#[test]
fn test_parse_unary_and_multiplicative() {
    let (trace, diagnostics) =
        parse_source("int main(){ return -(1 + 2) * !a[0] % 3 / +f(); }");

    assert!(diagnostics.is_empty());
    assert_eq!(count(&trace, NonTerminal::UnaryOp), 3);
    assert_eq!(count(&trace, NonTerminal::MulExp), 7);
    assert_eq!(count(&trace, NonTerminal::FuncRParams), 0);
}

#[test]
fn test_relational_layer_trace_shape() {
    let (trace, diagnostics) =
        parse_source("int main(){ if (a < b && c == d || !e) ; return 0; }");

    assert!(diagnostics.is_empty());
    let lines = lines(&trace);
    assert!(contains_window(
        &lines,
        &[
            "IDENFR a",
            "<LVal>",
            "<PrimaryExp>",
            "<UnaryExp>",
            "<MulExp>",
            "<AddExp>",
            "<RelExp>",
            "LSS <",
            "IDENFR b",
        ]
    ));
    assert!(contains_window(&lines, &["<EqExp>", "<LAndExp>", "<LOrExp>", "OR ||"]));
    assert!(contains_window(&lines, &["<LAndExp>", "<LOrExp>", "<Cond>", "RPARENT )"]));
    assert_eq!(count(&trace, NonTerminal::LOrExp), 2);
    assert_eq!(count(&trace, NonTerminal::LAndExp), 3);
}

#[test]
fn test_assignment_statement_shape() {
    let (trace, diagnostics) = parse_source("int main() {\n a = 5;\n return 0;\n}");

    assert!(diagnostics.is_empty());
    assert!(contains_window(
        &lines(&trace),
        &["IDENFR a", "<LVal>", "ASSIGN =", "INTCON 5"]
    ));
}

#[test]
fn test_expression_statement_shape() {
    let (trace, diagnostics) = parse_source("int main() {\n a + 5;\n return 0;\n}");

    assert!(diagnostics.is_empty());
    let lines = lines(&trace);
    assert!(contains_window(
        &lines,
        &["IDENFR a", "<LVal>", "<PrimaryExp>", "<UnaryExp>", "<MulExp>", "<AddExp>", "PLUS +"]
    ));
    assert!(!lines.contains(&String::from("ASSIGN =")));
}

#[test]
fn test_is_assign_stmt_lookahead() {
    let cases = [
        ("a[i] = 1;", true),
        ("a = b = 1;", true),
        ("f(a);", false),
        ("a == 1;", false),
        ("a; b = 1;", false),
        ("a + 1", false),
        ("a + 1 = 2", true),
    ];

    for (source, expected) in cases {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        let parser = Parser::new(tokens, &mut diagnostics);

        assert_eq!(is_assign_stmt(&parser), expected, "{}", source);
        assert_eq!(parser.position(), 0);
    }
}

#[test]
fn test_missing_semicolon_after_return() {
    let (trace, diagnostics) = parse_source("int main(){return 0}");

    assert_eq!(errors(&diagnostics), vec!["1 i"]);
    assert_eq!(trace.nonterminals().last(), Some(NonTerminal::CompUnit));
}

#[test]
fn test_missing_semicolon_uses_previous_token_line() {
    let (_, diagnostics) = parse_source("int main() {\n    int a = 1\n    return a;\n}");

    assert_eq!(errors(&diagnostics), vec!["2 i"]);
}

#[test]
fn test_missing_right_paren_in_call() {
    let (_, diagnostics) = parse_source("int main() {\n f(1;\n return 0;\n}");

    assert_eq!(errors(&diagnostics), vec!["2 j"]);
}

#[test]
fn test_missing_right_paren_in_printf() {
    let (_, diagnostics) = parse_source("int main() {\n printf(\"%d\", 1;\n return 0;\n}");

    assert_eq!(errors(&diagnostics), vec!["2 j"]);
}

#[test]
fn test_missing_right_bracket() {
    let (_, diagnostics) = parse_source("int main() {\n int a[2;\n a[1 = 3;\n return 0;\n}");

    assert_eq!(errors(&diagnostics), vec!["2 k", "3 k"]);
}

#[test]
fn test_missing_right_paren_in_function_definition() {
    let (_, diagnostics) = parse_source("int f(int a {\n return a;\n}\nint main() {\n return 0;\n}");

    assert_eq!(errors(&diagnostics), vec!["1 j"]);
}

#[test]
fn test_if_header_skips_to_right_paren() {
    let (trace, diagnostics) =
        parse_source("int main() {\n if (a < 1 b c) { return 1; }\n return 0;\n}");

    assert_eq!(errors(&diagnostics), vec!["2 j"]);
    assert!(contains_window(
        &lines(&trace),
        &["IDENFR b", "IDENFR c", "RPARENT )", "LBRACE {"]
    ));
}

#[test]
fn test_if_header_skip_stops_at_open_curly() {
    let (trace, diagnostics) =
        parse_source("int main() {\n if (a < 1 {\n return 1;\n }\n return 0;\n}");

    assert_eq!(errors(&diagnostics), vec!["2 j"]);
    assert_eq!(count(&trace, NonTerminal::Block), 2);
}

#[test]
fn test_for_header_skip_stops_at_semicolon() {
    let (trace, diagnostics) =
        parse_source("int main() {\n for (i = 0; i < 1; i = i + 1 x;\n return 0;\n}");

    assert_eq!(errors(&diagnostics), vec!["2 j"]);
    assert!(contains_window(&lines(&trace), &["IDENFR x", "SEMICN ;", "<Stmt>"]));
    assert_eq!(trace.nonterminals().last(), Some(NonTerminal::CompUnit));
}

#[test]
fn test_block_recovery_terminates_on_unmatched_parens() {
    let (trace, diagnostics) = parse_source("int main() { ))) }");

    assert_eq!(errors(&diagnostics), vec!["1 i", "1 i", "1 i"]);
    assert_eq!(
        trace.tokens().filter(|token| token.value == ")").count(),
        4
    );
    assert!(trace.nonterminals().collect::<Vec<_>>().ends_with(&[
        NonTerminal::Block,
        NonTerminal::MainFuncDef,
        NonTerminal::CompUnit
    ]));
}

#[test]
fn test_block_recovery_on_stray_keywords() {
    let (trace, diagnostics) = parse_source("int main() {\n else else main void\n return 0;\n}");

    assert!(diagnostics.records().iter().all(|record| record.kind == ErrorKind::MissingSemicolon));
    assert_eq!(trace.nonterminals().last(), Some(NonTerminal::CompUnit));
    assert_eq!(count(&trace, NonTerminal::MainFuncDef), 1);
}

#[test]
fn test_recover_stalled_item_forces_one_token() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(") }", &mut diagnostics);
    let mut parser = Parser::new(tokens, &mut diagnostics);

    assert!(!recover_stalled_item(&mut parser, 1));
    assert!(recover_stalled_item(&mut parser, 0));
    assert_eq!(parser.position(), 1);
    assert!(!recover_stalled_item(&mut parser, 1));
    assert_eq!(parser.position(), 1);
}

#[test]
fn test_truncated_input_terminates() {
    let (trace, diagnostics) = parse_source("int main() {");
    assert!(diagnostics.is_empty());
    assert_eq!(trace.nonterminals().last(), Some(NonTerminal::CompUnit));

    let (_, diagnostics) = parse_source("int main() {\n return 0");
    assert_eq!(errors(&diagnostics), vec!["2 i"]);
}

#[test]
fn test_lexical_error_suppresses_syntax_error_on_same_line() {
    let (_, diagnostics) = parse_source("int x = 1 & 2;");

    assert_eq!(errors(&diagnostics), vec!["1 a"]);
    assert_eq!(diagnostics.records()[0].kind, ErrorKind::IllegalSymbol);
}

#[test]
fn test_lexical_error_does_not_suppress_other_lines() {
    let (_, diagnostics) = parse_source("int main() {\n int x = 1 & 2;\n return 0\n}");

    assert_eq!(errors(&diagnostics), vec!["2 a", "3 i"]);
}

#[test]
fn test_tokens_after_main_are_ignored() {
    let (trace, diagnostics) = parse_source("int main(){return 0;} int x;");

    assert!(diagnostics.is_empty());
    assert!(!lines(&trace).contains(&String::from("IDENFR x")));
    assert_eq!(trace.nonterminals().last(), Some(NonTerminal::CompUnit));
}

#[test]
fn test_end_of_input_lookahead() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize("a\n\nb", &mut diagnostics);
    let parser = Parser::new(tokens, &mut diagnostics);

    assert_eq!(parser.peek(5).line(), 3);
    assert!(parser.peek(5).is_end());
    assert_eq!(parser.error_line(), 1);
    assert!(!parser.at_end());

    let mut empty = Diagnostics::new();
    let parser = Parser::new(vec![], &mut empty);
    assert!(parser.at_end());
    assert_eq!(parser.current_token().line(), 1);
    assert_eq!(parser.current_token_kind(), None);
}

const DEEP: usize = 100_000;

#[test]
fn test_deeply_parenthesised_return() {
    let source = format!("int main(){{return {}1{};}}", "(".repeat(DEEP), ")".repeat(DEEP));
    let (trace, diagnostics) = parse_source(&source);

    assert!(diagnostics.is_empty());
    assert_eq!(count(&trace, NonTerminal::PrimaryExp), DEEP + 1);
    assert_eq!(trace.nonterminals().last(), Some(NonTerminal::CompUnit));
}

#[test]
fn test_deeply_negated_return() {
    let source = format!("int main(){{return {}1;}}", "-".repeat(DEEP));
    let (trace, diagnostics) = parse_source(&source);

    assert!(diagnostics.is_empty());
    assert_eq!(count(&trace, NonTerminal::UnaryOp), DEEP);
    assert_eq!(count(&trace, NonTerminal::UnaryExp), DEEP + 1);
}

#[test]
fn test_deeply_nested_blocks() {
    let source = format!("int main(){{{}{}return 0;}}", "{".repeat(DEEP), "}".repeat(DEEP));
    let (trace, diagnostics) = parse_source(&source);

    assert!(diagnostics.is_empty());
    assert_eq!(count(&trace, NonTerminal::Block), DEEP + 1);
    assert_eq!(trace.nonterminals().last(), Some(NonTerminal::CompUnit));
}

#[test]
fn test_deeply_unclosed_parentheses_terminate() {
    let source = format!("int main(){{return {}1;}}", "(".repeat(DEEP));
    let (trace, diagnostics) = parse_source(&source);

    assert_eq!(diagnostics.len(), DEEP);
    assert!(diagnostics
        .records()
        .iter()
        .all(|record| record.kind == ErrorKind::MissingRightParen));
    assert_eq!(trace.nonterminals().last(), Some(NonTerminal::CompUnit));
}
