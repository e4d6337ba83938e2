use std::fmt::Display;

use crate::lexer::tokens::Token;

/// Grammar nonterminals that appear in the derivation trace.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NonTerminal {
    CompUnit,
    ConstDecl,
    VarDecl,
    ConstDef,
    VarDef,
    ConstInitVal,
    InitVal,
    FuncDef,
    MainFuncDef,
    FuncType,
    FuncFParams,
    FuncFParam,
    Block,
    Stmt,
    ForStmt,
    LVal,
    PrimaryExp,
    Number,
    UnaryExp,
    UnaryOp,
    FuncRParams,
    MulExp,
    AddExp,
    RelExp,
    EqExp,
    LAndExp,
    LOrExp,
    Exp,
    Cond,
    ConstExp,
}

impl NonTerminal {
    pub fn name(&self) -> &'static str {
        match self {
            NonTerminal::CompUnit => "CompUnit",
            NonTerminal::ConstDecl => "ConstDecl",
            NonTerminal::VarDecl => "VarDecl",
            NonTerminal::ConstDef => "ConstDef",
            NonTerminal::VarDef => "VarDef",
            NonTerminal::ConstInitVal => "ConstInitVal",
            NonTerminal::InitVal => "InitVal",
            NonTerminal::FuncDef => "FuncDef",
            NonTerminal::MainFuncDef => "MainFuncDef",
            NonTerminal::FuncType => "FuncType",
            NonTerminal::FuncFParams => "FuncFParams",
            NonTerminal::FuncFParam => "FuncFParam",
            NonTerminal::Block => "Block",
            NonTerminal::Stmt => "Stmt",
            NonTerminal::ForStmt => "ForStmt",
            NonTerminal::LVal => "LVal",
            NonTerminal::PrimaryExp => "PrimaryExp",
            NonTerminal::Number => "Number",
            NonTerminal::UnaryExp => "UnaryExp",
            NonTerminal::UnaryOp => "UnaryOp",
            NonTerminal::FuncRParams => "FuncRParams",
            NonTerminal::MulExp => "MulExp",
            NonTerminal::AddExp => "AddExp",
            NonTerminal::RelExp => "RelExp",
            NonTerminal::EqExp => "EqExp",
            NonTerminal::LAndExp => "LAndExp",
            NonTerminal::LOrExp => "LOrExp",
            NonTerminal::Exp => "Exp",
            NonTerminal::Cond => "Cond",
            NonTerminal::ConstExp => "ConstExp",
        }
    }
}

impl Display for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceLine {
    /// A consumed token, rendered `<kind-name> <text>`
    Token(Token),
    /// A completed production, rendered `<Name>`
    NonTerminal(NonTerminal),
}

impl Display for TraceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceLine::Token(token) => write!(f, "{}", token),
            TraceLine::NonTerminal(nonterminal) => write!(f, "{}", nonterminal),
        }
    }
}

/// The parser's product: consumed tokens interleaved with completed
/// productions, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    lines: Vec<TraceLine>,
}

impl Trace {
    pub fn new() -> Self {
        Trace::default()
    }

    pub fn push_token(&mut self, token: Token) {
        self.lines.push(TraceLine::Token(token));
    }

    pub fn push_nonterminal(&mut self, nonterminal: NonTerminal) {
        self.lines.push(TraceLine::NonTerminal(nonterminal));
    }

    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.lines.iter().filter_map(|line| match line {
            TraceLine::Token(token) => Some(token),
            TraceLine::NonTerminal(_) => None,
        })
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = NonTerminal> + '_ {
        self.lines.iter().filter_map(|line| match line {
            TraceLine::Token(_) => None,
            TraceLine::NonTerminal(nonterminal) => Some(*nonterminal),
        })
    }

    /// One line per entry, each terminated by a newline.
    pub fn render(&self) -> String {
        self.lines.iter().map(|line| format!("{}\n", line)).collect()
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
