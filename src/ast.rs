use std::fmt;

use derive_more::{Display, From, TryInto};

use crate::{
    common::Span,
    token::{Token, TokenKind},
};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    #[display(fmt = "!")]
    Negation,
    #[display(fmt = "-")]
    Minus,
}

impl PrefixOp {
    pub fn from_token_kind(kind: TokenKind) -> Option<PrefixOp> {
        match kind {
            TokenKind::Negation => Some(PrefixOp::Negation),
            TokenKind::Minus => Some(PrefixOp::Minus),
            _ => None,
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    #[display(fmt = "+")]
    Plus,
    #[display(fmt = "-")]
    Minus,
    #[display(fmt = "*")]
    Multiplication,
    #[display(fmt = "/")]
    Division,
    #[display(fmt = "<")]
    Lesser,
    #[display(fmt = "<=")]
    LesserEqual,
    #[display(fmt = ">")]
    Greater,
    #[display(fmt = ">=")]
    GreaterEqual,
    #[display(fmt = "==")]
    Equal,
    #[display(fmt = "!=")]
    Different,
}

impl InfixOp {
    pub fn from_token_kind(kind: TokenKind) -> Option<InfixOp> {
        match kind {
            TokenKind::Plus => Some(InfixOp::Plus),
            TokenKind::Minus => Some(InfixOp::Minus),
            TokenKind::Multiplication => Some(InfixOp::Multiplication),
            TokenKind::Division => Some(InfixOp::Division),
            TokenKind::Lesser => Some(InfixOp::Lesser),
            TokenKind::LesserEqual => Some(InfixOp::LesserEqual),
            TokenKind::Greater => Some(InfixOp::Greater),
            TokenKind::GreaterEqual => Some(InfixOp::GreaterEqual),
            TokenKind::Equal => Some(InfixOp::Equal),
            TokenKind::Different => Some(InfixOp::Different),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl From<&Token> for Ident {
    fn from(token: &Token) -> Self {
        Ident {
            name: token.literal.clone(),
            span: token.span.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntLit {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLit {
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub op: PrefixOp,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub op: InfixOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub consequence: Block,
    pub alternative: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunLit {
    pub parameters: Vec<Ident>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, From, TryInto)]
pub enum ExprKind {
    Ident(Ident),
    IntLit(IntLit),
    BoolLit(BoolLit),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    FunLit(FunLit),
    Call(CallExpr),
}

/// An expression together with the token it started at (the operator token
/// for infix and call expressions).
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub token: Token,
}

impl Expr {
    pub fn new(kind: impl Into<ExprKind>, token: Token) -> Self {
        Expr {
            kind: kind.into(),
            token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: Option<Ident>,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub token: Token,
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

#[derive(Debug, Clone, PartialEq, From, TryInto)]
pub enum StmtKind {
    Let(LetStmt),
    Return(ReturnStmt),
    Expr(ExprStmt),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub token: Token,
}

impl Stmt {
    pub fn new(kind: impl Into<StmtKind>, token: Token) -> Self {
        Stmt {
            kind: kind.into(),
            token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.stmts
            .first()
            .map(|stmt| stmt.token_literal())
            .unwrap_or("")
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }

    Ok(())
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(ident) => write!(f, "{}", ident),
            ExprKind::IntLit(int_lit) => write!(f, "{}", int_lit.value),
            ExprKind::BoolLit(bool_lit) => write!(f, "{}", bool_lit.value),
            ExprKind::Prefix(prefix) => write!(f, "({}{})", prefix.op, prefix.operand),
            ExprKind::Infix(infix) => {
                write!(f, "({} {} {})", infix.left, infix.op, infix.right)
            }
            ExprKind::If(if_expr) => {
                // prefix and infix expressions already print their own parens
                match if_expr.condition.kind {
                    ExprKind::Prefix(_) | ExprKind::Infix(_) => {
                        write!(f, "if {} {}", if_expr.condition, if_expr.consequence)?
                    }
                    _ => write!(f, "if ({}) {}", if_expr.condition, if_expr.consequence)?,
                }
                if let Some(alternative) = &if_expr.alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            ExprKind::FunLit(fun_lit) => {
                write!(f, "fn(")?;
                write_joined(f, &fun_lit.parameters, ", ")?;
                write!(f, ") {}", fun_lit.body)
            }
            ExprKind::Call(call) => {
                write!(f, "{}(", call.callee)?;
                write_joined(f, &call.args, ", ")?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stmts.is_empty() {
            return write!(f, "{{ }}");
        }

        write!(f, "{{ ")?;
        write_joined(f, &self.stmts, " ")?;
        write!(f, " }}")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Let(let_stmt) => {
                write!(f, "let ")?;
                if let Some(name) = &let_stmt.name {
                    write!(f, "{}", name)?;
                }
                write!(f, " = ")?;
                if let Some(value) = &let_stmt.value {
                    write!(f, "{}", value)?;
                }
                write!(f, ";")
            }
            StmtKind::Return(return_stmt) => {
                write!(f, "return ")?;
                if let Some(value) = &return_stmt.value {
                    write!(f, "{}", value)?;
                }
                write!(f, ";")
            }
            StmtKind::Expr(expr_stmt) => match &expr_stmt.expr {
                Some(expr) => write!(f, "{}", expr),
                None => Ok(()),
            },
            StmtKind::Block(block) => write!(f, "{}", block),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.stmts, " ")
    }
}
