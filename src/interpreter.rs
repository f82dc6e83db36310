use derive_more::From;

use crate::{
    ast,
    object::{Object, NULL},
};

/// Any node the evaluator accepts as an entry point.
#[derive(Debug, Clone, Copy, From)]
pub enum Node<'a> {
    Program(&'a ast::Program),
    Stmt(&'a ast::Stmt),
    Block(&'a ast::Block),
    Expr(&'a ast::Expr),
}

/// Non-local exits. `return` unwinds to the outermost node being evaluated;
/// an error aborts evaluation altogether.
#[derive(Debug, Clone, PartialEq)]
enum Unwind {
    Return(Object),
    Error(String),
}

type EvalResult = Result<Object, Unwind>;

fn error(message: String) -> Unwind {
    Unwind::Error(message)
}

/// Reduces a node to a value. Runtime failures come back as `Object::Error`.
pub fn evaluate<'a>(node: impl Into<Node<'a>>) -> Object {
    let result = match node.into() {
        Node::Program(program) => eval_stmts(&program.stmts),
        Node::Stmt(stmt) => eval_stmt(stmt),
        Node::Block(block) => eval_stmts(&block.stmts),
        Node::Expr(expr) => eval_expr(expr),
    };

    match result {
        Ok(value) | Err(Unwind::Return(value)) => value,
        Err(Unwind::Error(message)) => Object::Error(message),
    }
}

fn eval_stmts(stmts: &[ast::Stmt]) -> EvalResult {
    let mut result = NULL;
    for stmt in stmts {
        result = eval_stmt(stmt)?;
    }

    Ok(result)
}

fn eval_optional(expr: &Option<ast::Expr>) -> EvalResult {
    match expr {
        Some(expr) => eval_expr(expr),
        None => Ok(NULL),
    }
}

fn eval_stmt(stmt: &ast::Stmt) -> EvalResult {
    match &stmt.kind {
        // Nothing is bound: the value is only evaluated for its errors.
        ast::StmtKind::Let(let_stmt) => {
            eval_optional(&let_stmt.value)?;
            Ok(NULL)
        }
        ast::StmtKind::Return(return_stmt) => {
            Err(Unwind::Return(eval_optional(&return_stmt.value)?))
        }
        ast::StmtKind::Expr(expr_stmt) => eval_optional(&expr_stmt.expr),
        ast::StmtKind::Block(block) => eval_stmts(&block.stmts),
    }
}

fn eval_expr(expr: &ast::Expr) -> EvalResult {
    match &expr.kind {
        ast::ExprKind::Ident(ident) => Err(error(format!("identifier not found: {}", ident.name))),
        ast::ExprKind::IntLit(int_lit) => Ok(Object::Integer(int_lit.value)),
        ast::ExprKind::BoolLit(bool_lit) => Ok(Object::from_bool(bool_lit.value)),
        ast::ExprKind::Prefix(prefix) => {
            let operand = eval_expr(&prefix.operand)?;
            eval_prefix(prefix.op, operand)
        }
        ast::ExprKind::Infix(infix) => {
            let left = eval_expr(&infix.left)?;
            let right = eval_expr(&infix.right)?;
            eval_infix(infix.op, left, right)
        }
        ast::ExprKind::If(if_expr) => {
            let condition = eval_expr(&if_expr.condition)?;
            if condition.is_truthy() {
                eval_stmts(&if_expr.consequence.stmts)
            } else if let Some(alternative) = &if_expr.alternative {
                eval_stmts(&alternative.stmts)
            } else {
                Ok(NULL)
            }
        }
        ast::ExprKind::FunLit(_) | ast::ExprKind::Call(_) => {
            Err(error("function values are not supported".into()))
        }
    }
}

fn eval_prefix(op: ast::PrefixOp, operand: Object) -> EvalResult {
    match op {
        ast::PrefixOp::Negation => Ok(Object::from_bool(!operand.is_truthy())),
        ast::PrefixOp::Minus => match operand {
            Object::Integer(value) => value
                .checked_neg()
                .map(Object::Integer)
                .ok_or_else(|| error(format!("integer overflow: -{}", value))),
            other => Err(error(format!("unknown operator: -{}", other.type_name()))),
        },
    }
}

fn eval_infix(op: ast::InfixOp, left: Object, right: Object) -> EvalResult {
    match (&left, &right) {
        (Object::Integer(left), Object::Integer(right)) => eval_integer_infix(op, *left, *right),
        _ if op == ast::InfixOp::Equal => Ok(Object::from_bool(left.is_same(&right))),
        _ if op == ast::InfixOp::Different => Ok(Object::from_bool(!left.is_same(&right))),
        _ if left.type_name() != right.type_name() => Err(error(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            op,
            right.type_name()
        ))),
        _ => Err(error(format!(
            "unknown operator: {} {} {}",
            left.type_name(),
            op,
            right.type_name()
        ))),
    }
}

fn eval_integer_infix(op: ast::InfixOp, left: i64, right: i64) -> EvalResult {
    let checked = match op {
        ast::InfixOp::Plus => left.checked_add(right),
        ast::InfixOp::Minus => left.checked_sub(right),
        ast::InfixOp::Multiplication => left.checked_mul(right),
        ast::InfixOp::Division => {
            if right == 0 {
                return Err(error("division by zero".into()));
            }
            left.checked_div(right)
        }
        ast::InfixOp::Lesser => return Ok(Object::from_bool(left < right)),
        ast::InfixOp::LesserEqual => return Ok(Object::from_bool(left <= right)),
        ast::InfixOp::Greater => return Ok(Object::from_bool(left > right)),
        ast::InfixOp::GreaterEqual => return Ok(Object::from_bool(left >= right)),
        ast::InfixOp::Equal => return Ok(Object::from_bool(left == right)),
        ast::InfixOp::Different => return Ok(Object::from_bool(left != right)),
    };

    checked
        .map(Object::Integer)
        .ok_or_else(|| error(format!("integer overflow: {} {} {}", left, op, right)))
}
