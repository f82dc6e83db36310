use crate::{
    ast,
    common::Error,
    lexer::Lexer,
    token::{Token, TokenKind},
};

/// Deepest expression nesting accepted before parsing gives up.
const MAX_NESTING: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

/// Parse routine to run when a token starts an expression.
#[derive(Debug, Clone, Copy)]
enum PrefixRule {
    Ident,
    Int,
    Bool,
    Grouped,
    Prefix,
    Function,
    If,
}

/// Parse routine to run when a token follows a complete expression.
#[derive(Debug, Clone, Copy)]
enum InfixRule {
    Binary,
    Call,
}

impl TokenKind {
    fn precedence(&self) -> Precedence {
        match self {
            Self::Equal | Self::Different => Precedence::Equals,
            Self::Lesser | Self::LesserEqual | Self::Greater | Self::GreaterEqual => {
                Precedence::LessGreater
            }
            Self::Plus | Self::Minus => Precedence::Sum,
            Self::Multiplication | Self::Division => Precedence::Product,
            Self::LeftParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }

    fn prefix_rule(&self) -> Option<PrefixRule> {
        match self {
            Self::Identifier => Some(PrefixRule::Ident),
            Self::Integer => Some(PrefixRule::Int),
            Self::True | Self::False => Some(PrefixRule::Bool),
            Self::LeftParen => Some(PrefixRule::Grouped),
            Self::Function => Some(PrefixRule::Function),
            Self::If => Some(PrefixRule::If),
            _ if self.is_prefix_op() => Some(PrefixRule::Prefix),
            _ => None,
        }
    }

    fn infix_rule(&self) -> Option<InfixRule> {
        match self {
            Self::LeftParen => Some(InfixRule::Call),
            _ if self.is_binary_op() => Some(InfixRule::Binary),
            _ => None,
        }
    }
}

/// Precedence-climbing parser over a pull-based token stream.
///
/// Parsing never stops at the first problem: each failure is recorded in
/// `errors()` and the offending construct is left out of (or left unset in)
/// the tree, and parsing resumes with the next token.
#[derive(Debug, Clone)]
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    errors: Vec<Error>,
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        Parser {
            lexer,
            current,
            peek,
            errors: Vec::new(),
            depth: 0,
        }
    }

    pub fn from_str(source: &str) -> Self {
        Parser::new(Lexer::from_str(source))
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn expected_token(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.advance();
            return true;
        }

        let found = if self.peek.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            self.peek.kind.to_string()
        };
        let message = format!("a {} token was expected, but {} was found", kind, found);
        self.errors.push(self.peek.error_at(&message));

        false
    }

    fn skip_semicolon(&mut self) {
        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }
    }

    pub fn parse_program(&mut self) -> ast::Program {
        let mut stmts = Vec::new();

        while self.current.kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                stmts.push(stmt);
            }
            self.advance();
        }

        ast::Program { stmts }
    }

    fn parse_statement(&mut self) -> Option<ast::Stmt> {
        match self.current.kind {
            TokenKind::Let => Some(self.parse_let_statement()),
            TokenKind::Return => Some(self.parse_return_statement()),
            _ => Some(self.parse_expression_statement()),
        }
    }

    fn parse_let_statement(&mut self) -> ast::Stmt {
        let token = self.current.clone();
        let mut let_stmt = ast::LetStmt {
            name: None,
            value: None,
        };

        if !self.expected_token(TokenKind::Identifier) {
            return ast::Stmt::new(let_stmt, token);
        }
        let_stmt.name = Some(ast::Ident::from(&self.current));

        if !self.expected_token(TokenKind::Assign) {
            return ast::Stmt::new(let_stmt, token);
        }
        self.advance();

        let_stmt.value = self.parse_expression(Precedence::Lowest);
        self.skip_semicolon();

        ast::Stmt::new(let_stmt, token)
    }

    fn parse_return_statement(&mut self) -> ast::Stmt {
        let token = self.current.clone();

        // bare `return` ends on itself so a closing brace stays unconsumed
        if matches!(self.peek.kind, TokenKind::RightBrace | TokenKind::Eof) {
            return ast::Stmt::new(ast::ReturnStmt { value: None }, token);
        }
        self.advance();

        if self.current.kind == TokenKind::Semicolon {
            return ast::Stmt::new(ast::ReturnStmt { value: None }, token);
        }

        let value = self.parse_expression(Precedence::Lowest);
        self.skip_semicolon();

        ast::Stmt::new(ast::ReturnStmt { value }, token)
    }

    fn parse_expression_statement(&mut self) -> ast::Stmt {
        let token = self.current.clone();

        let expr = self.parse_expression(Precedence::Lowest);
        self.skip_semicolon();

        ast::Stmt::new(ast::ExprStmt { expr }, token)
    }

    fn parse_block(&mut self) -> ast::Block {
        let token = self.current.clone();
        self.advance();

        let mut stmts = Vec::new();
        while self.current.kind != TokenKind::RightBrace && self.current.kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                stmts.push(stmt);
            }
            self.advance();
        }

        ast::Block { token, stmts }
    }

    fn parse_expression(&mut self, min_prec: Precedence) -> Option<ast::Expr> {
        if self.depth >= MAX_NESTING {
            self.errors
                .push(self.current.error_at("expression nested too deeply"));
            return None;
        }

        self.depth += 1;
        let expr = self.parse_nested_expression(min_prec);
        self.depth -= 1;

        expr
    }

    fn parse_nested_expression(&mut self, min_prec: Precedence) -> Option<ast::Expr> {
        let rule = match self.current.kind.prefix_rule() {
            Some(rule) => rule,
            None => {
                let message = format!("no prefix parse rule for {} found", self.current.kind);
                self.errors.push(self.current.error_at(&message));
                return None;
            }
        };

        let mut left = self.parse_prefix(rule)?;

        while self.peek.kind != TokenKind::Semicolon && self.peek.kind.precedence() > min_prec {
            let rule = match self.peek.kind.infix_rule() {
                Some(rule) => rule,
                None => return Some(left),
            };
            self.advance();

            left = self.parse_infix(rule, left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self, rule: PrefixRule) -> Option<ast::Expr> {
        match rule {
            PrefixRule::Ident => Some(ast::Expr::new(
                ast::Ident::from(&self.current),
                self.current.clone(),
            )),
            PrefixRule::Int => self.parse_integer(),
            PrefixRule::Bool => Some(ast::Expr::new(
                ast::BoolLit {
                    value: self.current.kind == TokenKind::True,
                },
                self.current.clone(),
            )),
            PrefixRule::Grouped => self.parse_grouped(),
            PrefixRule::Prefix => self.parse_prefix_expression(),
            PrefixRule::Function => self.parse_function(),
            PrefixRule::If => self.parse_if(),
        }
    }

    fn parse_infix(&mut self, rule: InfixRule, left: ast::Expr) -> Option<ast::Expr> {
        match rule {
            InfixRule::Binary => self.parse_infix_expression(left),
            InfixRule::Call => self.parse_call(left),
        }
    }

    fn parse_integer(&mut self) -> Option<ast::Expr> {
        match self.current.literal.parse::<i64>() {
            Ok(value) => Some(ast::Expr::new(ast::IntLit { value }, self.current.clone())),
            Err(_) => {
                let message = format!("could not parse {} as integer", self.current.literal);
                self.errors.push(self.current.error_at(&message));
                None
            }
        }
    }

    fn parse_grouped(&mut self) -> Option<ast::Expr> {
        self.advance();

        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expected_token(TokenKind::RightParen) {
            return None;
        }

        Some(expr)
    }

    fn parse_prefix_expression(&mut self) -> Option<ast::Expr> {
        let token = self.current.clone();
        let op = ast::PrefixOp::from_token_kind(token.kind)?;
        self.advance();

        let operand = self.parse_expression(Precedence::Prefix)?;

        Some(ast::Expr::new(
            ast::PrefixExpr {
                op,
                operand: Box::new(operand),
            },
            token,
        ))
    }

    fn parse_infix_expression(&mut self, left: ast::Expr) -> Option<ast::Expr> {
        let token = self.current.clone();
        let op = ast::InfixOp::from_token_kind(token.kind)?;
        let prec = token.kind.precedence();
        self.advance();

        let right = self.parse_expression(prec)?;

        Some(ast::Expr::new(
            ast::InfixExpr {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            token,
        ))
    }

    fn parse_function(&mut self) -> Option<ast::Expr> {
        let token = self.current.clone();

        if !self.expected_token(TokenKind::LeftParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expected_token(TokenKind::LeftBrace) {
            return None;
        }
        let body = self.parse_block();

        Some(ast::Expr::new(ast::FunLit { parameters, body }, token))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<ast::Ident>> {
        let mut parameters = Vec::new();

        if self.peek.kind == TokenKind::RightParen {
            self.advance();
            return Some(parameters);
        }

        loop {
            if !self.expected_token(TokenKind::Identifier) {
                return None;
            }
            parameters.push(ast::Ident::from(&self.current));

            if self.peek.kind != TokenKind::Comma {
                break;
            }
            self.advance();
        }

        if !self.expected_token(TokenKind::RightParen) {
            return None;
        }

        Some(parameters)
    }

    fn parse_call(&mut self, callee: ast::Expr) -> Option<ast::Expr> {
        let token = self.current.clone();
        let args = self.parse_call_arguments()?;

        Some(ast::Expr::new(
            ast::CallExpr {
                callee: Box::new(callee),
                args,
            },
            token,
        ))
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<ast::Expr>> {
        let mut args = Vec::new();

        if self.peek.kind == TokenKind::RightParen {
            self.advance();
            return Some(args);
        }

        loop {
            self.advance();
            args.push(self.parse_expression(Precedence::Lowest)?);

            if self.peek.kind != TokenKind::Comma {
                break;
            }
            self.advance();
        }

        if !self.expected_token(TokenKind::RightParen) {
            return None;
        }

        Some(args)
    }

    fn parse_if(&mut self) -> Option<ast::Expr> {
        let token = self.current.clone();

        if !self.expected_token(TokenKind::LeftParen) {
            return None;
        }
        self.advance();

        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expected_token(TokenKind::RightParen) {
            return None;
        }
        if !self.expected_token(TokenKind::LeftBrace) {
            return None;
        }
        let consequence = self.parse_block();

        let mut alternative = None;
        if self.peek.kind == TokenKind::Else {
            self.advance();
            if !self.expected_token(TokenKind::LeftBrace) {
                return None;
            }
            alternative = Some(self.parse_block());
        }

        Some(ast::Expr::new(
            ast::IfExpr {
                condition: Box::new(condition),
                consequence,
                alternative,
            },
            token,
        ))
    }
}
