//! A small expression language: a pull-based lexer, a precedence-climbing
//! parser producing an owned syntax tree, and a tree-walking evaluator.
//!
//! ```
//! use pratt_lang::{object::Object, run};
//!
//! assert_eq!(run("5 + 5 * 2").unwrap(), Object::Integer(15));
//! assert!(run("let = 5;").is_err());
//! ```

pub mod ast;
pub mod common;
pub mod interpreter;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod token;

pub use common::Error;
pub use interpreter::evaluate;
pub use lexer::Lexer;
pub use object::Object;
pub use parser::Parser;

/// Lexes, parses and evaluates `source`. Nothing is evaluated when the parser
/// recorded errors; all of them are returned instead.
pub fn run(source: &str) -> Result<Object, Vec<Error>> {
    let mut parser = Parser::from_str(source);
    let program = parser.parse_program();

    let errors = parser.into_errors();
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(evaluate(&program))
}
