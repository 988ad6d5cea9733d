//! Arithmetic expression engine.
//!
//! Input goes through three explicit stages: [`lexer`] turns text into
//! tokens, [`parser`] builds an [`Expr`] tree by recursive descent and
//! [`Expr::eval`] folds the tree into an `f64`. Only the operators below are
//! understood; there is no way for an input string to reach anything but
//! arithmetic.
//!
//! | operator | meaning                                 |
//! |----------|-----------------------------------------|
//! | `+ -`    | addition, subtraction, unary sign       |
//! | `* /`    | multiplication, true division           |
//! | `//`     | floor division                          |
//! | `**`     | exponentiation (right associative)      |
//! | `( )`    | grouping                                |
//!
//! Parentheses, stacked signs, exponents and operator chains all count
//! towards [`MAX_DEPTH`]; deeper input fails with
//! [`EvalError::TooDeeplyNested`] instead of exhausting the stack.

mod ast;
mod error;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::EvalError;
pub use parser::MAX_DEPTH;

/// Parses and evaluates `input` in one step.
///
/// # Errors
/// Returns an [`EvalError`] for empty or malformed input, division by zero
/// and results that are not finite numbers.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    parser::parse(input)?.eval()
}
