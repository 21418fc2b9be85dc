//! Safe evaluation of arithmetic formulas over named variables.
//!
//! Input passes a structural pre-check and a closed grammar before the
//! evaluator walks it, and the evaluator can only reach the functions
//! registered in [`functions`]. Every failure maps to one [`EvalError`]
//! variant and successful results are always finite.

pub mod ast;
pub mod functions;
pub mod validate;

pub use ast::{AstNode, BinaryOperator, Evaluator, Parser, UnaryOperator};

use std::collections::HashMap;
use thiserror::Error;

/// Everything that can go wrong between receiving a formula and producing
/// a number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("unmatched parentheses")]
    UnmatchedParentheses,

    #[error("malformed expression: {reason}")]
    MalformedExpression { reason: String },

    #[error("invalid variable binding: '{name}'")]
    InvalidVariable { name: String },

    #[error("undefined symbol: '{name}'")]
    UndefinedSymbol { name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("'{operation}' is undefined for value {value}")]
    DomainError { operation: String, value: f64 },
}

/// Evaluates a formula against a set of variable bindings.
///
/// The bindings are verified first, then the formula is screened and
/// parsed, and finally the tree is reduced to a single finite number.
///
/// # Arguments
/// * `expression` - The formula text, e.g. `"sqrt(x) + (x * y) / 2"`.
/// * `bindings` - Variable values the formula may refer to by name.
///
/// # Returns
/// The value of the formula, or the first [`EvalError`] encountered.
pub fn evaluate(expression: &str, bindings: &HashMap<String, f64>) -> Result<f64, EvalError> {
    validate::check_bindings(bindings)?;
    validate::check_parentheses(expression)?;
    validate::check_well_formed(expression)?;

    let ast = Parser::parse_expression(expression)?;
    Evaluator::new().evaluate(&ast, bindings)
}
