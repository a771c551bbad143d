//! Error types for formula evaluation.
//!
//! None of these reach the caller of [`evaluate`](crate::engine::evaluate):
//! they are collapsed into the `#ERROR` marker. [`try_evaluate`](crate::engine::try_evaluate)
//! exposes them for diagnostics.

use thiserror::Error;

/// Errors that can occur while expanding or evaluating a formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("{function}() requires at least one argument")]
    MissingArguments { function: &'static str },

    #[error("Unexpected character '{found}' at position {pos}")]
    UnexpectedCharacter { found: char, pos: usize },

    #[error("Unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("Expression nested deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFinite,
}

pub type Result<T> = std::result::Result<T, FormulaError>;
