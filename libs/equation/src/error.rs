//! Error types for the equation pipeline

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while lexing, parsing, collapsing or solving an equation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Lex error: unexpected character '{character}' at position {position}")]
    LexError { character: char, position: usize },

    #[error("Syntax error: {0}")]
    SyntaxError(String),

    #[error("Division by zero")]
    DivideByZero,

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Degree {0} is too high: only equations up to degree 2 can be solved")]
    DegreeTooHigh(i32),

    #[error("Degree {0} is too low: negative exponents are not supported")]
    DegreeTooLow(i32),

    #[error("No real root: discriminant is {discriminant}")]
    NoRealRoot { discriminant: f64 },

    #[error("Numeric overflow: {0}")]
    Overflow(String),

    #[error("Collapse aborted: {0}")]
    Aborted(String),
}
