//! Token types for the equation lexer
//!
//! Tokens represent the lexical elements of a polynomial equation.

use std::fmt;

/// Token types for the equation lexer
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum TokenType {
    // Literals
    Number,
    Variable,

    // Operators
    Plus,     // +
    Minus,    // -
    Multiply, // *
    Divide,   // /
    Modulo,   // %
    Power,    // ^
    Equal,    // =

    // Delimiters
    OpenParen,  // (
    CloseParen, // )

    // End of input
    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenType::Number => "number",
            TokenType::Variable => "variable",
            TokenType::Plus => "'+'",
            TokenType::Minus => "'-'",
            TokenType::Multiply => "'*'",
            TokenType::Divide => "'/'",
            TokenType::Modulo => "'%'",
            TokenType::Power => "'^'",
            TokenType::Equal => "'='",
            TokenType::OpenParen => "'('",
            TokenType::CloseParen => "')'",
            TokenType::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// Payload carried by literal tokens
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(f64),
    Variable(String),
}

/// A token in the equation
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: Option<TokenValue>,
    pub position: usize,
}

impl Token {
    pub fn new(token_type: TokenType, position: usize) -> Self {
        Self {
            token_type,
            value: None,
            position,
        }
    }

    pub fn number(value: f64, position: usize) -> Self {
        Self {
            token_type: TokenType::Number,
            value: Some(TokenValue::Number(value)),
            position,
        }
    }

    pub fn variable(name: String, position: usize) -> Self {
        Self {
            token_type: TokenType::Variable,
            value: Some(TokenValue::Variable(name)),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenType::Eof, position)
    }

    /// Numeric payload, if this is a number token
    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            Some(TokenValue::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Variable name, if this is a variable token
    pub fn as_variable(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Variable(name)) => Some(name),
            _ => None,
        }
    }
}
