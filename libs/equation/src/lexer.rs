//! Equation lexer - tokenizes input strings
//!
//! Converts an equation string into a stream of tokens, one token per call to
//! [`Lexer::next_token`]. Once the input is exhausted the lexer keeps returning
//! an `Eof` token.

use crate::error::{Error, Result};
use crate::token::{Token, TokenType};

/// Variable symbol used when none is configured
pub const DEFAULT_VARIABLE: char = 'x';

/// Whether `c` can serve as the unknown.
///
/// Digits, `.`, whitespace and operator characters are claimed by other
/// tokens first, so a variable spelled with one of them could never be lexed.
pub fn is_variable_symbol(c: char) -> bool {
    c.is_alphabetic()
}

/// The equation lexer
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    current_char: Option<char>,
    variable: char,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given input, using `x` as the variable symbol
    pub fn new(input: &str) -> Self {
        Self::with_variable(input, DEFAULT_VARIABLE)
    }

    /// Create a new lexer that recognizes `variable` as the unknown
    pub fn with_variable(input: &str, variable: char) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            chars,
            position: 0,
            current_char,
            variable,
            finished: false,
        }
    }

    /// The variable symbol this lexer recognizes
    pub fn variable(&self) -> char {
        self.variable
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.chars.get(self.position).copied();
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read a numeric literal: digits with an optional decimal point
    fn read_number(&mut self) -> Result<f64> {
        let start_pos = self.position;
        let mut has_digits = false;

        while let Some(c) = self.current_char {
            if c.is_ascii_digit() {
                has_digits = true;
                self.advance();
            } else {
                break;
            }
        }

        // A lone dot is only part of the number when digits surround it
        if self.current_char == Some('.')
            && (has_digits || self.peek().is_some_and(|c| c.is_ascii_digit()))
        {
            self.advance(); // Skip '.'
            while let Some(c) = self.current_char {
                if c.is_ascii_digit() {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        // Literals too long to fit an f64 parse to infinity
        let text: String = self.chars[start_pos..self.position].iter().collect();
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(Error::LexError {
                character: self.chars[start_pos],
                position: start_pos,
            }),
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let position = self.position;
        let Some(c) = self.current_char else {
            return Ok(Token::eof(position));
        };

        let token_type = match c {
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '*' => TokenType::Multiply,
            '/' => TokenType::Divide,
            '%' => TokenType::Modulo,
            '^' => TokenType::Power,
            '=' => TokenType::Equal,
            '(' => TokenType::OpenParen,
            ')' => TokenType::CloseParen,
            c if c.is_ascii_digit() || c == '.' => {
                if c == '.' && !self.peek().is_some_and(|n| n.is_ascii_digit()) {
                    return Err(Error::LexError {
                        character: c,
                        position,
                    });
                }
                let value = self.read_number()?;
                return Ok(Token::number(value, position));
            }
            c if c == self.variable => {
                self.advance();
                return Ok(Token::variable(c.to_string(), position));
            }
            other => {
                return Err(Error::LexError {
                    character: other,
                    position,
                })
            }
        };

        self.advance();
        Ok(Token::new(token_type, position))
    }
}

/// Yields every token before `Eof`; a lex error is yielded once and ends the stream.
impl Iterator for Lexer {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.token_type == TokenType::Eof => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
