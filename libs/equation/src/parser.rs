//! Equation parser - converts token streams to expression trees
//!
//! Recursive descent parser. Precedence (lowest to highest):
//! 1. equation (=)
//! 2. additive (+, -)
//! 3. multiplicative (*, /, %, implicit multiplication)
//! 4. polarity (unary +, -)
//! 5. power (^)
//! 6. factor (number, variable, parenthesized expression)
//!
//! Every binary level is left-associative.

use crate::ast::{Node, Operator, Term};
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};

/// Default limit on parenthesis and sign nesting
pub const MAX_RECURSION_DEPTH: usize = 200;

/// Parser for polynomial equations
pub struct Parser {
    lexer: Lexer,
    current_token: Option<Token>,
    recursion_depth: usize,
    max_depth: usize,
}

impl Parser {
    /// Create a new parser reading tokens from `lexer`
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            current_token: None,
            recursion_depth: 0,
            max_depth: MAX_RECURSION_DEPTH,
        }
    }

    /// Override the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Advance to the next token
    fn advance(&mut self) -> Result<()> {
        self.current_token = Some(self.lexer.next_token()?);
        Ok(())
    }

    /// Type of the current token; `Eof` before the first advance
    fn current_type(&self) -> TokenType {
        self.current_token
            .as_ref()
            .map(|t| t.token_type)
            .unwrap_or(TokenType::Eof)
    }

    /// Check if current token is one of the given types
    fn current_token_is_one_of(&self, types: &[TokenType]) -> bool {
        types.contains(&self.current_type())
    }

    fn current_position(&self) -> usize {
        self.current_token.as_ref().map(|t| t.position).unwrap_or(0)
    }

    fn unexpected(&self, expected: &str) -> Error {
        Error::SyntaxError(format!(
            "Expected {}, got {} at position {}",
            expected,
            self.current_type(),
            self.current_position()
        ))
    }

    /// Parse the entire equation (top-level entry point)
    pub fn parse(&mut self) -> Result<Node> {
        self.advance()?;
        let node = self.parse_equation()?;

        // Ensure we've consumed all input
        match self.current_type() {
            TokenType::Eof => Ok(node),
            TokenType::Equal => Err(Error::SyntaxError(format!(
                "Only one '=' is allowed, found another at position {}",
                self.current_position()
            ))),
            TokenType::CloseParen => Err(Error::SyntaxError(format!(
                "Unmatched parenthesis: unexpected ')' at position {}",
                self.current_position()
            ))),
            _ => Err(self.unexpected("an operator or end of input")),
        }
    }

    /// Check recursion depth and increment
    fn check_recursion_depth(&mut self) -> Result<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > self.max_depth {
            return Err(Error::SyntaxError(format!(
                "Expression too deeply nested (max depth: {})",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// Decrement recursion depth
    fn decrement_recursion_depth(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Parse equation: expression ('=' expression)?
    fn parse_equation(&mut self) -> Result<Node> {
        let left = self.parse_expression()?;

        if self.current_type() == TokenType::Equal {
            self.advance()?; // Skip '='
            let right = self.parse_expression()?;
            return Ok(Node::operation(Operator::Equal, left, right));
        }

        Ok(left)
    }

    /// Parse additive expression: term (('+' | '-') term)*
    fn parse_expression(&mut self) -> Result<Node> {
        let mut left = self.parse_term()?;

        while self.current_token_is_one_of(&[TokenType::Plus, TokenType::Minus]) {
            let op = match self.current_type() {
                TokenType::Plus => Operator::Add,
                _ => Operator::Subtract,
            };
            self.advance()?;
            let right = self.parse_term()?;
            left = Node::operation(op, left, right);
        }

        Ok(left)
    }

    /// Parse multiplicative expression: unary (('*' | '/' | '%')? unary)*
    ///
    /// A variable or '(' right after an operand is an implicit multiplication.
    fn parse_term(&mut self) -> Result<Node> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_type() {
                TokenType::Multiply => Operator::Multiply,
                TokenType::Divide => Operator::Divide,
                TokenType::Modulo => Operator::Modulo,
                TokenType::Variable | TokenType::OpenParen => {
                    let right = self.parse_power()?;
                    left = Node::operation(Operator::Multiply, left, right);
                    continue;
                }
                _ => break,
            };
            self.advance()?;
            let right = self.parse_unary()?;
            left = Node::operation(op, left, right);
        }

        Ok(left)
    }

    /// Parse polarity expression: ('+' | '-')* power
    fn parse_unary(&mut self) -> Result<Node> {
        match self.current_type() {
            TokenType::Minus => {
                self.check_recursion_depth()?;
                self.advance()?; // Skip '-'
                let operand = self.parse_unary()?;
                self.decrement_recursion_depth();
                Ok(negate(operand))
            }
            TokenType::Plus => {
                self.check_recursion_depth()?;
                self.advance()?; // Skip '+'
                let operand = self.parse_unary()?;
                self.decrement_recursion_depth();
                Ok(operand)
            }
            _ => self.parse_power(),
        }
    }

    /// Parse power expression: factor ('^' signed_factor)*
    fn parse_power(&mut self) -> Result<Node> {
        let mut left = self.parse_factor()?;

        while self.current_type() == TokenType::Power {
            self.advance()?; // Skip '^'
            let right = self.parse_exponent()?;
            left = Node::operation(Operator::Power, left, right);
        }

        Ok(left)
    }

    /// Parse the right operand of '^', allowing a sign: `x^-1`
    fn parse_exponent(&mut self) -> Result<Node> {
        match self.current_type() {
            TokenType::Minus => {
                self.advance()?;
                Ok(negate(self.parse_factor()?))
            }
            TokenType::Plus => {
                self.advance()?;
                self.parse_factor()
            }
            _ => self.parse_factor(),
        }
    }

    /// Parse factor: NUMBER | VARIABLE | '(' expression ')'
    fn parse_factor(&mut self) -> Result<Node> {
        match self.current_type() {
            TokenType::Number => {
                let value = self.current_token.as_ref().and_then(Token::as_number);
                let Some(value) = value else {
                    return Err(self.unexpected("a number"));
                };
                self.advance()?;
                Ok(Node::Term(Term::constant(value)))
            }
            TokenType::Variable => {
                let name = self
                    .current_token
                    .as_ref()
                    .and_then(Token::as_variable)
                    .map(str::to_string);
                let Some(name) = name else {
                    return Err(self.unexpected("a variable"));
                };
                self.advance()?;
                Ok(Node::Term(Term::variable(name)))
            }
            TokenType::OpenParen => {
                let open_position = self.current_position();
                self.check_recursion_depth()?;
                self.advance()?; // Skip '('
                let node = self.parse_expression()?;
                if self.current_type() != TokenType::CloseParen {
                    return Err(Error::SyntaxError(format!(
                        "Unmatched parenthesis opened at position {}: expected ')', got {}",
                        open_position,
                        self.current_type()
                    )));
                }
                self.advance()?; // Skip ')'
                self.decrement_recursion_depth();
                Ok(node)
            }
            _ => Err(self.unexpected("a number, variable or '('")),
        }
    }
}

/// Unary minus is multiplication by -1
fn negate(mut node: Node) -> Node {
    if let Node::Term(term) = &mut node {
        term.coefficient = -term.coefficient;
        return node;
    }
    Node::operation(Operator::Multiply, Node::Term(Term::constant(-1.0)), node)
}

/// Parse `input` using the default variable symbol
pub fn parse(input: &str) -> Result<Node> {
    Parser::new(Lexer::new(input)).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(c: f64) -> Node {
        Node::Term(Term::constant(c))
    }

    fn x() -> Node {
        Node::Term(Term::variable("x"))
    }

    #[test]
    fn test_precedence() {
        let tree = parse("1 + 2 * x").unwrap();
        assert_eq!(
            tree,
            Node::operation(
                Operator::Add,
                term(1.0),
                Node::operation(Operator::Multiply, term(2.0), x())
            )
        );
    }

    #[test]
    fn test_left_associative() {
        let tree = parse("8 - 2 - 1").unwrap();
        assert_eq!(
            tree,
            Node::operation(
                Operator::Subtract,
                Node::operation(Operator::Subtract, term(8.0), term(2.0)),
                term(1.0)
            )
        );
    }

    #[test]
    fn test_equation_is_lowest() {
        let tree = parse("x + 1 = 2").unwrap();
        assert_eq!(
            tree,
            Node::operation(
                Operator::Equal,
                Node::operation(Operator::Add, x(), term(1.0)),
                term(2.0)
            )
        );
    }

    #[test]
    fn test_implicit_multiplication_binds_power_first() {
        let tree = parse("3x^2").unwrap();
        assert_eq!(
            tree,
            Node::operation(
                Operator::Multiply,
                term(3.0),
                Node::operation(Operator::Power, x(), term(2.0))
            )
        );
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(parse("-4").unwrap(), term(-4.0));
        assert_eq!(
            parse("x^-1").unwrap(),
            Node::operation(Operator::Power, x(), term(-1.0))
        );
        assert_eq!(
            parse("-(x)").unwrap(),
            Node::Term(Term::new(-1.0, 1, Some("x".into())))
        );
    }

    #[test]
    fn test_unmatched_parenthesis() {
        assert!(matches!(parse("(x + 1"), Err(Error::SyntaxError(_))));
        assert!(matches!(parse("x + 1)"), Err(Error::SyntaxError(_))));
    }

    #[test]
    fn test_empty_factor() {
        assert!(matches!(parse(""), Err(Error::SyntaxError(_))));
        assert!(matches!(parse("x + "), Err(Error::SyntaxError(_))));
        assert!(matches!(parse("* 2"), Err(Error::SyntaxError(_))));
        assert!(matches!(parse("()"), Err(Error::SyntaxError(_))));
    }

    #[test]
    fn test_second_equal_rejected() {
        assert!(matches!(parse("x = 1 = 2"), Err(Error::SyntaxError(_))));
    }

    #[test]
    fn test_depth_limit() {
        let input = format!("{}x{}", "(".repeat(10), ")".repeat(10));
        let result = Parser::new(Lexer::new(&input)).with_max_depth(5).parse();
        assert!(matches!(result, Err(Error::SyntaxError(_))));
        assert!(Parser::new(Lexer::new(&input)).parse().is_ok());
    }

    #[test]
    fn test_long_chains_are_not_nested() {
        let input = format!("{}x", "1 + ".repeat(100_000));
        let tree = parse(&input).unwrap();
        assert_eq!(tree.depth(), 100_001);

        // The partial tree is dropped on the way out of the error
        let input = format!("{}1 +", "2x * ".repeat(100_000));
        assert!(matches!(parse(&input), Err(Error::SyntaxError(_))));
    }

    #[test]
    fn test_lex_error_surfaces() {
        assert!(matches!(parse("x + y"), Err(Error::LexError { .. })));
    }
}
