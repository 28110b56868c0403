//! Unit tests for the equation parser module

use polyroot_equation::ast::{Node, Operator, Term};
use polyroot_equation::error::Error;
use polyroot_equation::lexer::Lexer;
use polyroot_equation::parser::Parser;

/// Helper to parse an equation and return the tree
fn parse(expr: &str) -> Result<Node, Error> {
    Parser::new(Lexer::new(expr)).parse()
}

#[test]
fn test_parse_literals() {
    assert_eq!(parse("42").unwrap(), Node::Term(Term::constant(42.0)));
    assert_eq!(parse("x").unwrap(), Node::Term(Term::variable("x")));
}

#[test]
fn test_parse_arithmetic() {
    assert!(parse("1 + 2").is_ok());
    assert!(parse("5 - 3").is_ok());
    assert!(parse("3 * 4").is_ok());
    assert!(parse("10 / 2").is_ok());
    assert!(parse("10 % 3").is_ok());
    assert!(parse("2 ^ 3").is_ok());
}

#[test]
fn test_parse_precedence() {
    // Multiplication binds tighter than addition
    assert_eq!(parse("1 + 2 * 3").unwrap().to_string(), "(1 + (2 * 3))");
    // Parentheses override precedence
    assert_eq!(parse("(1 + 2) * 3").unwrap().to_string(), "((1 + 2) * 3)");
    // Power binds tighter than multiplication
    assert_eq!(parse("2 * x ^ 2").unwrap().to_string(), "(2 * (x ^ 2))");
    // Power is left-associative
    assert_eq!(parse("x ^ 2 ^ 3").unwrap().to_string(), "((x ^ 2) ^ 3)");
}

#[test]
fn test_parse_equation() {
    let tree = parse("3x^2 + 2x - 5 = 0").unwrap();
    assert_eq!(
        tree.to_string(),
        "((((3 * (x ^ 2)) + (2 * x)) - 5) = 0)"
    );
    assert_eq!(tree.operator(), Some(Operator::Equal));
}

#[test]
fn test_parse_implicit_multiplication() {
    assert_eq!(parse("2(x + 1)").unwrap().to_string(), "(2 * (x + 1))");
    assert_eq!(parse("x(x - 1)").unwrap().to_string(), "(x * (x - 1))");
}

#[test]
fn test_parse_unary() {
    assert_eq!(parse("-x + 2").unwrap().to_string(), "(-1x + 2)");
    assert_eq!(parse("--3").unwrap().to_string(), "3");
    assert_eq!(parse("-(x + 1)").unwrap().to_string(), "(-1 * (x + 1))");
}

#[test]
fn test_parse_errors() {
    assert!(matches!(parse("(x + 1"), Err(Error::SyntaxError(_))));
    assert!(matches!(parse("x + 1)"), Err(Error::SyntaxError(_))));
    assert!(matches!(parse(""), Err(Error::SyntaxError(_))));
    assert!(matches!(parse("x +"), Err(Error::SyntaxError(_))));
    assert!(matches!(parse("= 2"), Err(Error::SyntaxError(_))));
    assert!(matches!(parse("x 2"), Err(Error::SyntaxError(_))));
    assert!(matches!(parse("x = = 2"), Err(Error::SyntaxError(_))));
    assert!(matches!(parse("x ^"), Err(Error::SyntaxError(_))));
}

#[test]
fn test_parse_error_message_mentions_position() {
    let Err(Error::SyntaxError(message)) = parse("x + * 2") else {
        panic!("expected a syntax error");
    };
    assert!(message.contains("position 4"), "{message}");
}

#[test]
fn test_parse_nested_parentheses() {
    assert!(parse("((((x))))").is_ok());
    let deep = format!("{}x{}", "(".repeat(300), ")".repeat(300));
    assert!(matches!(parse(&deep), Err(Error::SyntaxError(_))));
}
