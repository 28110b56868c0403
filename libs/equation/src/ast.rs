//! Expression tree representation
//!
//! The tree mirrors the equation grammar directly: every leaf is a monomial
//! [`Term`], every inner node a binary [`Operator`] application. Children are
//! boxed and exclusively owned, so a tree is always finite and acyclic.

use std::fmt;

/// A single monomial: `coefficient * variable^exponent`
///
/// A term without a variable name is a constant and only ever contributes to
/// exponent 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub coefficient: f64,
    pub exponent: i32,
    pub variable: Option<String>,
}

impl Term {
    pub fn new(coefficient: f64, exponent: i32, variable: Option<String>) -> Self {
        Self {
            coefficient,
            exponent,
            variable,
        }
    }

    /// A bare constant
    pub fn constant(value: f64) -> Self {
        Self::new(value, 0, None)
    }

    /// A bare variable: coefficient 1, exponent 1
    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(1.0, 1, Some(name.into()))
    }

    /// Exponent this term contributes to when merged into a polynomial
    pub fn effective_exponent(&self) -> i32 {
        if self.variable.is_some() {
            self.exponent
        } else {
            0
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.variable, self.exponent) {
            (None, _) | (Some(_), 0) => write!(f, "{}", self.coefficient),
            (Some(name), 1) if self.coefficient == 1.0 => write!(f, "{name}"),
            (Some(name), 1) => write!(f, "{}{name}", self.coefficient),
            (Some(name), e) if self.coefficient == 1.0 => write!(f, "{name}^{e}"),
            (Some(name), e) => write!(f, "{}{name}^{e}", self.coefficient),
        }
    }
}

/// Binary operators, lowest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Equal => '=',
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Modulo => '%',
            Operator::Power => '^',
        }
    }

    /// Operators that merge straight into the accumulating polynomial
    pub fn is_additive(&self) -> bool {
        matches!(self, Operator::Equal | Operator::Add | Operator::Subtract)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A monomial leaf
    Term(Term),

    /// Binary operation: left operator right
    Operation {
        operator: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Terminal diagnostic; collapsing stops as soon as one is reached
    Error { message: String },
}

impl Node {
    pub fn operation(operator: Operator, left: Node, right: Node) -> Self {
        Node::Operation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Node::Error {
            message: message.into(),
        }
    }

    /// Leaf left behind when a child is moved out of its parent
    fn vacant() -> Self {
        Node::Term(Term::constant(0.0))
    }

    /// Operator of an inner node
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Node::Operation { operator, .. } => Some(*operator),
            _ => None,
        }
    }

    /// Take the node apart, handing out ownership of its contents.
    ///
    /// `Node` has a custom `Drop`, so its fields cannot be moved out by a
    /// pattern; consumers match on [`Parts`] instead.
    pub fn into_parts(mut self) -> Parts {
        match &mut self {
            Node::Term(term) => Parts::Term(std::mem::replace(term, Term::constant(0.0))),
            Node::Operation {
                operator,
                left,
                right,
            } => Parts::Operation(
                *operator,
                std::mem::replace(left.as_mut(), Node::vacant()),
                std::mem::replace(right.as_mut(), Node::vacant()),
            ),
            Node::Error { message } => Parts::Error(std::mem::take(message)),
        }
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            if let Node::Operation { left, right, .. } = node {
                stack.push(&**left);
                stack.push(&**right);
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Node::Operation { left, right, .. } = node {
                stack.push((&**left, depth + 1));
                stack.push((&**right, depth + 1));
            }
        }
        deepest
    }

    /// Move every inner child onto `stack`, leaving vacant leaves behind
    fn detach_children(&mut self, stack: &mut Vec<Node>) {
        if let Node::Operation { left, right, .. } = self {
            for child in [left, right] {
                if matches!(**child, Node::Operation { .. }) {
                    stack.push(std::mem::replace(child.as_mut(), Node::vacant()));
                }
            }
        }
    }
}

/// Owned contents of a [`Node`], see [`Node::into_parts`]
#[derive(Debug)]
pub enum Parts {
    Term(Term),
    Operation(Operator, Node, Node),
    Error(String),
}

/// Sums are built by a loop in the parser, so a tree can be far deeper than
/// the call stack allows; tear it down with an explicit stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.detach_children(&mut stack);
        }
    }
}

impl From<Term> for Node {
    fn from(term: Term) -> Self {
        Node::Term(term)
    }
}

enum Piece<'a> {
    Node(&'a Node),
    Operator(Operator),
    Close,
}

/// Fully parenthesized infix rendering, e.g. `((3 * (x ^ 2)) = 0)`
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Node(self)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Node(Node::Term(term)) => write!(f, "{term}")?,
                Piece::Node(Node::Operation {
                    operator,
                    left,
                    right,
                }) => {
                    f.write_str("(")?;
                    stack.push(Piece::Close);
                    stack.push(Piece::Node(&**right));
                    stack.push(Piece::Operator(*operator));
                    stack.push(Piece::Node(&**left));
                }
                Piece::Node(Node::Error { message }) => write!(f, "<error: {message}>")?,
                Piece::Operator(operator) => write!(f, " {operator} ")?,
                Piece::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_has_exponent_zero() {
        let term = Term::new(4.0, 3, None);
        assert_eq!(term.effective_exponent(), 0);
        assert_eq!(Term::variable("x").effective_exponent(), 1);
    }

    #[test]
    fn test_display() {
        let tree = Node::operation(
            Operator::Equal,
            Node::operation(
                Operator::Multiply,
                Term::constant(3.0).into(),
                Node::operation(
                    Operator::Power,
                    Term::variable("x").into(),
                    Term::constant(2.0).into(),
                ),
            ),
            Term::constant(0.0).into(),
        );
        assert_eq!(tree.to_string(), "((3 * (x ^ 2)) = 0)");
        assert_eq!(tree.size(), 7);
        assert_eq!(tree.depth(), 4);
    }

    /// `1 + 1 + ... + 1`, leaning left the way the parser builds sums
    fn long_sum(terms: usize) -> Node {
        let mut tree = Node::from(Term::constant(1.0));
        for _ in 1..terms {
            tree = Node::operation(Operator::Add, tree, Term::constant(1.0).into());
        }
        tree
    }

    #[test]
    fn test_deep_tree() {
        let tree = long_sum(200_000);
        assert_eq!(tree.size(), 399_999);
        assert_eq!(tree.depth(), 200_000);
        let rendered = tree.to_string();
        assert!(rendered.starts_with("((((1 + 1) + 1)"));
        assert!(rendered.ends_with(" + 1)"));
        drop(tree);
    }

    #[test]
    fn test_into_parts() {
        let tree = Node::operation(
            Operator::Subtract,
            Term::variable("x").into(),
            Node::error("missing"),
        );
        match tree.into_parts() {
            Parts::Operation(operator, left, right) => {
                assert_eq!(operator, Operator::Subtract);
                assert_eq!(left, Node::Term(Term::variable("x")));
                assert_eq!(right, Node::error("missing"));
            }
            other => panic!("expected an operation, got {other:?}"),
        }
        assert!(matches!(
            Node::from(Term::constant(2.0)).into_parts(),
            Parts::Term(term) if term.coefficient == 2.0
        ));
    }

    #[test]
    fn test_term_display() {
        assert_eq!(Term::new(2.5, 2, Some("x".into())).to_string(), "2.5x^2");
        assert_eq!(Term::new(1.0, 1, Some("x".into())).to_string(), "x");
        assert_eq!(Term::constant(-4.0).to_string(), "-4");
    }
}
