//! Tree collapsing - reduces an expression tree to a canonical polynomial
//!
//! The walk is bottom-up. `+`, `-` and `=` merge their operands straight into
//! the accumulating [`Polynomial`]; `*`, `/` and `^` combine two monomials into
//! a new [`Term`] that an ancestor either merges or keeps combining.
//!
//! Chains of operators of the same family are walked with explicit loops, so
//! a sum or product with any number of operands collapses in constant stack.

use crate::ast::{Node, Operator, Parts, Term};
use crate::error::{Error, Result};
use crate::polynomial::Polynomial;

/// Coefficients within this distance of zero count as zero
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Outcome of visiting a node
enum Reduced {
    /// A monomial not yet merged into the polynomial
    Term(Term),
    /// The node's contribution is already in the polynomial
    Merged,
}

/// Collapses expression trees into polynomials
#[derive(Debug, Clone, Copy)]
pub struct Collapser {
    tolerance: f64,
}

impl Default for Collapser {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl Collapser {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Collapse a whole tree. For an equation the result is `LHS - RHS`.
    pub fn collapse(&self, node: Node) -> Result<Polynomial> {
        let mut polynomial = Polynomial::new();
        self.collapse_into(node, &mut polynomial, 1.0)?;
        if let Some((exponent, coefficient)) = polynomial.iter().find(|(_, c)| !c.is_finite()) {
            return Err(Error::Overflow(format!(
                "coefficient of exponent {exponent} is {coefficient}"
            )));
        }
        Ok(polynomial)
    }

    /// Collapse `node` into an existing polynomial, scaling every merged
    /// coefficient by `sign`.
    pub fn collapse_into(&self, node: Node, polynomial: &mut Polynomial, sign: f64) -> Result<()> {
        self.merge(node.into_parts(), polynomial, sign)
    }

    fn merge(&self, parts: Parts, polynomial: &mut Polynomial, sign: f64) -> Result<()> {
        if let Reduced::Term(term) = self.visit(parts, polynomial, sign)? {
            polynomial.merge_term(&term, sign);
        }
        Ok(())
    }

    fn visit(&self, parts: Parts, polynomial: &mut Polynomial, sign: f64) -> Result<Reduced> {
        match parts {
            Parts::Term(term) => Ok(Reduced::Term(term)),
            Parts::Error(message) => Err(Error::Aborted(message)),
            Parts::Operation(operator, left, right) if operator.is_additive() => {
                self.merge_sum(operator, left, right, polynomial, sign)?;
                Ok(Reduced::Merged)
            }
            Parts::Operation(operator, left, right) => {
                self.fold_product(operator, left, right).map(Reduced::Term)
            }
        }
    }

    /// Merge a chain of `+`, `-` and `=` into `polynomial`.
    ///
    /// The parser builds such chains with a loop, leaning left and as long as
    /// the input, so the left spine is walked iteratively and only right
    /// operands recurse.
    fn merge_sum(
        &self,
        operator: Operator,
        left: Node,
        right: Node,
        polynomial: &mut Polynomial,
        sign: f64,
    ) -> Result<()> {
        let mut operands = vec![(right, operand_sign(operator, sign))];
        let mut current = left.into_parts();
        let leftmost = loop {
            match current {
                Parts::Operation(operator, left, right) if operator.is_additive() => {
                    operands.push((right, operand_sign(operator, sign)));
                    current = left.into_parts();
                }
                other => break other,
            }
        };

        self.merge(leftmost, polynomial, sign)?;
        for (operand, operand_sign) in operands.into_iter().rev() {
            self.collapse_into(operand, polynomial, operand_sign)?;
        }
        Ok(())
    }

    /// Fold a chain of `*`, `/`, `^` and `%` into one monomial, left to right
    fn fold_product(&self, operator: Operator, left: Node, right: Node) -> Result<Term> {
        let mut operands = vec![(operator, right)];
        let mut current = left.into_parts();
        let leftmost = loop {
            match current {
                Parts::Operation(operator, left, right) if !operator.is_additive() => {
                    operands.push((operator, right));
                    current = left.into_parts();
                }
                other => break other,
            }
        };

        let mut product = self.monomial(leftmost)?;
        for (operator, operand) in operands.into_iter().rev() {
            let operand = self.monomial(operand.into_parts())?;
            product = combine(operator, product, operand)?;
            if !product.coefficient.is_finite() {
                return Err(Error::Overflow(format!(
                    "'{operator}' produced the coefficient {}",
                    product.coefficient
                )));
            }
        }
        Ok(product)
    }

    /// Reduce an operand of `*`, `/` or `^` to a single monomial.
    ///
    /// Sums are collapsed on their own; only those that cancel down to one
    /// term can take part in a product.
    fn monomial(&self, parts: Parts) -> Result<Term> {
        let mut scratch = Polynomial::new();
        match self.visit(parts, &mut scratch, 1.0)? {
            Reduced::Term(term) => Ok(term),
            Reduced::Merged => scratch.as_monomial(self.tolerance).ok_or_else(|| {
                Error::UnsupportedOperation(format!(
                    "cannot expand a product involving the sum {}",
                    scratch.to_equation_string().trim_end_matches(" = 0")
                ))
            }),
        }
    }
}

/// Sign a right operand of `operator` is merged with
fn operand_sign(operator: Operator, sign: f64) -> f64 {
    if operator == Operator::Add {
        sign
    } else {
        -sign
    }
}

/// Collapse with the default tolerance
pub fn collapse(node: Node) -> Result<Polynomial> {
    Collapser::default().collapse(node)
}

fn combine(operator: Operator, left: Term, right: Term) -> Result<Term> {
    match operator {
        Operator::Multiply => Ok(multiply(left, right)),
        Operator::Divide => divide(left, right),
        Operator::Power => power(left, right),
        Operator::Modulo => Err(Error::UnsupportedOperation("modulo is not supported".into())),
        other => Err(Error::UnsupportedOperation(format!(
            "'{other}' cannot combine two monomials"
        ))),
    }
}

fn multiply(left: Term, right: Term) -> Term {
    let exponent = left.effective_exponent() + right.effective_exponent();
    Term::new(
        left.coefficient * right.coefficient,
        exponent,
        left.variable.or(right.variable),
    )
}

fn divide(left: Term, right: Term) -> Result<Term> {
    if right.coefficient == 0.0 {
        return Err(Error::DivideByZero);
    }
    let exponent = left.effective_exponent() - right.effective_exponent();
    Ok(Term::new(
        left.coefficient / right.coefficient,
        exponent,
        left.variable.or(right.variable),
    ))
}

fn power(base: Term, exponent: Term) -> Result<Term> {
    let base_exponent = base.effective_exponent();
    if exponent.effective_exponent() != 0 {
        return Err(Error::UnsupportedOperation(
            "exponents containing the variable are not supported".into(),
        ));
    }
    let k = exponent.coefficient;

    if base_exponent == 0 {
        if base.coefficient == 0.0 && k < 0.0 {
            return Err(Error::DivideByZero);
        }
        let value = base.coefficient.powf(k);
        if !value.is_finite() {
            return Err(Error::UnsupportedOperation(format!(
                "{} ^ {} is not a finite real number",
                base.coefficient, k
            )));
        }
        return Ok(Term::constant(value));
    }

    // Variable raised to a constant: the constant must be a whole number
    if k.fract() != 0.0 || k.abs() > i32::MAX as f64 {
        return Err(Error::UnsupportedOperation(format!(
            "exponent {k} on the variable must be an integer"
        )));
    }
    let k = k as i32;
    if base.coefficient == 0.0 && k < 0 {
        return Err(Error::DivideByZero);
    }
    let new_exponent = base_exponent.checked_mul(k).ok_or_else(|| {
        Error::UnsupportedOperation(format!("exponent {base_exponent} * {k} overflows"))
    })?;
    Ok(Term::new(base.coefficient.powi(k), new_exponent, base.variable))
}
