//! Canonical polynomial: exponent → aggregated coefficient

use crate::ast::Term;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A polynomial in a single variable, keyed by exponent.
///
/// Keys are kept in ascending order. A missing key means a zero coefficient;
/// entries whose coefficient cancelled to zero are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    terms: BTreeMap<i32, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variable: Option<String>,
}

impl Polynomial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coefficient` at `exponent`
    pub fn add(&mut self, exponent: i32, coefficient: f64) {
        *self.terms.entry(exponent).or_insert(0.0) += coefficient;
    }

    /// Merge a term, scaled by `sign` (1.0 adds, -1.0 subtracts)
    pub fn merge_term(&mut self, term: &Term, sign: f64) {
        if let Some(name) = &term.variable {
            if self.variable.is_none() {
                self.variable = Some(name.clone());
            }
        }
        self.add(term.effective_exponent(), sign * term.coefficient);
    }

    /// Coefficient at `exponent`, zero when absent
    pub fn coefficient(&self, exponent: i32) -> f64 {
        self.terms.get(&exponent).copied().unwrap_or(0.0)
    }

    /// Name of the variable seen while collapsing, if any
    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (i32, f64)> + '_ {
        self.terms.iter().map(|(e, c)| (*e, *c))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Exponents whose coefficient is not within `tolerance` of zero
    fn significant(&self, tolerance: f64) -> impl DoubleEndedIterator<Item = (i32, f64)> + '_ {
        self.iter().filter(move |(_, c)| c.abs() > tolerance)
    }

    /// Highest exponent with a non-zero coefficient
    pub fn degree(&self, tolerance: f64) -> Option<i32> {
        self.significant(tolerance).map(|(e, _)| e).next_back()
    }

    /// Lowest exponent with a non-zero coefficient
    pub fn lowest_degree(&self, tolerance: f64) -> Option<i32> {
        self.significant(tolerance).map(|(e, _)| e).next()
    }

    /// The polynomial as a single monomial, if it has at most one non-zero term
    pub fn as_monomial(&self, tolerance: f64) -> Option<Term> {
        let mut significant = self.significant(tolerance);
        match (significant.next(), significant.next()) {
            (None, _) => Some(Term::constant(0.0)),
            (Some((0, c)), None) => Some(Term::constant(c)),
            (Some((e, c)), None) => Some(Term::new(
                c,
                e,
                Some(self.variable.clone().unwrap_or_else(|| "x".to_string())),
            )),
            (Some(_), Some(_)) => None,
        }
    }

    /// Value of the polynomial at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        self.iter().map(|(e, c)| c * x.powi(e)).sum()
    }

    /// Render as an equation the parser accepts, highest exponent first,
    /// e.g. `1x^2 - 4 = 0`.
    pub fn to_equation_string(&self) -> String {
        let variable = self.variable.as_deref().unwrap_or("x");
        let mut out = String::new();

        for (exponent, coefficient) in self.terms.iter().rev() {
            let magnitude = coefficient.abs();
            if out.is_empty() {
                if coefficient.is_sign_negative() {
                    out.push('-');
                }
            } else if coefficient.is_sign_negative() {
                out.push_str(" - ");
            } else {
                out.push_str(" + ");
            }
            match exponent {
                0 => out.push_str(&magnitude.to_string()),
                1 => out.push_str(&format!("{magnitude}{variable}")),
                e => out.push_str(&format!("{magnitude}{variable}^{e}")),
            }
        }

        if out.is_empty() {
            out.push('0');
        }
        out.push_str(" = 0");
        out
    }
}

impl FromIterator<(i32, f64)> for Polynomial {
    fn from_iter<I: IntoIterator<Item = (i32, f64)>>(iter: I) -> Self {
        let mut polynomial = Polynomial::new();
        for (exponent, coefficient) in iter {
            polynomial.add(exponent, coefficient);
        }
        polynomial
    }
}

/// One `exponent: coefficient` line per entry, ascending
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (exponent, coefficient) in &self.terms {
            writeln!(f, "{exponent}: {coefficient}")?;
        }
        Ok(())
    }
}
