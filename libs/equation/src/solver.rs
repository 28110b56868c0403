//! Closed-form solving of canonical polynomials up to degree 2

use crate::collapse::DEFAULT_TOLERANCE;
use crate::error::{Error, Result};
use crate::polynomial::Polynomial;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Solutions of `p(x) = 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Solution {
    /// Every real number satisfies the equation
    Identity,
    /// The equation reduced to `constant = 0` with a non-zero constant
    Contradiction { constant: f64 },
    /// Exactly one root
    Single { root: f64 },
    /// Two real roots, equal when the discriminant is zero
    Pair { first: f64, second: f64 },
}

impl Solution {
    /// Human-readable form using `variable` as the unknown
    pub fn render(&self, variable: &str) -> String {
        match self {
            Solution::Identity => format!("every real {variable} is a solution"),
            Solution::Contradiction { constant } => {
                format!("no solution ({constant} = 0 is false)")
            }
            Solution::Single { root } => format!("{variable} = {root}"),
            Solution::Pair { first, second } => format!("{variable} = {first}, {second}"),
        }
    }

    /// Roots in the order they were computed
    pub fn roots(&self) -> Vec<f64> {
        match self {
            Solution::Identity | Solution::Contradiction { .. } => Vec::new(),
            Solution::Single { root } => vec![*root],
            Solution::Pair { first, second } => vec![*first, *second],
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("x"))
    }
}

/// Validates degree bounds and dispatches to the closed-form solvers
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl Solver {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Degree of `polynomial`, checked to lie within `0..=2`
    pub fn validate(&self, polynomial: &Polynomial) -> Result<i32> {
        let degree = polynomial.degree(self.tolerance).unwrap_or(0);
        if degree > 2 {
            return Err(Error::DegreeTooHigh(degree));
        }
        if let Some(lowest) = polynomial.lowest_degree(self.tolerance) {
            if lowest < 0 {
                return Err(Error::DegreeTooLow(lowest));
            }
        }
        Ok(degree)
    }

    pub fn solve(&self, polynomial: &Polynomial) -> Result<Solution> {
        self.solve_with_degree(polynomial).map(|(_, solution)| solution)
    }

    /// Solve `polynomial`, also returning the degree it was validated at
    pub fn solve_with_degree(&self, polynomial: &Polynomial) -> Result<(i32, Solution)> {
        let degree = self.validate(polynomial)?;
        let a = polynomial.coefficient(2);
        let b = polynomial.coefficient(1);
        let c = polynomial.coefficient(0);

        let solution = match degree {
            2 => solve_quadratic(a, b, c, self.tolerance)?,
            1 => solve_linear(b, c),
            _ => self.solve_constant(c),
        };
        Ok((degree, solution))
    }

    fn solve_constant(&self, constant: f64) -> Solution {
        if constant.abs() <= self.tolerance {
            Solution::Identity
        } else {
            Solution::Contradiction { constant }
        }
    }
}

/// Root of `a·x + b = 0`.
///
/// With `a == 0` this answers `x = 0` whatever `b` is; callers that need to
/// tell identities from contradictions must check `a` themselves.
pub fn solve_linear(a: f64, b: f64) -> Solution {
    if a == 0.0 {
        return Solution::Single { root: 0.0 };
    }
    Solution::Single {
        root: positive_zero(-b / a),
    }
}

/// Roots of `a·x² + b·x + c = 0` with `a != 0`.
///
/// A discriminant within `tolerance` of zero is treated as zero.
pub fn solve_quadratic(a: f64, b: f64, c: f64, tolerance: f64) -> Result<Solution> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < -tolerance {
        return Err(Error::NoRealRoot { discriminant });
    }
    let sqrt = discriminant.max(0.0).sqrt();
    Ok(Solution::Pair {
        first: positive_zero((-b + sqrt) / (2.0 * a)),
        second: positive_zero((-b - sqrt) / (2.0 * a)),
    })
}

/// Maps `-0.0` to `0.0` so roots never render as `-0`
fn positive_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
