//! Polynomial equation engine
//!
//! Parses a single-variable equation such as `3x^2 + 2x - 5 = 0`, collapses it
//! into a canonical polynomial and solves it in closed form up to degree 2.
//!
//! # Architecture Overview
//!
//! ```text
//! Equation String
//!      |
//!   Lexer -> Tokens
//!      |
//!   Parser -> Expression tree
//!      |
//!   Collapser -> Polynomial (exponent -> coefficient)
//!      |
//!   Solver -> Solution
//! ```
//!
//! # Example
//!
//! ```
//! use polyroot_equation::{Engine, Solution};
//!
//! let report = Engine::default().solve("x^2 - 4 = 0").unwrap();
//! assert_eq!(report.solution, Solution::Pair { first: 2.0, second: -2.0 });
//! ```

pub mod ast;
pub mod collapse;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod polynomial;
pub mod solver;
pub mod token;

// Re-export main types
pub use ast::{Node, Operator, Parts, Term};
pub use collapse::Collapser;
pub use engine::{Engine, EngineConfig, Report};
pub use error::{Error, Result};
pub use polynomial::Polynomial;
pub use solver::{Solution, Solver};
