//! Equation engine
//!
//! Orchestrates the pipeline: Lex → Parse → Collapse → Solve

use crate::ast::Node;
use crate::collapse::{Collapser, DEFAULT_TOLERANCE};
use crate::error::Result;
use crate::lexer::{Lexer, DEFAULT_VARIABLE};
use crate::parser::{Parser, MAX_RECURSION_DEPTH};
use crate::polynomial::Polynomial;
use crate::solver::{Solution, Solver};
use crate::token::Token;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Mutex;

const DEFAULT_CACHE_CAPACITY: usize = 1000;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Symbol the lexer accepts as the unknown.
    pub variable: char,
    /// Coefficients and discriminants within this distance of zero count as zero.
    pub tolerance: f64,
    /// Maximum nesting of parentheses and signs accepted by the parser.
    pub max_depth: usize,
    /// Number of collapsed polynomials kept in the cache. `0` disables caching.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            variable: DEFAULT_VARIABLE,
            tolerance: DEFAULT_TOLERANCE,
            max_depth: MAX_RECURSION_DEPTH,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Result of solving one equation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub equation: String,
    pub polynomial: Polynomial,
    pub degree: i32,
    pub solution: Solution,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.polynomial)?;
        let variable = self.polynomial.variable().unwrap_or("x");
        write!(f, "{}", self.solution.render(variable))
    }
}

/// Main equation engine
///
/// Collapsed polynomials are cached by input text, so solving the same
/// equation twice skips lexing, parsing and collapsing.
pub struct Engine {
    config: EngineConfig,
    cache: Option<Mutex<LruCache<String, Polynomial>>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let cache = NonZeroUsize::new(config.cache_capacity).map(|n| Mutex::new(LruCache::new(n)));
        Self { config, cache }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn lexer(&self, input: &str) -> Lexer {
        Lexer::with_variable(input, self.config.variable)
    }

    /// All tokens of `input`, excluding the trailing `Eof`
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>> {
        self.lexer(input).collect()
    }

    /// Parse `input` into an expression tree
    pub fn parse(&self, input: &str) -> Result<Node> {
        let tree = Parser::new(self.lexer(input))
            .with_max_depth(self.config.max_depth)
            .parse()?;
        tracing::debug!(
            nodes = tree.size(),
            depth = tree.depth(),
            "Parsed equation"
        );
        Ok(tree)
    }

    /// Parse and collapse `input` into its canonical polynomial
    pub fn collapse(&self, input: &str) -> Result<Polynomial> {
        if let Some(polynomial) = self.cached(input) {
            tracing::trace!(equation = input, "Polynomial cache hit");
            return Ok(polynomial);
        }

        let tree = self.parse(input)?;
        let polynomial = Collapser::new(self.config.tolerance).collapse(tree)?;
        tracing::debug!(terms = polynomial.len(), "Collapsed equation");

        if let Some(cache) = &self.cache {
            if let Ok(mut cache) = cache.lock() {
                cache.put(input.to_string(), polynomial.clone());
            }
        }
        Ok(polynomial)
    }

    fn cached(&self, input: &str) -> Option<Polynomial> {
        let cache = self.cache.as_ref()?;
        let mut cache = cache.lock().ok()?;
        cache.get(input).cloned()
    }

    /// Run the whole pipeline on `input`
    pub fn solve(&self, input: &str) -> Result<Report> {
        let polynomial = self.collapse(input)?;
        let (degree, solution) = Solver::new(self.config.tolerance)
            .solve_with_degree(&polynomial)
            .inspect_err(|e| {
                tracing::debug!(error = %e, "Equation rejected");
            })?;
        tracing::debug!(degree, solution = %solution, "Solved equation");

        Ok(Report {
            equation: input.to_string(),
            polynomial,
            degree,
            solution,
        })
    }

    /// Drop every cached polynomial
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            if let Ok(mut cache) = cache.lock() {
                cache.clear();
            }
        }
    }

    /// Number of cached polynomials
    pub fn cache_len(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|cache| cache.lock().ok().map(|c| c.len()))
            .unwrap_or(0)
    }
}
