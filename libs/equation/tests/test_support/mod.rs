#![allow(dead_code)]

use polyroot_equation::{Engine, Polynomial};
use std::sync::OnceLock;

static ENGINE: OnceLock<Engine> = OnceLock::new();

pub fn engine() -> &'static Engine {
    ENGINE.get_or_init(Engine::default)
}

pub fn poly(entries: &[(i32, f64)]) -> Polynomial {
    entries.iter().copied().collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
