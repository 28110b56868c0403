//! End-to-end tests: equation text to solution

use polyroot_equation::{Engine, EngineConfig, Error, Solution};

mod test_support;
use test_support::{assert_close, engine, poly};

#[test]
fn test_constant_equation() {
    let report = engine().solve("3 + 2").unwrap();
    assert_eq!(report.polynomial, poly(&[(0, 5.0)]));
    assert_eq!(report.degree, 0);
    assert_eq!(report.solution, Solution::Contradiction { constant: 5.0 });
}

#[test]
fn test_identity() {
    let report = engine().solve("2x + 1 = 1 + 2x").unwrap();
    assert_eq!(report.solution, Solution::Identity);
}

#[test]
fn test_linear_equation() {
    let report = engine().solve("x + 2 = 0").unwrap();
    assert_eq!(report.polynomial.coefficient(0), 2.0);
    assert_eq!(report.polynomial.coefficient(1), 1.0);
    assert_eq!(report.solution, Solution::Single { root: -2.0 });
}

#[test]
fn test_linear_both_sides() {
    let report = engine().solve("3x - 7 = x + 1").unwrap();
    assert_eq!(report.solution, Solution::Single { root: 4.0 });
}

#[test]
fn test_quadratic_equation() {
    let report = engine().solve("x^2 - 4 = 0").unwrap();
    assert_eq!(report.polynomial.coefficient(0), -4.0);
    assert_eq!(report.polynomial.coefficient(2), 1.0);
    assert_eq!(report.polynomial.coefficient(1), 0.0);
    assert_eq!(
        report.solution,
        Solution::Pair {
            first: 2.0,
            second: -2.0
        }
    );
}

#[test]
fn test_quadratic_with_implicit_multiplication() {
    let report = engine().solve("3x^2 + 2x - 5 = 0").unwrap();
    let roots = report.solution.roots();
    assert_eq!(roots.len(), 2);
    assert_close(roots[0], 1.0);
    assert_close(roots[1], -5.0 / 3.0);
}

#[test]
fn test_double_root() {
    let report = engine().solve("x^2 + 2x + 1 = 0").unwrap();
    assert_eq!(
        report.solution,
        Solution::Pair {
            first: -1.0,
            second: -1.0
        }
    );
}

#[test]
fn test_no_real_root() {
    assert_eq!(
        engine().solve("x^2 + 1 = 0"),
        Err(Error::NoRealRoot { discriminant: -4.0 })
    );
}

#[test]
fn test_divide_by_zero() {
    assert_eq!(engine().solve("x / 0"), Err(Error::DivideByZero));
    assert_eq!(engine().collapse("x / 0"), Err(Error::DivideByZero));
}

#[test]
fn test_degree_too_high() {
    assert_eq!(engine().solve("x^3 = 0"), Err(Error::DegreeTooHigh(3)));
}

#[test]
fn test_degree_too_low() {
    assert_eq!(engine().solve("1 / x = 2"), Err(Error::DegreeTooLow(-1)));
    assert_eq!(engine().solve("x^-2 + x = 0"), Err(Error::DegreeTooLow(-2)));
}

#[test]
fn test_cancelled_high_degree() {
    let report = engine().solve("x^3 + x = x^3 + 2").unwrap();
    assert_eq!(report.degree, 1);
    assert_eq!(report.solution, Solution::Single { root: 2.0 });
}

#[test]
fn test_unmatched_parenthesis() {
    assert!(matches!(
        engine().solve("(x + 1"),
        Err(Error::SyntaxError(_))
    ));
}

#[test]
fn test_unsupported_operations() {
    assert!(matches!(
        engine().solve("x % 2 = 1"),
        Err(Error::UnsupportedOperation(_))
    ));
    assert!(matches!(
        engine().solve("2^x = 4"),
        Err(Error::UnsupportedOperation(_))
    ));
}

#[test]
fn test_tolerance_is_configurable() {
    let strict = Engine::new(EngineConfig {
        tolerance: 0.0,
        ..EngineConfig::default()
    });
    let report = strict.solve("0.000000000001x + 1 = 1").unwrap();
    assert_eq!(report.degree, 1);

    let report = engine().solve("0.000000000001x + 1 = 1").unwrap();
    assert_eq!(report.solution, Solution::Identity);
}

#[test]
fn test_report_serializes() {
    let report = engine().solve("x + 2 = 0").unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["degree"], 1);
    assert_eq!(json["solution"]["kind"], "single");
    assert_eq!(json["solution"]["root"], -2.0);
    assert_eq!(json["polynomial"]["terms"]["1"], 1.0);
}

#[test]
fn test_long_flat_sum() {
    let report = engine()
        .solve(&format!("{}x = 0", "1 + ".repeat(100_000)))
        .unwrap();
    assert_eq!(report.degree, 1);
    assert_eq!(report.solution, Solution::Single { root: -100_000.0 });

    let report = engine()
        .solve(&format!("{}x^2 = 4", "x^2 - x^2 + ".repeat(50_000)))
        .unwrap();
    assert_eq!(
        report.solution,
        Solution::Pair {
            first: 2.0,
            second: -2.0
        }
    );
}

#[test]
fn test_out_of_range_literal() {
    let nines = "9".repeat(400);
    assert_eq!(
        engine().solve(&format!("{nines} - {nines} = 1")),
        Err(Error::LexError {
            character: '9',
            position: 0
        })
    );
}
