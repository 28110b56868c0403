//! polyroot - solve polynomial equations of degree 0, 1 or 2
//!
//! Usage:
//!   polyroot "3x^2 + 2x - 5 = 0"
//!   polyroot --json --variable y "2y = 8"

mod logging;

use anyhow::Context;
use clap::Parser;
use polyroot_equation::lexer::is_variable_symbol;
use polyroot_equation::{Engine, EngineConfig, Report};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "polyroot", version)]
#[command(about = "Solve a polynomial equation of degree 0, 1 or 2")]
struct Args {
    /// The equation; several words are joined with spaces
    #[arg(required = true)]
    equation: Vec<String>,

    /// Symbol used as the unknown
    #[arg(long, env = "POLYROOT_VARIABLE", default_value_t = 'x', value_parser = parse_variable)]
    variable: char,

    /// Coefficients within this distance of zero count as zero
    #[arg(long, env = "POLYROOT_TOLERANCE", default_value_t = 1e-9)]
    tolerance: f64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print the parsed expression tree before solving
    #[arg(long)]
    tree: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parser for the variable symbol: a single alphabetic character
fn parse_variable(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if is_variable_symbol(c) => Ok(c),
        (Some(c), None) => Err(format!(
            "Invalid variable '{c}'. Expected a letter, not a digit, '.', space or operator"
        )),
        _ => Err(format!("Invalid variable '{s}'. Expected a single letter")),
    }
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            variable: self.variable,
            tolerance: self.tolerance,
            cache_capacity: 0,
            ..EngineConfig::default()
        }
    }
}

fn render(report: &Report, json: bool) -> anyhow::Result<String> {
    if json {
        serde_json::to_string_pretty(report).context("Failed to serialize report")
    } else {
        Ok(report.to_string())
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let equation = args.equation.join(" ");
    let engine = Engine::new(args.engine_config());
    tracing::info!(equation = %equation, variable = %args.variable, "Solving");

    if args.tree {
        let tree = engine.parse(&equation)?;
        println!("{tree}");
    }

    let report = engine.solve(&equation)?;
    println!("{}", render(&report, args.json)?);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(args.verbose) {
        eprintln!("warning: {e:#}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
