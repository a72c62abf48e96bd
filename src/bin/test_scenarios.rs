//! Runs the TOML scenarios from the command line
//!
//!   cargo run --bin test-scenarios                  # everything
//!   cargo run --bin test-scenarios -- release/      # one directory
//!   cargo run --bin test-scenarios -- -v fall/      # print descriptions of failures

use std::path::Path;
use std::process::ExitCode;

use ballandball::testing::{SCENARIOS_DIR, ScenarioOutcome, TestResult, run_all};

fn main() -> ExitCode {
    let mut verbose = false;
    let mut filter = None;
    for arg in std::env::args().skip(1) {
        if arg == "-v" || arg == "--verbose" {
            verbose = true;
        } else if arg.starts_with('-') {
            eprintln!("ignoring unknown flag {}", arg);
        } else {
            filter = Some(arg);
        }
    }

    let base = Path::new(SCENARIOS_DIR);
    let report = run_all(base, filter.as_deref());
    if report.outcomes.is_empty() {
        eprintln!(
            "no scenarios under {} match {}",
            base.display(),
            filter.as_deref().unwrap_or("*")
        );
        return ExitCode::FAILURE;
    }

    let mut category = None;
    for outcome in &report.outcomes {
        if category != Some(&outcome.category) {
            println!("{}/", outcome.category);
            category = Some(&outcome.category);
        }
        print_outcome(outcome, verbose);
    }

    println!(
        "\n{} passed, {} failed, {} errors",
        report.passed(),
        report.failed(),
        report.errors()
    );

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_outcome(outcome: &ScenarioOutcome, verbose: bool) {
    match &outcome.result {
        TestResult::Pass { frames } => println!("  ok    {} ({} frames)", outcome.name, frames),
        TestResult::Fail { error, .. } => {
            println!("  FAIL  {}", outcome);
            if verbose {
                if let Some(d) = &outcome.description {
                    println!("        {}", d.trim());
                }
                println!("        expected {}, got {}", error.expected, error.actual);
            }
        }
        TestResult::Error { message } => println!("  ERROR {} ({})", outcome.name, message),
    }
}
