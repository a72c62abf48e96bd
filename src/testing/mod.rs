//! Scenario testing for the ball widget
//!
//! Runs scripted pointer gestures against a headless app and checks the
//! widget's state at chosen frames.

pub mod assertions;
pub mod input;
pub mod parser;
pub mod runner;
pub mod suite;

pub use assertions::{AssertionError, WidgetState, check_state};
pub use input::ScriptedPointer;
pub use parser::{FrameInput, StateAssertion, TestDefinition, TestExpectations, TestSetup};
pub use runner::{TestResult, run_test};
pub use suite::{ScenarioOutcome, SuiteReport, run_all};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";

use std::fs;
use std::path::{Path, PathBuf};

/// Find `.toml` scenarios under `base`, sorted, optionally keeping only
/// paths (relative to `base`) containing `filter`
pub fn discover_tests(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut tests = Vec::new();
    discover_tests_recursive(base, base, filter, &mut tests);
    tests.sort();
    tests
}

fn discover_tests_recursive(
    base: &Path,
    current: &Path,
    filter: Option<&str>,
    tests: &mut Vec<PathBuf>,
) {
    let entries = match fs::read_dir(current) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            discover_tests_recursive(base, &path, filter, tests);
        } else if path.extension().is_some_and(|e| e == "toml") {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            tests.push(path);
        }
    }
}
