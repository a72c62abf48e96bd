//! Runs a directory of scenarios and collects their outcomes

use std::fmt;
use std::path::Path;

use super::discover_tests;
use super::parser::parse_test_file;
use super::runner::{TestResult, run_test};

/// One scenario and how it went
#[derive(Debug)]
pub struct ScenarioOutcome {
    /// Directory relative to the scenario root, e.g. `release`
    pub category: String,
    /// File stem, e.g. `left_edge`
    pub name: String,
    pub description: Option<String>,
    pub result: TestResult,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        matches!(self.result, TestResult::Pass { .. })
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: ", self.category, self.name)?;
        match &self.result {
            TestResult::Pass { frames } => write!(f, "pass after {} frames", frames),
            TestResult::Fail {
                error,
                frame,
                state,
            } => write!(
                f,
                "{} after frame {} (ball at ({}, {}), dragging {}, {} active falls)",
                error.message, frame, state.x, state.y, state.dragging, state.active_falls
            ),
            TestResult::Error { message } => write!(f, "error: {}", message),
        }
    }
}

/// Outcomes of a scenario run, in discovery order
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, TestResult::Fail { .. }))
            .count()
    }

    pub fn errors(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, TestResult::Error { .. }))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

/// Parse and run every scenario under `base` whose relative path contains `filter`.
/// A file that fails to parse is reported as an error outcome.
pub fn run_all(base: &Path, filter: Option<&str>) -> SuiteReport {
    let outcomes = discover_tests(base, filter)
        .into_iter()
        .map(|path| {
            let rel = path.strip_prefix(base).unwrap_or(&path);
            let category = rel
                .parent()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default();
            let name = rel
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            let (description, result) = match parse_test_file(&path) {
                Ok(def) => (def.description.clone(), run_test(&def)),
                Err(message) => (None, TestResult::Error { message }),
            };

            ScenarioOutcome {
                category,
                name,
                description,
                result,
            }
        })
        .collect();

    SuiteReport { outcomes }
}
