//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::host::{PointerEvent, PointerPhase};

/// Complete scenario definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Container and widget configuration
#[derive(Debug, Deserialize)]
pub struct TestSetup {
    pub width: i32,
    pub height: i32,
    /// Fall tick override in milliseconds
    pub tick_ms: Option<u64>,
    pub radius: Option<f32>,
}

/// Pointer event delivered during a given frame (0-based)
#[derive(Debug, Clone, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
}

impl FrameInput {
    pub fn event(&self) -> PointerEvent {
        PointerEvent {
            phase: self.phase,
            x: self.x,
            y: self.y,
        }
    }
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    /// State assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// State assertion after a number of completed frames
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    /// Wait for running fall workers before checking
    #[serde(default)]
    pub settle: bool,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    parse_test_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Parse a test definition from TOML text
pub fn parse_test_str(content: &str) -> Result<TestDefinition, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Test"
[setup]
width = 400
height = 800
tick_ms = 0

[[input]]
frame = 0
phase = "down"
x = 200.0
y = 760.0

[[input]]
frame = 1
phase = "up"
x = 200.0
y = 760.0

[[expect.state]]
after_frame = 2
settle = true
checks = ["ball.y = 760"]
"#;
        let def = parse_test_str(toml).unwrap();
        assert_eq!(def.name, "Test");
        assert_eq!(def.setup.width, 400);
        assert_eq!(def.setup.tick_ms, Some(0));
        assert_eq!(def.input.len(), 2);
        assert_eq!(def.input[1].event(), PointerEvent::up(200.0, 760.0));
        assert!(def.expect.state[0].settle);
    }

    #[test]
    fn test_parse_rejects_unknown_phase() {
        let toml = r#"
name = "Bad"
[setup]
width = 1
height = 1
[[input]]
frame = 0
phase = "hover"
x = 0.0
y = 0.0
"#;
        assert!(parse_test_str(toml).is_err());
    }
}
