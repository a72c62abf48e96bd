//! Assertion checking for scenario expectations

use super::parser::StateAssertion;
use crate::ball::BallWidget;

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

impl std::error::Error for AssertionError {}

/// Widget state captured for checking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetState {
    pub x: i32,
    pub y: i32,
    pub dragging: bool,
    pub active_falls: usize,
}

impl WidgetState {
    pub fn capture(widget: &BallWidget) -> Self {
        let (x, y) = widget.center();
        Self {
            x,
            y,
            dragging: widget.is_dragging(),
            active_falls: widget.shared_center().active_falls(),
        }
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against captured widget state
pub fn check_state(assertion: &StateAssertion, state: &WidgetState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'ball.property = value' or 'ball.property > value'".to_string(),
            actual: check.clone(),
        })?;

        match path {
            "ball.x" => check_number(path, state.x as f64, operator, expected_value)?,
            "ball.y" => check_number(path, state.y as f64, operator, expected_value)?,
            "falls.active" => {
                check_number(path, state.active_falls as f64, operator, expected_value)?
            }
            "ball.dragging" => {
                let expected = match expected_value {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(AssertionError {
                            message: format!("Invalid value for {}", path),
                            expected: "true or false".to_string(),
                            actual: other.to_string(),
                        });
                    }
                };
                let pass = match operator {
                    "=" => state.dragging == expected,
                    "!=" => state.dragging != expected,
                    _ => false,
                };
                if !pass {
                    return Err(AssertionError {
                        message: format!("Check failed: {}", check),
                        expected: format!("{} {} {}", path, operator, expected_value),
                        actual: state.dragging.to_string(),
                    });
                }
            }
            _ => {
                return Err(AssertionError {
                    message: format!("Unknown check path: {}", path),
                    expected: "ball.x, ball.y, ball.dragging or falls.active".to_string(),
                    actual: path.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Numeric comparison with operator; positions are whole pixels so `=` is exact
fn check_number(path: &str, actual: f64, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f64 = expected_str.parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => actual == value,
        "!=" => actual != value,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: actual.to_string(),
        });
    }

    Ok(())
}
