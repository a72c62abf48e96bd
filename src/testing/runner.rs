//! Scenario execution engine

use bevy::prelude::*;
use std::time::Duration;

use super::assertions::{AssertionError, WidgetState, check_state};
use super::input::{ScriptedPointer, inject_pointer_events};
use super::parser::TestDefinition;
use crate::ball::{BallWidget, apply_pointer_events};
use crate::simulation::HeadlessAppBuilder;

/// How long a settling check waits for fall workers
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of running a scenario
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    /// A check failed; `state` is the widget as the check saw it
    Fail { error: AssertionError, frame: u64, state: WidgetState },
    Error { message: String },
}

/// Run one scenario headlessly.
///
/// Inputs for frame `n` are delivered during the `n`th update (0-based);
/// an assertion with `after_frame = n` runs once `n` updates have completed.
pub fn run_test(test: &TestDefinition) -> TestResult {
    let mut builder = HeadlessAppBuilder::new(test.setup.width, test.setup.height);
    if let Some(tick_ms) = test.setup.tick_ms {
        builder = builder.with_tick_ms(tick_ms);
    }
    if let Some(radius) = test.setup.radius {
        builder = builder.with_radius(radius);
    }
    let mut app = builder.build();

    let script = ScriptedPointer::from_inputs(&test.input);
    let input_frames = if test.input.is_empty() {
        0
    } else {
        script.max_frame + 1
    };
    let assertion_frames = test
        .expect
        .state
        .iter()
        .map(|s| s.after_frame)
        .max()
        .unwrap_or(0);
    let total_frames = input_frames.max(assertion_frames);

    app.insert_resource(script);
    app.add_systems(Update, inject_pointer_events.before(apply_pointer_events));

    // Assertions due before any update runs
    if let Err(result) = run_checks(&app, test, 0) {
        return result;
    }

    for frame in 1..=total_frames {
        app.update();
        if let Err(result) = run_checks(&app, test, frame) {
            return result;
        }
    }

    TestResult::Pass {
        frames: total_frames,
    }
}

/// Run every assertion scheduled after `frame` completed updates
fn run_checks(app: &App, test: &TestDefinition, frame: u64) -> Result<(), TestResult> {
    let widget = app.world().resource::<BallWidget>();

    for assertion in test.expect.state.iter().filter(|a| a.after_frame == frame) {
        if assertion.settle && !widget.wait_until_settled(SETTLE_TIMEOUT) {
            return Err(TestResult::Error {
                message: format!(
                    "Fall workers still running after {:?} (frame {})",
                    SETTLE_TIMEOUT, frame
                ),
            });
        }
        let state = WidgetState::capture(widget);
        check_state(assertion, &state).map_err(|error| TestResult::Fail { error, frame, state })?;
    }

    Ok(())
}
