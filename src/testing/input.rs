//! Scripted pointer injection for scenarios

use bevy::prelude::*;
use std::collections::HashMap;

use super::parser::FrameInput;
use crate::host::PointerEvent;

/// Resource holding scripted pointer events for a scenario
#[derive(Resource, Default)]
pub struct ScriptedPointer {
    /// Map of frame -> events, in file order
    pub frames: HashMap<u64, Vec<PointerEvent>>,
    /// Current frame number
    pub current_frame: u64,
    /// Last frame that has input
    pub max_frame: u64,
}

impl ScriptedPointer {
    /// Create from parsed frame inputs
    pub fn from_inputs(inputs: &[FrameInput]) -> Self {
        let mut frames: HashMap<u64, Vec<PointerEvent>> = HashMap::new();
        let mut max_frame = 0u64;

        for fi in inputs {
            max_frame = max_frame.max(fi.frame);
            frames.entry(fi.frame).or_default().push(fi.event());
        }

        Self {
            frames,
            current_frame: 0,
            max_frame,
        }
    }

    /// Events for the current frame, then advance
    pub fn advance_frame(&mut self) -> Vec<PointerEvent> {
        let events = self.frames.remove(&self.current_frame).unwrap_or_default();
        self.current_frame += 1;
        events
    }
}

/// Write this frame's scripted events; runs before the widget reads them
pub fn inject_pointer_events(
    mut script: ResMut<ScriptedPointer>,
    mut events: MessageWriter<PointerEvent>,
) {
    for event in script.advance_frame() {
        events.write(event);
    }
}
