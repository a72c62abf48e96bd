//! Input module - turns mouse and touch input into widget pointer events

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::host::PointerEvent;

/// Which device owns the current gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch(u64),
}

/// Tracks the single active gesture so one stream of Down/Move/Up comes out
#[derive(Resource, Default, Debug)]
pub struct PointerTracker {
    pub source: Option<PointerSource>,
    /// Last reported position, for dropping duplicate moves
    pub last: Option<Vec2>,
}

impl PointerTracker {
    /// Begin a gesture. Ignored while another gesture is active.
    pub fn press(&mut self, source: PointerSource, pos: Vec2) -> Option<PointerEvent> {
        if self.source.is_some() {
            return None;
        }
        self.source = Some(source);
        self.last = Some(pos);
        Some(PointerEvent::down(pos.x, pos.y))
    }

    /// Report a move if the gesture is owned by `source` and the position changed
    pub fn drag(&mut self, source: PointerSource, pos: Vec2) -> Option<PointerEvent> {
        if self.source != Some(source) || self.last == Some(pos) {
            return None;
        }
        self.last = Some(pos);
        Some(PointerEvent::moved(pos.x, pos.y))
    }

    /// End the gesture. Without a position (cursor left the window, touch
    /// cancelled) the last known one is used.
    pub fn release(&mut self, source: PointerSource, pos: Option<Vec2>) -> Option<PointerEvent> {
        if self.source != Some(source) {
            return None;
        }
        let pos = pos.or(self.last)?;
        self.source = None;
        self.last = None;
        Some(PointerEvent::up(pos.x, pos.y))
    }
}

/// Emit pointer events from the first touch, or the left mouse button.
/// Window coordinates are already container-local (top-left origin).
pub fn capture_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut tracker: ResMut<PointerTracker>,
    mut events: MessageWriter<PointerEvent>,
) {
    // Touch
    for touch in touches.iter_just_pressed() {
        if let Some(ev) = tracker.press(PointerSource::Touch(touch.id()), touch.position()) {
            events.write(ev);
        }
    }
    if let Some(PointerSource::Touch(id)) = tracker.source {
        let source = PointerSource::Touch(id);
        if let Some(touch) = touches.get_pressed(id) {
            if let Some(ev) = tracker.drag(source, touch.position()) {
                events.write(ev);
            }
        }
        let ended = touches
            .iter_just_released()
            .chain(touches.iter_just_canceled())
            .find(|t| t.id() == id)
            .map(|t| t.position());
        if let Some(pos) = ended {
            if let Some(ev) = tracker.release(source, Some(pos)) {
                events.write(ev);
            }
        }
    }

    // Mouse
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = window.cursor_position();

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(ev) = cursor.and_then(|pos| tracker.press(PointerSource::Mouse, pos)) {
            events.write(ev);
        }
    }
    if buttons.pressed(MouseButton::Left) {
        if let Some(ev) = cursor.and_then(|pos| tracker.drag(PointerSource::Mouse, pos)) {
            events.write(ev);
        }
    }
    if buttons.just_released(MouseButton::Left) {
        if let Some(ev) = tracker.release(PointerSource::Mouse, cursor) {
            events.write(ev);
        }
    }
}
