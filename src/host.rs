//! Display host boundary
//!
//! The widget only needs two things from whatever hosts it: the container
//! size (asked once) and a stream of pointer events in container-local
//! pixels (origin top-left, y grows downward).

use bevy::prelude::*;
use serde::Deserialize;

/// Anything that can report the pixel size of the widget's container
pub trait DisplayHost {
    /// Container (width, height) in pixels
    fn container_size(&self) -> (i32, i32);
}

/// Host with a fixed size, for headless apps and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHost {
    pub width: i32,
    pub height: i32,
}

impl FixedHost {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl DisplayHost for FixedHost {
    fn container_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

/// Bevy window acting as the container
pub struct WindowHost<'a>(pub &'a Window);

impl DisplayHost for WindowHost<'_> {
    fn container_size(&self) -> (i32, i32) {
        (self.0.width() as i32, self.0.height() as i32)
    }
}

/// Pointer gesture phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One pointer event in container-local pixel coordinates
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Down,
            x,
            y,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Move,
            x,
            y,
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Up,
            x,
            y,
        }
    }
}
