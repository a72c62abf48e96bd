//! Tunable constants for the ball widget
//!
//! Defaults for everything `WidgetSettings` can override live here.

use bevy::prelude::*;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Ball radius in container pixels
pub const BALL_RADIUS: f32 = 40.0;

// =============================================================================
// FALL ANIMATION
// =============================================================================

pub const FALL_TICK_MS: u64 = 30; // Delay between fall steps
pub const FALL_SPEED_STEP: i32 = 2; // Speed gained per tick (px/tick)

/// Name given to each fall worker thread
pub const FALL_THREAD_NAME: &str = "ball-fall";

// =============================================================================
// COLORS
// =============================================================================

pub const DEFAULT_BACKGROUND_HEX: &str = "#ffff00";
pub const DEFAULT_BALL_HEX: &str = "#999999";

pub const DEFAULT_BACKGROUND_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
pub const DEFAULT_BALL_COLOR: Color = Color::srgb(0.6, 0.6, 0.6);

pub const BALL_STROKE_WIDTH: f32 = 5.0;

// =============================================================================
// DESKTOP HOST
// =============================================================================

pub const DEFAULT_WINDOW_WIDTH: u32 = 480;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 854;
pub const WINDOW_TITLE: &str = "Ball and Ball";

/// Z layer for the ball mesh
pub const BALL_Z: f32 = 1.0;
