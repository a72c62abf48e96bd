//! Ballandball - a draggable ball that falls back to the floor when released
//!
//! The widget core (`ball`, `render::Canvas`, `host`) is host-agnostic; the
//! Bevy plugins in `plugin` host it in a window or headless app.

pub mod ball;
pub mod constants;
pub mod host;
pub mod input;
pub mod plugin;
pub mod render;
pub mod settings;
pub mod simulation;
pub mod testing;

// Re-export commonly used types for convenience
pub use ball::{
    BallWidget, Container, FallParams, FallReport, PointerOutcome, ReleaseEdge, SharedCenter,
    SleepTicker, Ticker, WaitInterrupted, clamp_release, run_fall, spawn_fall,
};
pub use host::{DisplayHost, FixedHost, PointerEvent, PointerPhase, WindowHost};
pub use plugin::{BallDisplayPlugin, BallWidgetPlugin};
pub use render::{BallPaint, Canvas, DrawCommand, FrameCommands};
pub use settings::{SETTINGS_FILE, WidgetSettings};
pub use simulation::HeadlessAppBuilder;
