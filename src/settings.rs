//! Persistent widget settings
//!
//! Loads and saves the ball's tunables (radius, fall cadence, colors,
//! desktop window size) to/from a widget_settings.json file in the
//! config directory.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants::*;

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/widget_settings.json";

fn default_radius() -> f32 {
    BALL_RADIUS
}
fn default_tick_ms() -> u64 {
    FALL_TICK_MS
}
fn default_speed_step() -> i32 {
    FALL_SPEED_STEP
}
fn default_background() -> String {
    DEFAULT_BACKGROUND_HEX.to_string()
}
fn default_ball_color() -> String {
    DEFAULT_BALL_HEX.to_string()
}
fn default_stroke_width() -> f32 {
    BALL_STROKE_WIDTH
}
fn default_window_width() -> u32 {
    DEFAULT_WINDOW_WIDTH
}
fn default_window_height() -> u32 {
    DEFAULT_WINDOW_HEIGHT
}

/// Widget tunables that survive between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct WidgetSettings {
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Fall task tick in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Speed gained per fall tick
    #[serde(default = "default_speed_step")]
    pub speed_step: i32,
    /// Background clear color, hex
    #[serde(default = "default_background")]
    pub background: String,
    /// Ball paint color, hex
    #[serde(default = "default_ball_color")]
    pub ball_color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            tick_ms: default_tick_ms(),
            speed_step: default_speed_step(),
            background: default_background(),
            ball_color: default_ball_color(),
            stroke_width: default_stroke_width(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl WidgetSettings {
    /// Load settings from the default file, or return defaults if it doesn't exist
    pub fn load() -> Self {
        Self::load_from(SETTINGS_FILE)
    }

    /// Load settings from `path`, falling back to defaults on any problem
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    Self::validated(settings)
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace values the fall cannot terminate with
    fn validated(mut self) -> Self {
        self.speed_step = self.fall_speed_step();
        self
    }

    /// Speed gained per fall tick. A fall only reaches the floor if the
    /// step is positive, so anything else falls back to the default.
    pub fn fall_speed_step(&self) -> i32 {
        if self.speed_step > 0 {
            self.speed_step
        } else {
            warn!(
                "speed_step must be positive (got {}), using {}",
                self.speed_step, FALL_SPEED_STEP
            );
            FALL_SPEED_STEP
        }
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(SETTINGS_FILE)
    }

    /// Save settings to `path`, creating its parent directory
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Fall task tick as a Duration
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn background_color(&self) -> Color {
        parse_hex_color(&self.background, DEFAULT_BACKGROUND_COLOR)
    }

    pub fn ball_color(&self) -> Color {
        parse_hex_color(&self.ball_color, DEFAULT_BALL_COLOR)
    }
}

/// Parse a `#rrggbb` / `rrggbb` color, logging and returning `fallback` if invalid
fn parse_hex_color(hex: &str, fallback: Color) -> Color {
    match Srgba::hex(hex) {
        Ok(color) => color.into(),
        Err(e) => {
            warn!("Invalid color '{}': {:?}, using default", hex, e);
            fallback
        }
    }
}
