//! Ballandball - drag the ball, let go, watch it drop
//!
//! Main entry point: window setup and plugin registration.

use ballandball::constants::WINDOW_TITLE;
use ballandball::{BallDisplayPlugin, BallWidgetPlugin, SETTINGS_FILE, WidgetSettings};
use bevy::prelude::*;
use std::path::Path;

fn main() {
    // Load persistent settings (uses defaults if file doesn't exist)
    let settings = WidgetSettings::load();

    // Save settings on first run to ensure file exists
    if !Path::new(SETTINGS_FILE).exists() {
        if let Err(e) = settings.save() {
            warn!("Failed to save initial settings: {}", e);
        }
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                // Logical pixels double as container pixels
                resolution: bevy::window::WindowResolution::new(
                    settings.window_width,
                    settings.window_height,
                )
                .with_scale_factor_override(1.0),
                title: WINDOW_TITLE.into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(settings.background_color()))
        .insert_resource(settings)
        .add_plugins((BallWidgetPlugin, BallDisplayPlugin))
        .run();
}
