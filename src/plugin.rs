//! Bevy plugins wiring the widget into an app

use bevy::prelude::*;

use crate::ball::{BallWidget, apply_pointer_events};
use crate::host::PointerEvent;
use crate::input::{PointerTracker, capture_pointer};
use crate::render::{
    FrameCommands, init_widget_from_window, present_frame, record_frame, spawn_ball_visual,
};

/// Core widget systems. Works headless: the app (or a startup system)
/// must insert the `BallWidget` resource.
pub struct BallWidgetPlugin;

impl Plugin for BallWidgetPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PointerEvent>()
            .init_resource::<FrameCommands>()
            .add_systems(
                Update,
                apply_pointer_events.run_if(resource_exists::<BallWidget>),
            )
            .add_systems(
                PostUpdate,
                record_frame.run_if(resource_exists::<BallWidget>),
            );
    }
}

/// Window host: attaches the widget to the primary window, captures
/// mouse/touch input and presents each recorded frame.
/// Needs `DefaultPlugins` and a `WidgetSettings` resource.
pub struct BallDisplayPlugin;

impl Plugin for BallDisplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerTracker>()
            .add_systems(Startup, init_widget_from_window)
            .add_systems(
                PostStartup,
                spawn_ball_visual.run_if(resource_exists::<BallWidget>),
            )
            .add_systems(Update, capture_pointer.before(apply_pointer_events))
            .add_systems(
                PostUpdate,
                present_frame
                    .after(record_frame)
                    .run_if(resource_exists::<BallWidget>),
            );
    }
}
