//! Window presentation: turns recorded draw commands into Bevy state

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, RequestRedraw};

use super::canvas::{DrawCommand, FrameCommands};
use crate::ball::{BallWidget, Container};
use crate::constants::BALL_Z;
use crate::host::WindowHost;
use crate::settings::WidgetSettings;

/// Marker for the mesh that shows the ball
#[derive(Component)]
pub struct BallVisual;

/// Convert container pixels (origin top-left, y down) to 2D world
/// coordinates (origin at the window center, y up)
pub fn container_to_world(point: (i32, i32), container: Container) -> Vec2 {
    Vec2::new(
        point.0 as f32 - container.width as f32 / 2.0,
        container.height as f32 / 2.0 - point.1 as f32,
    )
}

/// Attach the widget to the primary window
pub fn init_widget_from_window(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<WidgetSettings>,
) {
    let Ok(window) = windows.single() else {
        warn!("No primary window, ball widget not attached");
        return;
    };
    commands.insert_resource(BallWidget::new(&WindowHost(window), &settings));
}

/// Camera plus a unit circle mesh scaled to the ball radius each frame
pub fn spawn_ball_visual(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    widget: Res<BallWidget>,
) {
    commands.spawn(Camera2d);

    let position = container_to_world(widget.center(), widget.container());
    commands.spawn((
        Mesh2d(meshes.add(Circle::new(1.0))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(widget.paint().color))),
        Transform::from_translation(position.extend(BALL_Z)).with_scale(Vec3::splat(widget.radius())),
        BallVisual,
    ));
}

/// Apply the recorded frame: background, ball placement, next-frame request
pub fn present_frame(
    frame: Res<FrameCommands>,
    widget: Res<BallWidget>,
    mut clear_color: ResMut<ClearColor>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut visuals: Query<(&mut Transform, &MeshMaterial2d<ColorMaterial>), With<BallVisual>>,
    mut redraw: MessageWriter<RequestRedraw>,
) {
    for command in &frame.commands {
        match command {
            DrawCommand::ClearBackground(color) => {
                if clear_color.0 != *color {
                    clear_color.0 = *color;
                }
            }
            DrawCommand::FilledCircle {
                center,
                radius,
                paint,
            } => {
                let position = container_to_world(*center, widget.container());
                for (mut transform, material) in &mut visuals {
                    transform.translation = position.extend(BALL_Z);
                    transform.scale = Vec3::splat(*radius);

                    let stale = materials
                        .get(&material.0)
                        .is_some_and(|m| m.color != paint.color);
                    if stale {
                        if let Some(m) = materials.get_mut(&material.0) {
                            m.color = paint.color;
                        }
                    }
                }
            }
            DrawCommand::RequestRedraw => {
                redraw.write(RequestRedraw);
            }
        }
    }
}
