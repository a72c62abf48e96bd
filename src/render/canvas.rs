//! Draw step and the command recorder it draws into

use bevy::prelude::*;

use crate::ball::BallWidget;

/// Paint used for the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPaint {
    pub color: Color,
    pub stroke_width: f32,
    pub anti_alias: bool,
    pub dither: bool,
}

/// Drawing surface supplied by the display host
pub trait Canvas {
    fn clear_background(&mut self, color: Color);
    fn draw_filled_circle(&mut self, center: (i32, i32), radius: f32, paint: &BallPaint);
    /// Ask the host for another frame
    fn request_redraw(&mut self);
}

/// One recorded drawing instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    ClearBackground(Color),
    FilledCircle {
        center: (i32, i32),
        radius: f32,
        paint: BallPaint,
    },
    RequestRedraw,
}

/// Commands recorded for the current frame
#[derive(Resource, Debug, Default)]
pub struct FrameCommands {
    pub commands: Vec<DrawCommand>,
    /// Frames recorded so far
    pub frame: u64,
}

impl FrameCommands {
    /// Start a new frame, dropping the previous one's commands
    pub fn begin(&mut self) {
        self.commands.clear();
        self.frame += 1;
    }
}

impl Canvas for FrameCommands {
    fn clear_background(&mut self, color: Color) {
        self.commands.push(DrawCommand::ClearBackground(color));
    }

    fn draw_filled_circle(&mut self, center: (i32, i32), radius: f32, paint: &BallPaint) {
        self.commands.push(DrawCommand::FilledCircle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn request_redraw(&mut self) {
        self.commands.push(DrawCommand::RequestRedraw);
    }
}

impl BallWidget {
    /// Draw one frame. Always asks for the next one, whether or not anything moved.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let center = self.center();
        trace!("Drawing ball at {:?}", center);
        canvas.clear_background(self.background());
        canvas.draw_filled_circle(center, self.radius(), self.paint());
        canvas.request_redraw();
    }
}

/// Record this frame's draw commands
pub fn record_frame(widget: Res<BallWidget>, mut frame: ResMut<FrameCommands>) {
    frame.begin();
    widget.render(&mut *frame);
}
