//! Headless App Builder
//!
//! Builds a windowless Bevy app hosting the ball widget in a fixed-size
//! container. Used by the scenario runner and tests.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use crate::ball::{BallWidget, Ticker};
use crate::host::FixedHost;
use crate::plugin::BallWidgetPlugin;
use crate::settings::WidgetSettings;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    host: FixedHost,
    settings: WidgetSettings,
    ticker: Option<Arc<dyn Ticker>>,
}

impl HeadlessAppBuilder {
    /// Container of the given size with default settings
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            host: FixedHost::new(width, height),
            settings: WidgetSettings::default(),
            ticker: None,
        }
    }

    pub fn with_settings(mut self, settings: WidgetSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Override the fall tick (0 makes falls finish almost instantly)
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.settings.tick_ms = tick_ms;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.settings.radius = radius;
        self
    }

    /// Replace the fall wait primitive
    pub fn with_ticker(mut self, ticker: impl Ticker + 'static) -> Self {
        self.ticker = Some(Arc::new(ticker));
        self
    }

    /// Build the app: MinimalPlugins, `BallWidgetPlugin`, the settings
    /// resource and a widget attached to the fixed host.
    pub fn build(self) -> App {
        let mut app = App::new();

        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            Duration::from_secs_f64(1.0 / 60.0),
        )));
        app.add_plugins(BallWidgetPlugin);

        let mut widget = BallWidget::new(&self.host, &self.settings);
        if let Some(ticker) = self.ticker {
            widget.ticker = ticker;
        }
        app.insert_resource(widget);
        app.insert_resource(self.settings);

        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::{Ticker, WaitInterrupted};
    use crate::host::PointerEvent;
    use crate::render::{DrawCommand, FrameCommands};
    use bevy::ecs::message::Messages;

    struct Frozen;

    impl Ticker for Frozen {
        fn wait(&self, _tick: Duration) -> Result<(), WaitInterrupted> {
            std::thread::sleep(Duration::from_secs(3600));
            Ok(())
        }
    }

    fn send(app: &mut App, event: PointerEvent) {
        app.world_mut()
            .resource_mut::<Messages<PointerEvent>>()
            .write(event);
    }

    #[test]
    fn test_builder_creates_app() {
        let app = HeadlessAppBuilder::new(400, 800).build();
        assert!(app.world().contains_resource::<BallWidget>());
        assert!(app.world().contains_resource::<FrameCommands>());
        assert_eq!(app.world().resource::<BallWidget>().center(), (200, 760));
    }

    #[test]
    fn test_frames_are_recorded_every_update() {
        let mut app = HeadlessAppBuilder::new(400, 800).build();
        app.update();
        app.update();
        let frame = app.world().resource::<FrameCommands>();
        assert_eq!(frame.frame, 2);
        assert_eq!(frame.commands.last(), Some(&DrawCommand::RequestRedraw));
    }

    #[test]
    fn test_pointer_messages_drive_widget() {
        let mut app = HeadlessAppBuilder::new(400, 800)
            .with_ticker(Frozen)
            .build();

        send(&mut app, PointerEvent::down(200.0, 760.0));
        send(&mut app, PointerEvent::moved(390.0, 300.0));
        app.update();
        {
            let widget = app.world().resource::<BallWidget>();
            assert!(widget.is_dragging());
            assert_eq!(widget.center(), (390, 300));
        }

        send(&mut app, PointerEvent::up(390.0, 300.0));
        app.update();
        let widget = app.world().resource::<BallWidget>();
        assert!(!widget.is_dragging());
        assert_eq!(widget.center(), (360, 300));
        assert_eq!(widget.shared_center().active_falls(), 1);

        // The recorded circle follows the clamped center
        let frame = app.world().resource::<FrameCommands>();
        assert!(frame.commands.iter().any(|c| matches!(
            c,
            DrawCommand::FilledCircle {
                center: (360, 300),
                ..
            }
        )));
    }

    #[test]
    fn test_zero_speed_step_still_lands() {
        let settings = WidgetSettings {
            speed_step: 0,
            tick_ms: 0,
            ..Default::default()
        };
        let mut app = HeadlessAppBuilder::new(400, 800).with_settings(settings).build();
        send(&mut app, PointerEvent::down(200.0, 760.0));
        send(&mut app, PointerEvent::moved(200.0, 100.0));
        send(&mut app, PointerEvent::up(200.0, 100.0));
        app.update();

        let widget = app.world().resource::<BallWidget>();
        assert_eq!(widget.fall_params().speed_step, 2);
        assert!(widget.wait_until_settled(Duration::from_secs(5)));
        assert_eq!(widget.center(), (200, 760));
    }

    #[test]
    fn test_release_falls_to_floor() {
        let mut app = HeadlessAppBuilder::new(400, 800).with_tick_ms(0).build();
        send(&mut app, PointerEvent::down(200.0, 760.0));
        send(&mut app, PointerEvent::moved(100.0, 50.0));
        send(&mut app, PointerEvent::up(100.0, 50.0));
        app.update();

        let widget = app.world().resource::<BallWidget>();
        assert!(widget.wait_until_settled(Duration::from_secs(5)));
        assert_eq!(widget.center(), (100, 760));
    }
}
