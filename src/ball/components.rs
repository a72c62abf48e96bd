//! Ball widget state

use bevy::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::ball::physics::{FallParams, SleepTicker, Ticker};
use crate::host::DisplayHost;
use crate::render::BallPaint;
use crate::settings::WidgetSettings;

/// Container size in pixels, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub width: i32,
    pub height: i32,
}

/// Ball center shared between the input/render loop and fall workers.
///
/// Each coordinate is its own atomic: a reader never sees a half-written
/// value, but x and y are not updated together.
#[derive(Debug, Default)]
pub struct SharedCenter {
    x: AtomicI32,
    y: AtomicI32,
    /// Fall workers currently running
    active_falls: AtomicUsize,
}

impl SharedCenter {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: AtomicI32::new(x),
            y: AtomicI32::new(y),
            active_falls: AtomicUsize::new(0),
        }
    }

    pub fn x(&self) -> i32 {
        self.x.load(Ordering::Relaxed)
    }

    pub fn y(&self) -> i32 {
        self.y.load(Ordering::Relaxed)
    }

    pub fn get(&self) -> (i32, i32) {
        (self.x(), self.y())
    }

    pub fn set(&self, x: i32, y: i32) {
        self.x.store(x, Ordering::Relaxed);
        self.y.store(y, Ordering::Relaxed);
    }

    /// Move the center down by `dy` pixels
    pub fn add_y(&self, dy: i32) {
        self.y.fetch_add(dy, Ordering::Relaxed);
    }

    pub fn active_falls(&self) -> usize {
        self.active_falls.load(Ordering::Acquire)
    }

    pub(crate) fn fall_started(&self) {
        self.active_falls.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn fall_finished(&self) {
        self.active_falls.fetch_sub(1, Ordering::AcqRel);
    }
}

/// The draggable ball.
///
/// Lives as a resource for the lifetime of its container. Pointer handling
/// is in `interaction`, the release animation in `physics`, and the draw
/// step in `render`.
#[derive(Resource)]
pub struct BallWidget {
    pub(crate) container: Container,
    pub(crate) radius: f32,
    pub(crate) center: Arc<SharedCenter>,
    pub(crate) dragging: bool,
    pub(crate) fall: FallParams,
    pub(crate) ticker: Arc<dyn Ticker>,
    pub(crate) background: Color,
    pub(crate) paint: BallPaint,
}

impl BallWidget {
    /// Attach a widget to `host`, resting at the bottom middle of the container
    pub fn new(host: &impl DisplayHost, settings: &WidgetSettings) -> Self {
        let (width, height) = host.container_size();
        let container = Container { width, height };
        let radius = settings.radius;
        let center = SharedCenter::new(width / 2, (height as f32 - radius) as i32);

        info!(
            "Ball widget attached: container {}x{}, radius {}, center {:?}",
            width,
            height,
            radius,
            center.get()
        );

        Self {
            container,
            radius,
            center: Arc::new(center),
            dragging: false,
            fall: FallParams::new(
                container,
                radius,
                settings.tick(),
                settings.fall_speed_step(),
            ),
            ticker: Arc::new(SleepTicker),
            background: settings.background_color(),
            paint: BallPaint {
                color: settings.ball_color(),
                stroke_width: settings.stroke_width,
                anti_alias: true,
                dither: true,
            },
        }
    }

    /// Replace the wait primitive used by fall workers
    pub fn with_ticker(mut self, ticker: impl Ticker + 'static) -> Self {
        self.ticker = Arc::new(ticker);
        self
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn center(&self) -> (i32, i32) {
        self.center.get()
    }

    /// Handle to the shared center, for observers on other threads
    pub fn shared_center(&self) -> Arc<SharedCenter> {
        Arc::clone(&self.center)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn fall_params(&self) -> &FallParams {
        &self.fall
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn paint(&self) -> &BallPaint {
        &self.paint
    }

    /// Block until no fall worker is running, or `timeout` passes.
    /// Returns false on timeout.
    pub fn wait_until_settled(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.center.active_falls() > 0 {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(1));
        }
        true
    }
}
