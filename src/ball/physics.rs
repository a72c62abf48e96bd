//! Release animation: the ball falls with a constant speed gain per tick
//! until it rests on the container floor.
//!
//! Every release spawns its own worker thread. Workers are never cancelled
//! and race on the shared center when they overlap.

use bevy::log::{debug, warn};
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::ball::components::{BallWidget, Container, SharedCenter};
use crate::constants::FALL_THREAD_NAME;

/// A wait that was cut short
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitInterrupted {
    pub reason: String,
}

impl fmt::Display for WaitInterrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fall tick interrupted: {}", self.reason)
    }
}

impl std::error::Error for WaitInterrupted {}

/// Wait primitive for one fall tick
pub trait Ticker: Send + Sync {
    fn wait(&self, tick: Duration) -> Result<(), WaitInterrupted>;
}

/// Sleeps the worker thread; never interrupted
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepTicker;

impl Ticker for SleepTicker {
    fn wait(&self, tick: Duration) -> Result<(), WaitInterrupted> {
        thread::sleep(tick);
        Ok(())
    }
}

/// Fixed inputs to a fall run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallParams {
    /// Highest center y that still counts as airborne (`height - radius`)
    pub floor_y: f32,
    /// Center y the ball snaps to on landing
    pub rest_y: i32,
    pub tick: Duration,
    pub speed_step: i32,
}

impl FallParams {
    pub fn new(container: Container, radius: f32, tick: Duration, speed_step: i32) -> Self {
        let floor_y = container.height as f32 - radius;
        Self {
            floor_y,
            rest_y: floor_y as i32,
            tick,
            speed_step,
        }
    }
}

/// What a finished fall did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FallReport {
    /// Ticks spent airborne
    pub ticks: u32,
    /// Ticks whose wait was interrupted
    pub interrupted: u32,
    pub landed_y: i32,
}

/// Run one fall to completion on the calling thread.
///
/// An interrupted wait is logged and skipped: that tick gains no speed but
/// the ball still moves by the current speed.
pub fn run_fall(center: &SharedCenter, params: &FallParams, ticker: &dyn Ticker) -> FallReport {
    let mut speed = 0;
    let mut report = FallReport::default();

    loop {
        let (x, y) = center.get();
        if y as f32 <= params.floor_y {
            center.set(x, y);
            match ticker.wait(params.tick) {
                Ok(()) => speed += params.speed_step,
                Err(e) => {
                    warn!("{}", e);
                    report.interrupted += 1;
                }
            }
            center.add_y(speed);
            report.ticks += 1;
        } else {
            center.set(center.x(), params.rest_y);
            report.landed_y = params.rest_y;
            return report;
        }
    }
}

/// Decrements the active fall count when a worker exits, even by panic
struct ActiveFall(Arc<SharedCenter>);

impl Drop for ActiveFall {
    fn drop(&mut self) {
        self.0.fall_finished();
    }
}

/// Start a detached fall worker. Returns false if the thread could not be spawned.
pub fn spawn_fall(center: Arc<SharedCenter>, params: FallParams, ticker: Arc<dyn Ticker>) -> bool {
    center.fall_started();
    let guard = ActiveFall(Arc::clone(&center));

    let spawned = thread::Builder::new()
        .name(FALL_THREAD_NAME.to_string())
        .spawn(move || {
            let guard = guard;
            debug!("Fall started from y={}", guard.0.y());
            let report = run_fall(&guard.0, &params, ticker.as_ref());
            debug!(
                "Fall landed at y={} after {} ticks ({} interrupted)",
                report.landed_y, report.ticks, report.interrupted
            );
        });

    match spawned {
        Ok(_) => true,
        Err(e) => {
            // The closure (and its guard) was dropped with the failed spawn
            warn!("Failed to spawn fall worker: {}", e);
            false
        }
    }
}

impl BallWidget {
    /// Fire-and-forget fall from the current center
    pub fn start_fall(&self) -> bool {
        spawn_fall(
            Arc::clone(&self.center),
            self.fall,
            Arc::clone(&self.ticker),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    const W: i32 = 400;
    const H: i32 = 800;
    const R: f32 = 40.0;

    struct NoWait;

    impl Ticker for NoWait {
        fn wait(&self, _tick: Duration) -> Result<(), WaitInterrupted> {
            Ok(())
        }
    }

    /// Interrupts every other wait
    #[derive(Default)]
    struct Flaky(AtomicU32);

    impl Ticker for Flaky {
        fn wait(&self, _tick: Duration) -> Result<(), WaitInterrupted> {
            if self.0.fetch_add(1, Ordering::Relaxed) % 2 == 0 {
                Err(WaitInterrupted {
                    reason: "test".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn params() -> FallParams {
        FallParams::new(
            Container {
                width: W,
                height: H,
            },
            R,
            Duration::from_millis(30),
            2,
        )
    }

    #[test]
    fn test_params() {
        let p = params();
        assert_eq!(p.floor_y, 760.0);
        assert_eq!(p.rest_y, 760);
    }

    #[test]
    fn test_fall_lands_exactly_on_floor() {
        for start in [-500, 0, 40, 300, 700, 759] {
            let center = SharedCenter::new(123, start);
            let report = run_fall(&center, &params(), &NoWait);
            assert_eq!(center.get(), (123, 760), "start {}", start);
            assert_eq!(report.landed_y, 760);
            assert!(report.ticks > 0);
        }
    }

    #[test]
    fn test_fall_tick_count() {
        // 300 -> 302 -> 306 -> ... needs k with k(k+1) > 460, so 21 ticks
        let center = SharedCenter::new(0, 300);
        let report = run_fall(&center, &params(), &NoWait);
        assert_eq!(report.ticks, 21);
        assert_eq!(report.interrupted, 0);
    }

    #[test]
    fn test_fall_from_rest_has_no_net_motion() {
        let center = SharedCenter::new(200, 760);
        let report = run_fall(&center, &params(), &NoWait);
        assert_eq!(center.get(), (200, 760));
        // On the floor still counts as airborne for one step, then snaps back
        assert_eq!(report.ticks, 1);
    }

    #[test]
    fn test_below_floor_snaps_without_ticking() {
        let center = SharedCenter::new(200, 900);
        let report = run_fall(&center, &params(), &NoWait);
        assert_eq!(center.get(), (200, 760));
        assert_eq!(report.ticks, 0);
    }

    #[test]
    fn test_interrupted_waits_are_swallowed() {
        let center = SharedCenter::new(0, 300);
        let report = run_fall(&center, &params(), &Flaky::default());
        assert_eq!(center.y(), 760);
        assert!(report.interrupted > 0);
        // Interrupted ticks gain no speed, so the fall takes longer
        assert!(report.ticks > 21);
    }

    #[test]
    fn test_spawned_fall_lands() {
        let center = Arc::new(SharedCenter::new(50, 100));
        let mut p = params();
        p.tick = Duration::from_millis(1);
        assert!(spawn_fall(Arc::clone(&center), p, Arc::new(SleepTicker)));

        let deadline = Instant::now() + Duration::from_secs(5);
        while center.active_falls() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(center.active_falls(), 0);
        assert_eq!(center.get(), (50, 760));
    }

    #[test]
    fn test_concurrent_falls_do_not_corrupt_state() {
        let center = Arc::new(SharedCenter::new(200, 0));
        let mut p = params();
        p.tick = Duration::from_millis(1);

        assert!(spawn_fall(Arc::clone(&center), p, Arc::new(SleepTicker)));
        center.set(200, 100);
        assert!(spawn_fall(Arc::clone(&center), p, Arc::new(SleepTicker)));

        // Observe from this thread while the workers race. Every read must be a
        // value some worker could have written: never above the start, never far
        // past the floor (one tick's worth of overshoot at most).
        let deadline = Instant::now() + Duration::from_secs(5);
        while center.active_falls() > 0 && Instant::now() < deadline {
            let (x, y) = center.get();
            assert_eq!(x, 200);
            assert!((0..=760 + 200).contains(&y), "torn or corrupt y: {}", y);
        }
        assert_eq!(center.active_falls(), 0);
        assert_eq!(center.get(), (200, 760));
    }
}
