//! Pointer handling: grab, drag and release

use bevy::prelude::*;

use crate::ball::components::{BallWidget, Container};
use crate::host::{PointerEvent, PointerPhase};

/// Which edge rule placed the ball on release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseEdge {
    Left,
    Right,
    Top,
    Bottom,
    /// No clamping needed
    Inside,
}

/// Result of feeding one pointer event to the widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Down missed the ball, or Move without a drag
    Ignored,
    Grabbed,
    Dragged { center: (i32, i32) },
    /// `edge` is None when there was no drag to end. A fall starts either way.
    Released {
        edge: Option<ReleaseEdge>,
        center: (i32, i32),
        fall_started: bool,
    },
}

/// Place a released ball.
///
/// Only the first out-of-bounds edge (left, right, top, bottom) is fixed;
/// the other axis comes straight from the release point.
pub fn clamp_release(
    center: (i32, i32),
    release: (f32, f32),
    radius: f32,
    container: Container,
) -> (ReleaseEdge, (i32, i32)) {
    let (cx, cy) = (center.0 as f32, center.1 as f32);
    let (x, y) = (release.0 as i32, release.1 as i32);
    let width = container.width as f32;
    let height = container.height as f32;

    if cx - radius < 0.0 {
        (ReleaseEdge::Left, (radius as i32, y))
    } else if cx + radius > width {
        (ReleaseEdge::Right, ((width - radius) as i32, y))
    } else if cy - radius < 0.0 {
        (ReleaseEdge::Top, (x, radius as i32))
    } else if cy + radius > height {
        (ReleaseEdge::Bottom, (x, (height - radius) as i32))
    } else {
        (ReleaseEdge::Inside, (x, y))
    }
}

impl BallWidget {
    /// True if the point is strictly inside the ball's bounding square.
    /// Corners of the square outside the circle count as hits.
    pub fn hit_test(&self, px: f32, py: f32) -> bool {
        let (cx, cy) = self.center();
        let (cx, cy) = (cx as f32, cy as f32);
        px > cx - self.radius && px < cx + self.radius && py > cy - self.radius && py < cy + self.radius
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        match event.phase {
            PointerPhase::Down => {
                // Press position is truncated to whole pixels before the hit test
                if self.hit_test(event.x as i32 as f32, event.y as i32 as f32) {
                    info!("Touch down on ball at ({}, {})", event.x, event.y);
                    self.dragging = true;
                    PointerOutcome::Grabbed
                } else {
                    PointerOutcome::Ignored
                }
            }
            PointerPhase::Move => {
                if !self.dragging {
                    return PointerOutcome::Ignored;
                }
                let center = (event.x as i32, event.y as i32);
                self.center.set(center.0, center.1);
                PointerOutcome::Dragged { center }
            }
            PointerPhase::Up => {
                let edge = if self.dragging {
                    let (edge, (x, y)) =
                        clamp_release(self.center(), (event.x, event.y), self.radius, self.container);
                    self.center.set(x, y);
                    debug!("Released ball at ({}, {}) via {:?}", x, y, edge);
                    Some(edge)
                } else {
                    None
                };
                self.dragging = false;
                let center = self.center();
                let fall_started = self.start_fall();
                PointerOutcome::Released {
                    edge,
                    center,
                    fall_started,
                }
            }
        }
    }
}

/// Feed this frame's pointer events to the widget, in arrival order
pub fn apply_pointer_events(
    mut events: MessageReader<PointerEvent>,
    mut widget: ResMut<BallWidget>,
) {
    for event in events.read() {
        widget.handle_pointer(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::physics::{Ticker, WaitInterrupted};
    use crate::host::FixedHost;
    use crate::settings::WidgetSettings;
    use std::time::Duration;

    const BOX: Container = Container {
        width: 400,
        height: 800,
    };

    /// Parks every fall worker at its first tick, so positions right after
    /// release can be read without racing.
    struct Frozen;

    impl Ticker for Frozen {
        fn wait(&self, _tick: Duration) -> Result<(), WaitInterrupted> {
            std::thread::sleep(Duration::from_secs(3600));
            Ok(())
        }
    }

    fn widget() -> BallWidget {
        BallWidget::new(&FixedHost::new(400, 800), &WidgetSettings::default())
            .with_ticker(Frozen)
    }

    #[test]
    fn test_hit_test_is_a_square() {
        let w = widget(); // center (200, 760), radius 40
        assert!(w.hit_test(200.0, 760.0));
        assert!(w.hit_test(160.5, 720.5));
        assert!(w.hit_test(239.9, 799.9));
        // Bounding-box corner, outside the circle itself
        assert!(w.hit_test(235.0, 795.0));
        // Edges are excluded
        assert!(!w.hit_test(160.0, 760.0));
        assert!(!w.hit_test(240.0, 760.0));
        assert!(!w.hit_test(200.0, 720.0));
        assert!(!w.hit_test(200.0, 800.0));
        assert!(!w.hit_test(0.0, 0.0));
    }

    #[test]
    fn test_down_outside_does_not_grab() {
        let mut w = widget();
        assert_eq!(w.handle_pointer(PointerEvent::down(10.0, 10.0)), PointerOutcome::Ignored);
        assert!(!w.is_dragging());
        assert_eq!(w.handle_pointer(PointerEvent::moved(50.0, 50.0)), PointerOutcome::Ignored);
        assert_eq!(w.center(), (200, 760));
    }

    #[test]
    fn test_down_truncates_before_hit_test() {
        let mut w = widget();
        // 160.7 truncates to 160, which sits on the edge
        assert_eq!(w.handle_pointer(PointerEvent::down(160.7, 760.0)), PointerOutcome::Ignored);
        assert_eq!(w.handle_pointer(PointerEvent::down(161.2, 760.0)), PointerOutcome::Grabbed);
    }

    #[test]
    fn test_drag_is_unclamped() {
        let mut w = widget();
        assert_eq!(w.handle_pointer(PointerEvent::down(200.0, 760.0)), PointerOutcome::Grabbed);
        assert!(w.is_dragging());
        assert_eq!(
            w.handle_pointer(PointerEvent::moved(-120.0, 5000.0)),
            PointerOutcome::Dragged { center: (-120, 5000) }
        );
        assert_eq!(w.center(), (-120, 5000));
    }

    #[test]
    fn test_release_past_left_edge() {
        let mut w = widget();
        w.handle_pointer(PointerEvent::down(200.0, 760.0));
        w.handle_pointer(PointerEvent::moved(-10.0, 300.0));
        let outcome = w.handle_pointer(PointerEvent::up(-10.0, 300.0));
        assert_eq!(
            outcome,
            PointerOutcome::Released {
                edge: Some(ReleaseEdge::Left),
                center: (40, 300),
                fall_started: true,
            }
        );
        assert!(!w.is_dragging());
    }

    #[test]
    fn test_release_past_right_edge() {
        let mut w = widget();
        w.handle_pointer(PointerEvent::down(200.0, 760.0));
        w.handle_pointer(PointerEvent::moved(390.0, 300.0));
        match w.handle_pointer(PointerEvent::up(390.0, 300.0)) {
            PointerOutcome::Released { edge, center, .. } => {
                assert_eq!(edge, Some(ReleaseEdge::Right));
                assert_eq!(center, (360, 300));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_up_without_drag_still_starts_fall() {
        let mut w = widget();
        let outcome = w.handle_pointer(PointerEvent::up(5.0, 5.0));
        assert_eq!(
            outcome,
            PointerOutcome::Released {
                edge: None,
                center: (200, 760),
                fall_started: true,
            }
        );
        assert_eq!(w.shared_center().active_falls(), 1);
    }

    #[test]
    fn test_clamp_priority() {
        // Left wins over top even when both are out
        assert_eq!(
            clamp_release((10, 10), (10.0, 10.0), 40.0, BOX),
            (ReleaseEdge::Left, (40, 10))
        );
        // Right wins over bottom
        assert_eq!(
            clamp_release((395, 790), (395.0, 790.0), 40.0, BOX),
            (ReleaseEdge::Right, (360, 790))
        );
        assert_eq!(
            clamp_release((200, 20), (200.0, 20.0), 40.0, BOX),
            (ReleaseEdge::Top, (200, 40))
        );
        assert_eq!(
            clamp_release((200, 790), (200.0, 790.0), 40.0, BOX),
            (ReleaseEdge::Bottom, (200, 760))
        );
        assert_eq!(
            clamp_release((200, 400), (200.9, 400.2), 40.0, BOX),
            (ReleaseEdge::Inside, (200, 400))
        );
    }

    #[test]
    fn test_clamp_uses_center_not_release_point() {
        // Center already inside; a release point out of bounds is taken as-is
        assert_eq!(
            clamp_release((200, 400), (-50.0, 400.0), 40.0, BOX),
            (ReleaseEdge::Inside, (-50, 400))
        );
    }

    #[test]
    fn test_clamp_exact_fit_is_inside() {
        assert_eq!(
            clamp_release((40, 760), (40.0, 760.0), 40.0, BOX),
            (ReleaseEdge::Inside, (40, 760))
        );
    }
}
