//! Elastic connector between the anchor circle and the moving circle.
//!
//! The connector owns the two circles and recomputes the tangent/bezier
//! outline on every pointer move. It decides when the blob snaps and
//! exposes the small lifecycle state machine the engine drives.

use glam::Vec2;
use log::debug;

use crate::core::shape::Circle;

/// Default multiple of the moving radius at which the connector snaps.
pub const DEFAULT_BREAK_DISTANCE_FACTOR: f32 = 5.0;

/// Lifecycle of one bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorState {
    /// Resting. The moving circle coincides with the anchor.
    Anchored,
    /// Pointer is dragging the moving circle; the outline is visible.
    Stretching,
    /// Distance or anchor-radius threshold exceeded; the outline is gone.
    Broken,
    /// Particle burst in flight.
    Exploding,
}

/// Outcome of a pointer release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Connector never broke; the moving circle snapped back onto the anchor.
    SnappedBack,
    /// Connector had already broken; the bubble should burst.
    Broke,
}

/// The connector outline: tangent points A/B on the anchor, C/D on the
/// moving circle, and the shared curve-control point E. Only valid while
/// the connector is drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
    pub d: Vec2,
    pub e: Vec2,
}

pub struct Connector {
    anchor: Circle,
    moving: Circle,
    outline: Outline,
    center_distance: f32,
    last_distance: f32,
    can_draw_path: bool,
    break_distance_factor: f32,
    view_width: f32,
    view_height: f32,
    state: ConnectorState,
}

impl Connector {
    pub fn new() -> Self {
        Self {
            anchor: Circle::new(0.0, 0.0, 0.0),
            moving: Circle::new(0.0, 0.0, 0.0),
            outline: Outline {
                a: Vec2::ZERO,
                b: Vec2::ZERO,
                c: Vec2::ZERO,
                d: Vec2::ZERO,
                e: Vec2::ZERO,
            },
            center_distance: 0.0,
            last_distance: 0.0,
            can_draw_path: true,
            break_distance_factor: DEFAULT_BREAK_DISTANCE_FACTOR,
            view_width: 0.0,
            view_height: 0.0,
            state: ConnectorState::Anchored,
        }
    }

    /// Set up the resting geometry: both circles concentric at the view
    /// center, the anchor ring behind the foreground disk.
    pub fn init(&mut self, width: f32, height: f32) {
        self.view_width = width;
        self.view_height = height;
        self.anchor = Circle::new(width / 2.0, height / 2.0, width / 2.0);
        self.moving = Circle::new(width / 2.0, height / 2.0, height / 2.0);
        self.center_distance = 0.0;
        self.last_distance = 0.0;
        self.can_draw_path = true;
        self.state = ConnectorState::Anchored;
        self.compute_path();
    }

    pub fn set_break_distance_factor(&mut self, factor: f32) {
        self.break_distance_factor = factor;
    }

    pub fn break_distance_factor(&self) -> f32 {
        self.break_distance_factor
    }

    /// Track the pointer: move the moving circle and recompute the
    /// outline. The distance recorded here feeds the next move's
    /// radius-decay term, so a fast flick necks the anchor harder than a
    /// slow drag to the same spot.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.moving.set_center(x, y);
        self.compute_path();
        self.last_distance = self.center_distance;
        if self.can_draw_path && self.state != ConnectorState::Exploding {
            self.state = ConnectorState::Stretching;
        }
    }

    /// Pointer released. Either the connector survived and the moving
    /// circle snaps back, or it had broken and the bubble should burst.
    pub fn pointer_up(&mut self) -> ReleaseOutcome {
        if self.can_draw_path {
            self.snap_back();
            ReleaseOutcome::SnappedBack
        } else {
            ReleaseOutcome::Broke
        }
    }

    /// Pointer gesture cancelled by the platform. Same contract as
    /// [`Connector::pointer_up`].
    pub fn pointer_cancel(&mut self) -> ReleaseOutcome {
        self.pointer_up()
    }

    /// Enter the particle phase. Called by the engine once it has seeded
    /// particles after a break.
    pub fn begin_explosion(&mut self) {
        self.state = ConnectorState::Exploding;
    }

    /// Full reset back to the resting state. Idempotent.
    pub fn clear_status(&mut self) {
        self.can_draw_path = true;
        self.moving
            .set_center(self.view_width / 2.0, self.view_height / 2.0);
        self.anchor
            .set_center(self.view_width / 2.0, self.view_height / 2.0);
        self.anchor.radius = self.view_width / 2.0;
        self.center_distance = 0.0;
        self.last_distance = 0.0;
        self.state = ConnectorState::Anchored;
        self.compute_path();
    }

    fn snap_back(&mut self) {
        self.moving
            .set_center(self.anchor.center.x, self.anchor.center.y);
        self.anchor.radius = self.moving.radius;
        self.center_distance = 0.0;
        self.last_distance = 0.0;
        self.state = ConnectorState::Anchored;
        self.compute_path();
    }

    /// Recompute the tangent geometry for the current circle positions.
    fn compute_path(&mut self) {
        let start = self.anchor.center;
        let end = self.moving.center;

        self.center_distance = start.distance(end);

        // Snap test: too far apart, or the anchor has necked down too thin.
        if self.center_distance > self.moving.radius * self.break_distance_factor
            || self.anchor.radius <= self.moving.radius / 5.0
        {
            if self.can_draw_path {
                debug!(
                    "connector broke: distance {:.1}, anchor radius {:.1}",
                    self.center_distance, self.anchor.radius
                );
            }
            self.can_draw_path = false;
            if self.state != ConnectorState::Exploding {
                self.state = ConnectorState::Broken;
            }
            return;
        }

        // Neck the anchor by the rate of separation, not the absolute
        // distance.
        if self.center_distance > self.moving.radius {
            self.anchor.radius -= (self.center_distance - self.last_distance) / 5.0;
        }

        // Unit perpendicular to the center line. Concentric circles have
        // no defined direction; collapse the offsets instead of dividing
        // by zero.
        let (cos, sin) = if self.center_distance == 0.0 {
            (0.0, 0.0)
        } else {
            (
                (end.y - start.y) / self.center_distance,
                (end.x - start.x) / self.center_distance,
            )
        };

        self.outline.a = Vec2::new(
            start.x - self.anchor.radius * cos,
            start.y + self.anchor.radius * sin,
        );
        self.outline.b = Vec2::new(
            start.x + self.anchor.radius * cos,
            start.y - self.anchor.radius * sin,
        );
        self.outline.c = Vec2::new(
            end.x + self.moving.radius * cos,
            end.y - self.moving.radius * sin,
        );
        self.outline.d = Vec2::new(
            end.x - self.moving.radius * cos,
            end.y + self.moving.radius * sin,
        );
        self.outline.e = Vec2::new(
            start.x - (start.x - end.x) / 2.0,
            start.y + (end.y - start.y) / 2.0,
        );
    }

    // -- Read-only queries for the renderer --

    pub fn anchor(&self) -> Circle {
        self.anchor
    }

    pub fn moving(&self) -> Circle {
        self.moving
    }

    pub fn can_draw_path(&self) -> bool {
        self.can_draw_path
    }

    pub fn center_distance(&self) -> f32 {
        self.center_distance
    }

    /// The outline points, or `None` once the connector has broken and
    /// the points are stale.
    pub fn outline(&self) -> Option<Outline> {
        if self.can_draw_path {
            Some(self.outline)
        } else {
            None
        }
    }

    pub fn state(&self) -> ConnectorState {
        self.state
    }
}

impl Default for Connector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connector(width: f32, height: f32) -> Connector {
        let mut c = Connector::new();
        c.init(width, height);
        c
    }

    #[test]
    fn init_places_concentric_circles() {
        let c = connector(200.0, 200.0);
        assert_eq!(c.anchor(), Circle::new(100.0, 100.0, 100.0));
        assert_eq!(c.moving(), Circle::new(100.0, 100.0, 100.0));
        assert!(c.can_draw_path());
        assert_eq!(c.state(), ConnectorState::Anchored);
    }

    #[test]
    fn drag_scenario_necks_then_breaks() {
        let mut c = connector(200.0, 200.0);

        c.pointer_move(100.0, 500.0);
        assert_eq!(c.center_distance(), 400.0);
        // 400 <= 100 * 5, still connected; anchor shrank by 400/5.
        assert!(c.can_draw_path());
        assert_eq!(c.anchor().radius, 20.0);

        c.pointer_move(100.0, 700.0);
        assert!(!c.can_draw_path());
        assert_eq!(c.state(), ConnectorState::Broken);
        assert_eq!(c.pointer_up(), ReleaseOutcome::Broke);
    }

    #[test]
    fn break_threshold_is_factor_times_moving_radius() {
        // moving radius 50, factor 5 => threshold 250.
        let mut c = connector(100.0, 100.0);
        c.pointer_move(50.0, 100.0); // distance 50, no necking yet
        c.pointer_move(50.0, 299.0); // distance 249
        assert!(c.can_draw_path());
        assert!(c.anchor().radius > c.moving().radius / 5.0);

        let mut c = connector(100.0, 100.0);
        c.pointer_move(50.0, 301.0); // distance 251
        assert!(!c.can_draw_path());
    }

    #[test]
    fn release_before_break_snaps_back() {
        let mut c = connector(200.0, 200.0);
        c.pointer_move(150.0, 150.0);
        c.pointer_move(180.0, 120.0);
        assert!(c.can_draw_path());

        assert_eq!(c.pointer_up(), ReleaseOutcome::SnappedBack);
        assert_eq!(c.moving().center, c.anchor().center);
        assert_eq!(c.anchor().radius, c.moving().radius);
        assert!(c.can_draw_path());
        assert_eq!(c.state(), ConnectorState::Anchored);
    }

    #[test]
    fn cancel_behaves_like_release_while_connected() {
        let mut c = connector(200.0, 200.0);
        c.pointer_move(160.0, 100.0);
        c.pointer_cancel();
        assert_eq!(c.moving().center, c.anchor().center);
        assert_eq!(c.state(), ConnectorState::Anchored);
    }

    #[test]
    fn cancel_after_break_reports_the_break() {
        let mut c = connector(200.0, 200.0);
        c.pointer_move(100.0, 700.0);
        assert!(!c.can_draw_path());
        assert_eq!(c.pointer_cancel(), ReleaseOutcome::Broke);
        assert!(!c.can_draw_path());
    }

    #[test]
    fn zero_distance_collapses_tangent_points() {
        let c = connector(200.0, 200.0);
        let o = c.outline().unwrap();
        // Concentric circles: all tangent points sit on the centers.
        assert_eq!(o.a, Vec2::new(100.0, 100.0));
        assert_eq!(o.b, Vec2::new(100.0, 100.0));
        assert_eq!(o.c, Vec2::new(100.0, 100.0));
        assert_eq!(o.d, Vec2::new(100.0, 100.0));
        assert_eq!(o.e, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn outline_control_point_is_center_midpoint() {
        let mut c = connector(200.0, 200.0);
        c.pointer_move(100.0, 180.0);
        let o = c.outline().unwrap();
        assert_eq!(o.e, Vec2::new(100.0, 140.0));
    }

    #[test]
    fn outline_is_stale_after_break() {
        let mut c = connector(200.0, 200.0);
        c.pointer_move(100.0, 700.0);
        assert!(c.outline().is_none());
    }

    #[test]
    fn clear_status_is_idempotent() {
        let mut c = connector(200.0, 200.0);
        c.pointer_move(100.0, 700.0);
        assert!(!c.can_draw_path());

        c.clear_status();
        let anchor = c.anchor();
        let moving = c.moving();
        let outline = c.outline();

        c.clear_status();
        assert_eq!(c.anchor(), anchor);
        assert_eq!(c.moving(), moving);
        assert_eq!(c.outline(), outline);
        assert!(c.can_draw_path());
        assert_eq!(c.state(), ConnectorState::Anchored);
    }

    #[test]
    fn custom_break_factor_moves_threshold() {
        let mut c = connector(100.0, 100.0);
        c.set_break_distance_factor(2.0);
        c.pointer_move(50.0, 151.0); // distance 101 > 50 * 2
        assert!(!c.can_draw_path());
    }
}
