use glam::Vec2;

/// A circle in world space. Centers are mutable `Vec2`s; the radius
/// must stay non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "circle radius must be non-negative");
        Self {
            center: Vec2::new(x, y),
            radius,
        }
    }

    /// Move the circle without touching its radius.
    pub fn set_center(&mut self, x: f32, y: f32) {
        self.center.x = x;
        self.center.y = y;
    }
}
