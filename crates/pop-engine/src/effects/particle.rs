//! A single burst particle and its per-frame physics.

use glam::Vec2;

use crate::effects::rng::Rng;
use crate::effects::sampler::Rgba8;

/// Divisor applied to the width-scaled radial drive.
const SPEED_SCALE: f32 = 40.0;
/// Fraction of the view height the field sags per unit progress squared.
const GRAVITY_BIAS: f32 = 0.02;
/// Base multiplicative shrink per frame at full progress and factor 1.
const SHRINK_RATE: f32 = 0.05;
/// Width of the multiplicative alpha jitter band (centered on 1.0).
const ALPHA_JITTER: f32 = 0.2;

/// A colored disk flying away from a burst bubble.
///
/// `angle` and `speed` are drawn once at creation and never change; they
/// define the particle's fixed ballistic direction and base velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgba8,
    pub alpha: f32,
    angle: f32,
    speed: f32,
}

impl Particle {
    pub fn new(pos: Vec2, radius: f32, color: Rgba8, angle: f32, speed: f32) -> Self {
        Self {
            pos,
            radius,
            color,
            alpha: 1.0,
            angle,
            speed,
        }
    }

    /// Fixed ballistic direction, radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Fixed base velocity.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advance one frame of the burst.
    ///
    /// Position accumulates a radial drive along the fixed angle plus a
    /// downward gravity bias that grows with progress squared. Radius
    /// shrinks multiplicatively and never goes negative. Alpha is set
    /// from progress, jittered, and clamped to [0, 1] last.
    pub fn scatter(
        &mut self,
        progress: f32,
        width: f32,
        height: f32,
        speed_factor: f32,
        size_factor: f32,
        alpha_factor: f32,
        rng: &mut Rng,
    ) {
        let drive = progress * self.speed * speed_factor * width / SPEED_SCALE;
        self.pos.x += drive * self.angle.cos();
        self.pos.y += drive * self.angle.sin();

        // The whole field sags over time regardless of heading.
        self.pos.y += progress * progress * height * GRAVITY_BIAS;

        self.radius = (self.radius * (1.0 - progress * size_factor * SHRINK_RATE)).max(0.0);

        let jitter = 1.0 + (rng.next_unit() - 0.5) * ALPHA_JITTER;
        self.alpha = ((1.0 - progress * alpha_factor) * jitter).clamp(0.0, 1.0);
    }
}
