//! Drawable primitives handed to the external renderer each frame.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::core::connector::Outline;
use crate::core::shape::Circle;
use crate::effects::particle::Particle;

/// One step of the connector outline path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Quadratic bezier through `ctrl` to `to`.
    QuadTo { ctrl: Vec2, to: Vec2 },
}

/// Per-particle render data, 8 floats = 32 bytes stride, so an external
/// renderer can consume the buffer as raw `f32`s.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct ParticleInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Disk radius in world units.
    pub radius: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Red, normalized.
    pub r: f32,
    /// Green, normalized.
    pub g: f32,
    /// Blue, normalized.
    pub b: f32,
    /// Padding to the 8-float stride.
    pub _pad: f32,
}

impl ParticleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_particle(particle: &Particle) -> Self {
        let [r, g, b, _] = particle.color.to_f32();
        Self {
            x: particle.pos.x,
            y: particle.pos.y,
            radius: particle.radius,
            alpha: particle.alpha,
            r,
            g,
            b,
            _pad: 0.0,
        }
    }
}

/// Everything the renderer needs for one frame: the connector outline as
/// path commands, the circle disks, and the particle instances.
pub struct RenderBuffer {
    pub path: Vec<PathCommand>,
    pub circles: Vec<Circle>,
    pub particles: Vec<ParticleInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            path: Vec::with_capacity(8),
            circles: Vec::with_capacity(2),
            particles: Vec::with_capacity(256),
        }
    }

    pub fn clear(&mut self) {
        self.path.clear();
        self.circles.clear();
        self.particles.clear();
    }

    /// Append the closed connector silhouette: A→B straight, B→C curved
    /// through E, C→D straight, D→A curved back through E.
    pub fn push_outline(&mut self, outline: &Outline) {
        self.path.push(PathCommand::MoveTo(outline.a));
        self.path.push(PathCommand::LineTo(outline.b));
        self.path.push(PathCommand::QuadTo {
            ctrl: outline.e,
            to: outline.c,
        });
        self.path.push(PathCommand::LineTo(outline.d));
        self.path.push(PathCommand::QuadTo {
            ctrl: outline.e,
            to: outline.a,
        });
    }

    pub fn particle_count(&self) -> u32 {
        self.particles.len() as u32
    }

    /// Raw pointer to particle data for zero-copy renderer reads.
    pub fn particles_ptr(&self) -> *const f32 {
        self.particles.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::sampler::Rgba8;

    #[test]
    fn particle_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
        assert_eq!(ParticleInstance::FLOATS, 8);
    }

    #[test]
    fn from_particle_normalizes_color() {
        let p = Particle::new(
            Vec2::new(3.0, 4.0),
            2.0,
            Rgba8::new(255, 0, 0, 255),
            0.0,
            1.0,
        );
        let inst = ParticleInstance::from_particle(&p);
        assert_eq!(inst.x, 3.0);
        assert_eq!(inst.y, 4.0);
        assert_eq!(inst.r, 1.0);
        assert_eq!(inst.g, 0.0);
        assert_eq!(inst.alpha, 1.0);
    }

    #[test]
    fn outline_becomes_five_commands() {
        let outline = Outline {
            a: Vec2::new(0.0, 0.0),
            b: Vec2::new(1.0, 0.0),
            c: Vec2::new(1.0, 5.0),
            d: Vec2::new(0.0, 5.0),
            e: Vec2::new(0.5, 2.5),
        };
        let mut buf = RenderBuffer::new();
        buf.push_outline(&outline);
        assert_eq!(buf.path.len(), 5);
        assert_eq!(buf.path[0], PathCommand::MoveTo(outline.a));
        assert_eq!(
            buf.path[4],
            PathCommand::QuadTo {
                ctrl: outline.e,
                to: outline.a
            }
        );
    }

    #[test]
    fn clear_empties_everything() {
        let mut buf = RenderBuffer::new();
        buf.circles.push(Circle::new(0.0, 0.0, 1.0));
        buf.particles.push(ParticleInstance::default());
        buf.clear();
        assert!(buf.path.is_empty());
        assert!(buf.circles.is_empty());
        assert_eq!(buf.particle_count(), 0);
    }
}
