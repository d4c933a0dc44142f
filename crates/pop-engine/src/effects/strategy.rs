//! Particle effect strategies.
//!
//! A strategy turns a sampled image of the bubble into an initial
//! particle field and advances that field once per frame from a progress
//! value in [0, 1]. Alternative burst "feels" are separate
//! implementations of [`ParticleEffectStrategy`], not variations of
//! shared mutable state.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use log::warn;

use crate::api::types::{EffectParams, ParamError};
use crate::effects::particle::Particle;
use crate::effects::rng::Rng;
use crate::effects::sampler::ImageSample;

/// Base velocity range particles draw from at creation.
const SPEED_RANGE: (f32, f32) = (2.0, 8.0);
/// Particle diameter factor relative to the naive grid cell.
const DIAMETER_FACTOR: f32 = 2.2;

/// Converts an image sample into particles and animates their dispersal.
pub trait ParticleEffectStrategy {
    /// Build the initial particle field for a bubble centered at
    /// (cx, cy) with the given radius. Produces exactly
    /// `particle_count²` particles.
    fn generate_particles(
        &mut self,
        sample: &ImageSample,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Vec<Particle>;

    /// Advance all particles to the given progress in [0, 1].
    /// Out-of-range progress is clamped.
    fn update_particles(
        &mut self,
        particles: &mut [Particle],
        progress: f32,
        width: f32,
        height: f32,
    );

    /// Replace the effect parameters. Takes effect on the next
    /// `generate_particles` call; an in-flight field is not altered.
    fn set_effect_params(&mut self, params: EffectParams) -> Result<(), ParamError>;

    /// The currently active parameters.
    fn params(&self) -> &EffectParams;
}

/// The default burst: an N×N grid of image-colored disks flying apart on
/// fixed ballistic headings, with wave drift and an early pulse layered
/// on top.
pub struct BurstStrategy {
    params: EffectParams,
    rng: Rng,
}

impl BurstStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            params: EffectParams::default(),
            rng: Rng::new(seed),
        }
    }

    /// Per-particle frame update. The radius pipeline is shrink (inside
    /// `scatter`), then pulse, then the clamp at zero.
    fn update_particle(&mut self, particle: &mut Particle, progress: f32, width: f32, height: f32) {
        let wave = (progress * 6.0 * PI).sin() * (1.0 - progress) * width * 0.02;

        // Small random spread on top of the configured speed keeps the
        // field from expanding as one rigid shell.
        let speed_factor = self.params.speed_factor * (1.0 + self.rng.next_unit() * 0.5);
        particle.scatter(
            progress,
            width,
            height,
            speed_factor,
            self.params.size_factor,
            self.params.alpha_factor,
            &mut self.rng,
        );

        particle.pos.x += wave * (self.rng.next_unit() - 0.5);
        particle.pos.y += wave * (self.rng.next_unit() - 0.5);

        if progress < 0.6 {
            let pulse = (progress * 12.0 * PI).sin() * 0.15 + 1.0;
            particle.radius = (particle.radius * pulse).max(0.0);
        }

        // Occasional late shudder.
        if self.rng.next_unit() > 0.9 && progress > 0.4 {
            particle.pos.x += (self.rng.next_unit() - 0.5) * width * 0.03 * progress;
            particle.pos.y += (self.rng.next_unit() - 0.5) * height * 0.03 * progress;
        }
    }
}

impl ParticleEffectStrategy for BurstStrategy {
    fn generate_particles(
        &mut self,
        sample: &ImageSample,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Vec<Particle> {
        let count = self.params.particle_count as usize;
        debug_assert!(count > 0, "particle count validated at set time");

        let particle_radius = radius * DIAMETER_FACTOR / count as f32 / 2.0;
        let mut particles = Vec::with_capacity(count * count);

        for i in 0..count {
            for j in 0..count {
                // Loosen the grid a little so the field doesn't read as
                // graph paper.
                let offset_x = (self.rng.next_unit() - 0.5) * particle_radius;
                let offset_y = (self.rng.next_unit() - 0.5) * particle_radius;
                let x = cx - radius + i as f32 * particle_radius * 2.0 + offset_x;
                let y = cy - radius + j as f32 * particle_radius * 2.0 + offset_y;

                let color = sample.color_at(
                    sample.width() / count * i,
                    sample.height() / count * j,
                );

                // Edge particles are a little larger than center ones.
                let distance_from_center = Vec2::new(x - cx, y - cy).length();
                let size_multiplier = 1.0 + distance_from_center / radius * 0.3;

                let angle = self.rng.next_unit() * TAU;
                let speed = self.rng.next_range(SPEED_RANGE.0, SPEED_RANGE.1);

                let mut particle = Particle::new(
                    Vec2::new(x, y),
                    particle_radius * size_multiplier,
                    color,
                    angle,
                    speed,
                );

                // A few particles start pre-faded for variety.
                if self.rng.next_unit() > 0.85 {
                    particle.alpha = 0.7 + self.rng.next_unit() * 0.3;
                }

                particles.push(particle);
            }
        }

        particles
    }

    fn update_particles(
        &mut self,
        particles: &mut [Particle],
        progress: f32,
        width: f32,
        height: f32,
    ) {
        let progress = if (0.0..=1.0).contains(&progress) {
            progress
        } else {
            warn!("progress {} outside [0, 1], clamping", progress);
            progress.clamp(0.0, 1.0)
        };

        // Front-load the motion so the burst pops instead of ramping up.
        let adjusted = progress.powf(0.8);

        for particle in particles {
            self.update_particle(particle, adjusted, width, height);
        }
    }

    fn set_effect_params(&mut self, params: EffectParams) -> Result<(), ParamError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    fn params(&self) -> &EffectParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::sampler::Rgba8;

    fn strategy() -> BurstStrategy {
        BurstStrategy::new(42)
    }

    fn sample() -> ImageSample {
        ImageSample::solid(64, 64, Rgba8::new(200, 40, 40, 255))
    }

    #[test]
    fn generates_count_squared_particles() {
        for count in [1u32, 10, 30] {
            let mut s = strategy();
            s.set_effect_params(EffectParams {
                particle_count: count,
                ..Default::default()
            })
            .unwrap();
            let particles = s.generate_particles(&sample(), 100.0, 100.0, 50.0);
            assert_eq!(particles.len(), (count * count) as usize);
        }
    }

    #[test]
    fn particles_take_colors_from_the_sample() {
        let mut s = strategy();
        let particles = s.generate_particles(&sample(), 100.0, 100.0, 50.0);
        assert!(particles
            .iter()
            .all(|p| p.color == Rgba8::new(200, 40, 40, 255)));
    }

    #[test]
    fn grid_covers_the_bubble_square() {
        let mut s = strategy();
        let particles = s.generate_particles(&sample(), 100.0, 100.0, 50.0);
        // All particles start near the square of side 2 * radius; the
        // random grid offset is at most half a particle radius.
        for p in &particles {
            assert!(p.pos.x > 40.0 && p.pos.x < 170.0, "x was {}", p.pos.x);
            assert!(p.pos.y > 40.0 && p.pos.y < 170.0, "y was {}", p.pos.y);
        }
    }

    #[test]
    fn fade_is_monotonic_over_the_burst() {
        let mut s = strategy();
        let mut particles = s.generate_particles(&sample(), 100.0, 100.0, 50.0);
        let start_alpha = particles[0].alpha;

        for progress in [0.0, 0.25, 0.5, 0.75, 1.0] {
            s.update_particles(&mut particles, progress, 200.0, 200.0);
        }
        assert!(
            particles[0].alpha <= start_alpha,
            "alpha rose from {} to {}",
            start_alpha,
            particles[0].alpha
        );
        // Default alpha factor of 1.2 fades out completely by the end.
        assert_eq!(particles[0].alpha, 0.0);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let mut s = strategy();
        let mut particles = s.generate_particles(&sample(), 100.0, 100.0, 50.0);
        s.update_particles(&mut particles, 7.5, 200.0, 200.0);
        s.update_particles(&mut particles, -3.0, 200.0, 200.0);
        for p in &particles {
            assert!((0.0..=1.0).contains(&p.alpha));
            assert!(p.radius >= 0.0);
        }
    }

    #[test]
    fn rejected_params_leave_previous_values_in_effect() {
        let mut s = strategy();
        let err = s.set_effect_params(EffectParams {
            particle_count: 0,
            ..Default::default()
        });
        assert!(err.is_err());
        assert_eq!(s.params().particle_count, 10);
    }

    #[test]
    fn same_seed_generates_identical_fields() {
        let mut a = BurstStrategy::new(7);
        let mut b = BurstStrategy::new(7);
        let pa = a.generate_particles(&sample(), 100.0, 100.0, 50.0);
        let pb = b.generate_particles(&sample(), 100.0, 100.0, 50.0);
        assert_eq!(pa, pb);
    }
}
