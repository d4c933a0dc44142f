//! Particle burst system: RNG, image sampling, the particle model, and
//! the swappable effect strategies that drive it.

pub mod particle;
pub mod rng;
pub mod sampler;
pub mod strategy;

pub use particle::Particle;
pub use rng::Rng;
pub use sampler::{ImageSample, Rgba8};
pub use strategy::{BurstStrategy, ParticleEffectStrategy};
