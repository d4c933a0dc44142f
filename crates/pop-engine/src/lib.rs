pub mod api;
pub mod core;
pub mod effects;
pub mod input;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use crate::api::engine::BubbleEngine;
pub use crate::api::types::{BubbleEvent, EffectParams, ParamError};
pub use crate::core::connector::{
    Connector, ConnectorState, Outline, ReleaseOutcome, DEFAULT_BREAK_DISTANCE_FACTOR,
};
pub use crate::core::shape::Circle;
pub use crate::effects::particle::Particle;
pub use crate::effects::rng::Rng;
pub use crate::effects::sampler::{ImageSample, Rgba8};
pub use crate::effects::strategy::{BurstStrategy, ParticleEffectStrategy};
pub use crate::input::queue::{InputQueue, PointerEvent};
pub use crate::renderer::primitives::{ParticleInstance, PathCommand, RenderBuffer};
