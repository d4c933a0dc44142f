pub mod primitives;

pub use primitives::{ParticleInstance, PathCommand, RenderBuffer};
