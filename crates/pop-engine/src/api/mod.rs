pub mod engine;
pub mod types;

pub use engine::BubbleEngine;
pub use types::{BubbleEvent, EffectParams, ParamError};
