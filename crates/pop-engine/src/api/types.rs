use std::fmt;

use serde::{Deserialize, Serialize};

/// Signals raised to the orchestration layer, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleEvent {
    /// The connector snapped and the pointer was released. The engine
    /// needs an image sample to seed particles; call
    /// `BubbleEngine::explode`.
    Broke,
    /// The burst finished. Safe to restore any substitute view and call
    /// `BubbleEngine::clear_status`.
    AnimationEnded,
}

/// Externally supplied burst parameters. Read-only during a running
/// episode; new values take effect on the next particle generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectParams {
    /// Grid dimension: the burst produces `particle_count²` particles.
    pub particle_count: u32,
    /// Burst duration in milliseconds. The engine itself is clock-less;
    /// the embedder maps this to per-frame progress values.
    pub duration_ms: u32,
    /// Scales the radial drive.
    pub speed_factor: f32,
    /// Scales the per-frame shrink.
    pub size_factor: f32,
    /// Scales the fade-out.
    pub alpha_factor: f32,
    /// Multiple of the moving radius at which the connector snaps.
    pub break_distance_factor: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            particle_count: 10,
            duration_ms: 1500,
            speed_factor: 1.5,
            size_factor: 0.8,
            alpha_factor: 1.2,
            break_distance_factor: 5.0,
        }
    }
}

impl EffectParams {
    /// Check the constraints every setter enforces: positive count and
    /// duration, non-negative factors, positive break distance.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.particle_count == 0 {
            return Err(ParamError::ZeroParticleCount);
        }
        if self.duration_ms == 0 {
            return Err(ParamError::ZeroDuration);
        }
        for (name, value) in [
            ("speed_factor", self.speed_factor),
            ("size_factor", self.size_factor),
            ("alpha_factor", self.alpha_factor),
        ] {
            if !(value >= 0.0) {
                return Err(ParamError::NegativeFactor { name, value });
            }
        }
        if !(self.break_distance_factor > 0.0) {
            return Err(ParamError::NonPositiveBreakDistance(
                self.break_distance_factor,
            ));
        }
        Ok(())
    }

    /// Load and validate parameters from a JSON document. Missing fields
    /// fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, ParamError> {
        let params: Self = serde_json::from_str(json).map_err(ParamError::Json)?;
        params.validate()?;
        Ok(params)
    }
}

/// Configuration errors. Rejected at set time; the prior valid values
/// stay in effect.
#[derive(Debug)]
pub enum ParamError {
    ZeroParticleCount,
    ZeroDuration,
    NegativeFactor { name: &'static str, value: f32 },
    NonPositiveBreakDistance(f32),
    Json(serde_json::Error),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::ZeroParticleCount => write!(f, "particle count must be positive"),
            ParamError::ZeroDuration => write!(f, "duration must be positive"),
            ParamError::NegativeFactor { name, value } => {
                write!(f, "{} must be non-negative, got {}", name, value)
            }
            ParamError::NonPositiveBreakDistance(value) => {
                write!(f, "break distance factor must be positive, got {}", value)
            }
            ParamError::Json(err) => write!(f, "invalid effect params JSON: {}", err),
        }
    }
}

impl std::error::Error for ParamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamError::Json(err) => Some(err),
            _ => None,
        }
    }
}
