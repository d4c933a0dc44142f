//! Orchestration glue: wires pointer events into the connector, frame
//! progress into the particle strategy, and raises the break/end signals
//! the embedder reacts to.

use log::debug;

use crate::api::types::{BubbleEvent, EffectParams, ParamError};
use crate::core::connector::{Connector, ConnectorState, Outline, ReleaseOutcome};
use crate::core::shape::Circle;
use crate::effects::particle::Particle;
use crate::effects::sampler::ImageSample;
use crate::effects::strategy::{BurstStrategy, ParticleEffectStrategy};
use crate::input::queue::{InputQueue, PointerEvent};
use crate::renderer::primitives::{ParticleInstance, RenderBuffer};

/// Seed for the default strategy's RNG. Embedders wanting a different
/// stream construct their own strategy.
const DEFAULT_SEED: u64 = 42;

/// One bubble's simulation: the elastic connector plus the particle
/// burst that replaces it after a break.
///
/// The engine is clock-less and single-threaded. The embedder drains
/// pointer events into it, asks it to `explode` with an image sample
/// when it signals [`BubbleEvent::Broke`], drives the burst with
/// `step(progress)` once per frame, and calls `clear_status` after
/// [`BubbleEvent::AnimationEnded`].
pub struct BubbleEngine {
    connector: Connector,
    strategy: Box<dyn ParticleEffectStrategy>,
    particles: Vec<Particle>,
    can_draw_particle: bool,
    animation_done: bool,
    events: Vec<BubbleEvent>,
    view_width: f32,
    view_height: f32,
}

impl BubbleEngine {
    pub fn new() -> Self {
        Self::with_strategy(Box::new(BurstStrategy::new(DEFAULT_SEED)))
    }

    /// Swap in an alternative burst feel.
    pub fn with_strategy(strategy: Box<dyn ParticleEffectStrategy>) -> Self {
        Self {
            connector: Connector::new(),
            strategy,
            particles: Vec::new(),
            can_draw_particle: false,
            animation_done: false,
            events: Vec::new(),
            view_width: 0.0,
            view_height: 0.0,
        }
    }

    /// Set up the resting bubble for a view of the given size.
    pub fn init(&mut self, width: f32, height: f32) {
        self.view_width = width;
        self.view_height = height;
        self.connector.init(width, height);
        self.particles.clear();
        self.can_draw_particle = false;
        self.animation_done = false;
        self.events.clear();
    }

    /// Drain all pending pointer events into the simulation.
    pub fn process_input(&mut self, input: &mut InputQueue) {
        for event in input.drain() {
            self.handle_pointer(event);
        }
    }

    /// Feed a single pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            // Snapshotting for the sampler happens outside the engine.
            PointerEvent::Down { .. } => {}
            PointerEvent::Move { x, y } => self.connector.pointer_move(x, y),
            PointerEvent::Up => {
                let outcome = self.connector.pointer_up();
                self.finish_gesture(outcome);
            }
            PointerEvent::Cancel => {
                let outcome = self.connector.pointer_cancel();
                self.finish_gesture(outcome);
            }
        }
    }

    fn finish_gesture(&mut self, outcome: ReleaseOutcome) {
        // A release during an already-running burst must not re-signal.
        if outcome == ReleaseOutcome::Broke && !self.can_draw_particle {
            debug!("bubble broke, awaiting image sample");
            self.events.push(BubbleEvent::Broke);
        }
    }

    /// Seed the particle field from a sampled image of the bubble and
    /// enter the burst phase. Called by the embedder in response to
    /// [`BubbleEvent::Broke`].
    pub fn explode(&mut self, sample: &ImageSample) {
        let moving = self.connector.moving();
        self.particles = self.strategy.generate_particles(
            sample,
            moving.center.x,
            moving.center.y,
            moving.radius,
        );
        self.can_draw_particle = true;
        self.animation_done = false;
        self.connector.begin_explosion();
        debug!("burst started with {} particles", self.particles.len());
    }

    /// Advance the burst to `progress` in [0, 1]. Emits
    /// [`BubbleEvent::AnimationEnded`] exactly once when progress
    /// reaches 1.
    pub fn step(&mut self, progress: f32) {
        if !self.can_draw_particle || self.animation_done {
            return;
        }
        self.strategy.update_particles(
            &mut self.particles,
            progress,
            self.view_width,
            self.view_height,
        );
        if progress >= 1.0 {
            self.animation_done = true;
            self.events.push(BubbleEvent::AnimationEnded);
            debug!("burst finished");
        }
    }

    /// Reset to the resting bubble, discarding any particles.
    /// Idempotent and callable at any state.
    pub fn clear_status(&mut self) {
        self.connector.clear_status();
        self.particles.clear();
        self.can_draw_particle = false;
        self.animation_done = false;
    }

    /// Take the signals raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<BubbleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a full parameter set: the strategy takes the burst
    /// parameters and the connector the break distance. Rejected values
    /// leave everything unchanged.
    pub fn set_effect_params(&mut self, params: EffectParams) -> Result<(), ParamError> {
        self.strategy.set_effect_params(params)?;
        self.connector
            .set_break_distance_factor(params.break_distance_factor);
        Ok(())
    }

    pub fn set_break_distance_factor(&mut self, factor: f32) {
        self.connector.set_break_distance_factor(factor);
    }

    pub fn effect_params(&self) -> &EffectParams {
        self.strategy.params()
    }

    // -- Read-only queries for the renderer --

    pub fn anchor(&self) -> Circle {
        self.connector.anchor()
    }

    pub fn moving(&self) -> Circle {
        self.connector.moving()
    }

    pub fn can_draw_path(&self) -> bool {
        self.connector.can_draw_path()
    }

    pub fn outline(&self) -> Option<Outline> {
        self.connector.outline()
    }

    pub fn can_draw_particle(&self) -> bool {
        self.can_draw_particle
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn state(&self) -> ConnectorState {
        self.connector.state()
    }

    /// Fill the render buffer with this frame's drawables, in draw
    /// order: connector outline and anchor while the connector holds,
    /// then either the particle field or the foreground disk.
    pub fn render(&self, buf: &mut RenderBuffer) {
        buf.clear();

        if let Some(outline) = self.connector.outline() {
            buf.push_outline(&outline);
            buf.circles.push(self.connector.anchor());
        }

        if self.can_draw_particle {
            buf.particles.extend(
                self.particles
                    .iter()
                    .map(ParticleInstance::from_particle),
            );
        } else {
            buf.circles.push(self.connector.moving());
        }
    }
}

impl Default for BubbleEngine {
    fn default() -> Self {
        Self::new()
    }
}
