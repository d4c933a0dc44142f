/// Pointer event types the engine understands.
/// Coordinates are in the same space as the circles; the platform layer
/// does the translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A press began at (x, y). The engine ignores it; the embedder uses
    /// it to snapshot the bubble for the image sampler.
    Down { x: f32, y: f32 },
    /// The pointer moved to (x, y).
    Move { x: f32, y: f32 },
    /// The pointer was released.
    Up,
    /// The gesture was cancelled by the platform.
    Cancel,
}

/// A queue of pointer events.
/// The platform layer writes events in; the engine drains them each frame.
pub struct InputQueue {
    events: Vec<PointerEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new pointer event (called from the platform layer).
    pub fn push(&mut self, event: PointerEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &PointerEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
