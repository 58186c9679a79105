//! Simulation event types.
//!
//! Structured events emitted at the phase boundaries of each MPM time step.
//! Events are lightweight value types that carry just enough data to be
//! useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the engine.
///
/// Events are tagged with a step index and carry phase-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepEvent {
    /// Time-step number (0-indexed).
    pub step: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// Time step started.
    StepBegin {
        /// Step size (seconds).
        dt: f32,
    },

    /// Time step completed.
    StepEnd {
        /// Wall-clock time for the entire step (seconds).
        wall_time: f64,
    },

    /// Particle mass/momentum rasterization started.
    RasterizeBegin,

    /// Deformation-gradient / volume update started.
    ConstitutiveBegin {
        /// Step size (seconds).
        dt: f32,
    },

    /// Domain-corner and particle position advection started.
    PositionUpdateBegin {
        /// Step size (seconds).
        dt: f32,
    },

    /// FLIP-style particle velocity update started.
    VelocityUpdateBegin,

    /// Enrichment census after classification.
    Enrichment {
        /// Number of enriched domain corners, summed over objects.
        enriched_corners: u32,
        /// Total domain corners, summed over objects.
        total_corners: u32,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl StepEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u32, kind: EventKind) -> Self {
        Self { step, kind }
    }
}
