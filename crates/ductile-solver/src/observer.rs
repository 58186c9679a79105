//! Step observation hooks.
//!
//! Observers are notified at the start of each solver phase, letting hosts
//! splice in custom behavior (telemetry, debugging probes, scripted forcing)
//! without subclass-style overrides of the phases themselves.

use ductile_telemetry::{EventBus, EventKind, StepEvent};
use ductile_types::Scalar;

/// Receives a callback at the start of each phase of a solver step.
///
/// All methods default to no-ops; implement only the phases of interest.
pub trait StepObserver: Send {
    /// Start of particle-to-grid (and corner) rasterization.
    fn on_rasterize(&mut self, step: u32) {
        let _ = step;
    }

    /// Start of the constitutive update.
    fn on_constitutive_update(&mut self, step: u32, dt: Scalar) {
        let _ = (step, dt);
    }

    /// Start of position advection.
    fn on_position_update(&mut self, step: u32, dt: Scalar) {
        let _ = (step, dt);
    }

    /// Start of velocity interpolation back to particles.
    fn on_velocity_update(&mut self, step: u32) {
        let _ = step;
    }

    fn name(&self) -> &str;
}

/// Forwards phase starts to a telemetry [`EventBus`].
pub struct TelemetryObserver {
    bus: EventBus,
}

impl TelemetryObserver {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    /// Drains queued events into the bus sinks.
    pub fn flush(&mut self) {
        self.bus.flush();
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }
}

impl StepObserver for TelemetryObserver {
    fn on_rasterize(&mut self, step: u32) {
        self.bus.emit(StepEvent {
            step,
            kind: EventKind::RasterizeBegin,
        });
    }

    fn on_constitutive_update(&mut self, step: u32, dt: Scalar) {
        self.bus.emit(StepEvent {
            step,
            kind: EventKind::ConstitutiveBegin { dt },
        });
    }

    fn on_position_update(&mut self, step: u32, dt: Scalar) {
        self.bus.emit(StepEvent {
            step,
            kind: EventKind::PositionUpdateBegin { dt },
        });
    }

    fn on_velocity_update(&mut self, step: u32) {
        self.bus.emit(StepEvent {
            step,
            kind: EventKind::VelocityUpdateBegin,
        });
        self.bus.flush();
    }

    fn name(&self) -> &str {
        "telemetry"
    }
}
