//! # ductile-telemetry
//!
//! Event bus for simulation telemetry. Emits structured events at the step
//! boundaries of the MPM pipeline (rasterization, constitutive update,
//! advection) that can be consumed by pluggable sinks (test buffers,
//! `tracing`, file export, etc.).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, StepEvent};
