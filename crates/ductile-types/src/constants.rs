//! Physical constants and simulation defaults.

/// Gravitational acceleration magnitude (m/s²), applied along -y.
pub const GRAVITY: f32 = 9.81;

/// Default simulation timestep (seconds).
pub const DEFAULT_DT: f32 = 1.0 / 120.0;

/// Epsilon below which node/corner mass and interpolation weights count as
/// "no influence" and are skipped rather than divided by.
pub const MASS_EPSILON: f32 = 1.0e-7;

/// Maximum number of simultaneously simulated objects.
///
/// The active-grid-node occupancy table stores the objects present at a node
/// as a 64-bit mask, so the solver rejects additional objects past this.
pub const MAX_OBJECTS: usize = 64;
