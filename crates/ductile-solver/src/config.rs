//! Solver configuration.

use serde::{Deserialize, Serialize};
use ductile_types::constants;
use ductile_types::Scalar;

/// Configuration for the invertible-MPM step pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Gravitational acceleration magnitude (m/s²), applied along -y.
    pub gravity: Scalar,

    /// Node/corner mass (and interpolation weight) below this threshold
    /// counts as "no influence" and is skipped, never divided by.
    pub mass_epsilon: Scalar,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gravity: constants::GRAVITY,
            mass_epsilon: constants::MASS_EPSILON,
        }
    }
}

impl SolverConfig {
    /// Creates a config with gravity disabled (useful for rest-state tests).
    pub fn without_gravity() -> Self {
        Self {
            gravity: 0.0,
            ..Default::default()
        }
    }
}
