//! Error types for the Ductile engine.
//!
//! All crates return `DuctileResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Ductile engine.
#[derive(Debug, Error)]
pub enum DuctileError {
    /// Particle-domain mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid (e.g. a non-CPDI2 update method,
    /// or more objects than the occupancy table supports).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The deformation gradient lost invertibility even after the
    /// second-order remedy. The step cannot produce physically valid
    /// output for this particle; there is no local recovery.
    #[error(
        "Deformation gradient of particle {particle} in object {object} \
         is no longer invertible (det = {det:.3e})"
    )]
    NonInvertibleDeformation {
        /// Owning object index.
        object: usize,
        /// Particle index within the object.
        particle: usize,
        /// Offending determinant.
        det: f32,
    },

    /// A simulation invariant was violated.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, DuctileError>`.
pub type DuctileResult<T> = Result<T, DuctileError>;
