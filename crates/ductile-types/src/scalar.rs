//! Scalar type alias for the simulation.
//!
//! Using `f32` throughout keeps the solver cache-friendly and matches the
//! `glam` single-precision types. This alias makes it easy to experiment
//! with `f64` precision if needed.

/// The floating-point type used throughout the simulation.
pub type Scalar = f32;
