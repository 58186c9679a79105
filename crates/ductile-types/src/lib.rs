//! # ductile-types
//!
//! Shared types, error types, and physical constants for the Ductile
//! invertible-MPM engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Ductile crates share.

pub mod constants;
pub mod error;
pub mod math;
pub mod scalar;

pub use error::{DuctileError, DuctileResult};
pub use math::{outer, Matrix, Vector, CORNER_NUM, DIM};
pub use scalar::Scalar;
