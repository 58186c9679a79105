//! Dimension aliases and small tensor helpers.
//!
//! The solver is written against these aliases rather than concrete `glam`
//! types. This is the 2D instantiation (quad particle domains); the aliases
//! keep solver code readable as dimension-agnostic MPM.

use crate::scalar::Scalar;

pub use glam::{IVec2, Mat2, UVec2, Vec2};

/// Spatial dimension of this build.
pub const DIM: usize = 2;

/// Corners per particle domain (`2^DIM`: 4 for quads, 8 for hexahedra).
pub const CORNER_NUM: usize = 1 << DIM;

/// Spatial vector type.
pub type Vector = Vec2;

/// Square matrix type (velocity gradient, deformation gradient, stress).
pub type Matrix = Mat2;

/// Outer product `a ⊗ b`, where `(a ⊗ b)[i][j] = a[i] * b[j]`.
///
/// Used to assemble velocity gradients from velocity/weight-gradient pairs.
#[inline]
pub fn outer(a: Vector, b: Vector) -> Matrix {
    Matrix::from_cols(a * b.x, a * b.y)
}

/// Trace of a square matrix.
#[inline]
pub fn trace(m: &Matrix) -> Scalar {
    m.x_axis.x + m.y_axis.y
}
