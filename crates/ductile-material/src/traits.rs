//! Constitutive model trait — the core material abstraction.
//!
//! Every material model implements this trait, enabling the solver to swap
//! material behavior without changing its update logic.

use ductile_types::Matrix;

/// Trait for constitutive models (material behavior).
///
/// Implementations define how a particle's deformation gradient maps to its
/// Cauchy stress. The solver calls [`cauchy_stress`](Self::cauchy_stress)
/// after each deformation-gradient update; the internal-force pass then
/// rasterizes the divergence of that stress to grid nodes and enriched
/// domain corners.
///
/// # Strategy Pattern
///
/// This trait enables runtime swapping of material models:
/// - [`LinearElastic`](crate::LinearElastic) — simple, fast, breaks under
///   large rotations
/// - [`NeoHookean`](crate::NeoHookean) — handles large deformation and
///   near-inversion, production default
pub trait ConstitutiveModel: Send + Sync {
    /// Computes the Cauchy stress at the given deformation gradient.
    ///
    /// Callers guarantee `det(deformation_gradient) > 0`; the solver's
    /// deformation-gradient integrator enforces that invariant.
    fn cauchy_stress(&self, deformation_gradient: &Matrix) -> Matrix;

    /// Returns the name of this constitutive model.
    fn name(&self) -> &str;
}
