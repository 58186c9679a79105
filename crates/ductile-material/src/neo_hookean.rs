//! Compressible Neo-Hookean constitutive model.
//!
//! Cauchy stress: `σ = (μ/J)(F·Fᵀ − I) + (λ·ln J / J)·I` with `J = det F`.
//! Stress stays finite for any `J > 0`, which is what the invertible solver
//! needs: the deformation-gradient integrator guarantees `J > 0` even under
//! extreme compression, and this model rewards it with a usable stress there.

use ductile_types::{Matrix, Scalar};

use crate::properties::ElasticProperties;
use crate::traits::ConstitutiveModel;

/// Compressible Neo-Hookean material.
#[derive(Debug, Clone)]
pub struct NeoHookean {
    /// First Lamé parameter λ.
    pub lambda: Scalar,
    /// Shear modulus μ.
    pub mu: Scalar,
}

impl NeoHookean {
    /// Creates a model directly from Lamé coefficients.
    pub fn new(lambda: Scalar, mu: Scalar) -> Self {
        Self { lambda, mu }
    }

    /// Creates a model from measurable elastic properties.
    pub fn from_properties(properties: &ElasticProperties) -> Self {
        Self {
            lambda: properties.lame_lambda(),
            mu: properties.lame_mu(),
        }
    }
}

impl ConstitutiveModel for NeoHookean {
    fn cauchy_stress(&self, deformation_gradient: &Matrix) -> Matrix {
        let f = *deformation_gradient;
        let j = f.determinant();
        let b = f * f.transpose(); // left Cauchy-Green tensor

        (b - Matrix::IDENTITY) * (self.mu / j) + Matrix::IDENTITY * (self.lambda * j.ln() / j)
    }

    fn name(&self) -> &str {
        "neo_hookean"
    }
}
