//! Small-strain linear elastic constitutive model.
//!
//! Strain: `ε = ½(F + Fᵀ) − I`; stress: `σ = 2με + λ·tr(ε)·I`.
//!
//! Linear elasticity measures strain in the world frame, so rigid rotations
//! show up as spurious strain. Useful as a baseline and for validation
//! against analytic small-deformation solutions; use
//! [`NeoHookean`](crate::NeoHookean) for large-deformation runs.

use ductile_types::math::trace;
use ductile_types::{Matrix, Scalar};

use crate::properties::ElasticProperties;
use crate::traits::ConstitutiveModel;

/// Small-strain linear elastic material.
#[derive(Debug, Clone)]
pub struct LinearElastic {
    /// First Lamé parameter λ.
    pub lambda: Scalar,
    /// Shear modulus μ.
    pub mu: Scalar,
}

impl LinearElastic {
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

impl ConstitutiveModel for LinearElastic {
    fn cauchy_stress(&self, deformation_gradient: &Matrix) -> Matrix {
        let f = *deformation_gradient;
        let strain = (f + f.transpose()) * 0.5 - Matrix::IDENTITY;

        strain * (2.0 * self.mu) + Matrix::IDENTITY * (self.lambda * trace(&strain))
    }

    fn name(&self) -> &str {
        "linear_elastic"
    }
}
