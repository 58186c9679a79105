//! Physical elasticity parameters.
//!
//! These are the measurable quantities (Young's modulus, Poisson's ratio,
//! density) that map to the Lamé coefficients the constitutive models use.

use serde::{Deserialize, Serialize};
use ductile_types::Scalar;

/// Physical properties of an elastic solid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticProperties {
    /// Human-readable name (e.g., "Soft rubber").
    pub name: String,

    /// Young's modulus in Pa. Higher = stiffer.
    pub youngs_modulus: Scalar,

    /// Poisson's ratio (dimensionless, in `[0, 0.5)`).
    /// Values near 0.5 approach incompressibility.
    pub poisson_ratio: Scalar,

    /// Mass density in kg/m³.
    pub density: Scalar,
}

impl ElasticProperties {
    /// First Lamé parameter λ.
    pub fn lame_lambda(&self) -> Scalar {
        self.youngs_modulus * self.poisson_ratio
            / ((1.0 + self.poisson_ratio) * (1.0 - 2.0 * self.poisson_ratio))
    }

    /// Second Lamé parameter μ (shear modulus).
    pub fn lame_mu(&self) -> Scalar {
        self.youngs_modulus / (2.0 * (1.0 + self.poisson_ratio))
    }

    /// A soft, rubber-like reference material.
    pub fn soft_rubber() -> Self {
        Self {
            name: "Soft rubber".into(),
            youngs_modulus: 1.0e5,
            poisson_ratio: 0.4,
            density: 1100.0,
        }
    }
}
