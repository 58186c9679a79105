//! Convected-particle domain interpolation (CPDI2) over bilinear quad
//! domains.
//!
//! Each particle's in-domain corner weights are the bilinear shape
//! functions of its deformed quad, integrated over the domain with 2×2
//! Gauss quadrature and normalized by the domain volume. Because the quad
//! shape functions are a partition of unity pointwise, the averaged weights
//! sum to one and the averaged gradients sum to zero exactly, whatever
//! shape the domain has been convected into.

use ductile_types::{Matrix, Scalar, Vector, CORNER_NUM};

use crate::state::ObjectState;

/// Strategy updating particle-domain interpolation each step.
///
/// The solver composes particle-to-grid transfers through these in-domain
/// corner weights, so the method also owns the position update of the
/// particle inside its domain.
pub trait DomainUpdateMethod: Send + Sync {
    /// Whether the method exposes per-corner weights suitable for domain
    /// corner enrichment. The invertible solver requires this.
    fn supports_domain_enrichment(&self) -> bool;

    /// Recomputes `corner_weights` and `corner_gradients` for every
    /// particle of `object` from the current domain shapes.
    fn update_corner_weights(&self, object: &mut ObjectState);

    /// Moves each particle to its interpolated position inside its updated
    /// domain. Dirichlet particles are left where their prescription put
    /// them.
    fn update_particle_positions(&self, object: &mut ObjectState, dt: Scalar);

    fn name(&self) -> &str;
}

/// Gauss point abscissa for 2-point quadrature on [-1, 1].
const GAUSS_ABSCISSA: Scalar = 0.577_350_26;

/// Reference coordinates of the quad corners, in the domain corner order
/// (-,-), (+,-), (+,+), (-,+).
const CORNER_XI: [[Scalar; 2]; CORNER_NUM] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

/// Bilinear shape function of corner `c` at reference point `(xi, eta)`.
#[inline]
fn shape(c: usize, xi: Scalar, eta: Scalar) -> Scalar {
    0.25 * (1.0 + CORNER_XI[c][0] * xi) * (1.0 + CORNER_XI[c][1] * eta)
}

/// Reference-space gradient of the shape function of corner `c`.
#[inline]
fn shape_gradient(c: usize, xi: Scalar, eta: Scalar) -> Vector {
    Vector::new(
        0.25 * CORNER_XI[c][0] * (1.0 + CORNER_XI[c][1] * eta),
        0.25 * CORNER_XI[c][1] * (1.0 + CORNER_XI[c][0] * xi),
    )
}

/// The CPDI2 domain update.
pub struct Cpdi2;

impl Cpdi2 {
    /// Domain-averaged corner weights and gradients for one quad domain.
    pub fn corner_weights(
        corners: &[Vector; CORNER_NUM],
    ) -> ([Scalar; CORNER_NUM], [Vector; CORNER_NUM]) {
        let mut volume = 0.0;
        let mut weights = [0.0; CORNER_NUM];
        let mut gradients = [Vector::ZERO; CORNER_NUM];

        for &gx in &[-GAUSS_ABSCISSA, GAUSS_ABSCISSA] {
            for &gy in &[-GAUSS_ABSCISSA, GAUSS_ABSCISSA] {
                // Jacobian of the bilinear map at this Gauss point.
                let mut jacobian = Matrix::ZERO;
                for c in 0..CORNER_NUM {
                    let dn = shape_gradient(c, gx, gy);
                    jacobian += Matrix::from_cols(corners[c] * dn.x, corners[c] * dn.y);
                }
                let det = jacobian.determinant();
                let inv_t = jacobian.inverse().transpose();

                volume += det;
                for c in 0..CORNER_NUM {
                    weights[c] += det * shape(c, gx, gy);
                    gradients[c] += det * (inv_t * shape_gradient(c, gx, gy));
                }
            }
        }

        let inv_volume = 1.0 / volume;
        for c in 0..CORNER_NUM {
            weights[c] *= inv_volume;
            gradients[c] *= inv_volume;
        }
        (weights, gradients)
    }
}

impl DomainUpdateMethod for Cpdi2 {
    fn supports_domain_enrichment(&self) -> bool {
        true
    }

    fn update_corner_weights(&self, object: &mut ObjectState) {
        for p in 0..object.particle_count() {
            let (weights, gradients) = Self::corner_weights(&object.domains[p]);
            object.corner_weights[p] = weights;
            object.corner_gradients[p] = gradients;
        }
    }

    fn update_particle_positions(&self, object: &mut ObjectState, _dt: Scalar) {
        for p in 0..object.particle_count() {
            if object.dirichlet_particles[p] {
                continue;
            }
            let mut position = Vector::ZERO;
            for c in 0..CORNER_NUM {
                position += object.corner_weights[p][c] * object.domains[p][c];
            }
            object.particles[p].position = position;
        }
    }

    fn name(&self) -> &str {
        "cpdi2"
    }
}
