//! Deformation-gradient integration with the inversion remedy, volume
//! update, and the per-particle stress refresh.

use ductile_types::{outer, DuctileError, DuctileResult, Matrix, Scalar, CORNER_NUM};

use crate::grid::BackgroundGrid;
use crate::state::{ObjectState, ParticleKind};

/// Advances one deformation gradient by forward Euler against the velocity
/// gradient `l`, switching to the second-order remedy when the plain update
/// would cross zero.
///
/// With `A = dt·L`: if `det(I + A) > 0` the plain update `F += A·F` is
/// safe. Otherwise `F += (A + A²/4)·F`, whose multiplier `I + A + A²/4 =
/// (I + A/2)²` has non-negative determinant, so the update can flatten the
/// gradient but never push its determinant through zero.
pub fn integrate_deformation_gradient(
    f: Matrix,
    velocity_gradient: Matrix,
    dt: Scalar,
) -> Matrix {
    let a = velocity_gradient * dt;
    if (Matrix::IDENTITY + a).determinant() > 0.0 {
        f + a * f
    } else {
        f + (a + 0.25 * a * a) * f
    }
}

/// Updates deformation gradients, volumes, and Cauchy stresses of every
/// particle from grid and enriched-corner velocities.
///
/// Fails with [`DuctileError::NonInvertibleDeformation`] if any updated
/// gradient ends the step with a non-positive determinant.
pub fn update_constitutive_state(
    objects: &mut [ObjectState],
    grid: &BackgroundGrid,
    dt: Scalar,
    mass_epsilon: Scalar,
) -> DuctileResult<()> {
    for (object_index, object) in objects.iter_mut().enumerate() {
        for p in 0..object.particle_count() {
            let kind = object.particle_kind(p);

            // Velocity gradient: grid part through the composed pairs,
            // enriched-corner part through the in-domain weight gradients.
            // Near-massless nodes hold no readable velocity and are skipped.
            let mut l = Matrix::ZERO;
            if kind != ParticleKind::Enriched {
                for pair in &object.grid_pairs[p] {
                    if grid.mass(object_index, pair.node) <= mass_epsilon {
                        continue;
                    }
                    l += outer(grid.velocity(object_index, pair.node), pair.gradient);
                }
            }
            for c in 0..CORNER_NUM {
                let corner = object.mesh.corner_index(p, c);
                if object.corner_enriched[corner] {
                    l += outer(
                        object.corner_velocity[corner],
                        object.corner_gradients[p][c],
                    );
                }
            }

            let particle = &mut object.particles[p];
            particle.deformation_gradient =
                integrate_deformation_gradient(particle.deformation_gradient, l, dt);

            let det = particle.deformation_gradient.determinant();
            if det <= 0.0 {
                return Err(DuctileError::NonInvertibleDeformation {
                    object: object_index,
                    particle: p,
                    det,
                });
            }
            particle.volume = det * particle.initial_volume;

            if let Some(material) = &object.material {
                particle.cauchy_stress = material.cauchy_stress(&particle.deformation_gradient);
            }
        }
    }
    Ok(())
}
