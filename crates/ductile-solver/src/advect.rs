//! Advection: domain corner movement, particle position interpolation, and
//! the FLIP-style particle velocity update.

use ductile_types::{Scalar, Vector, CORNER_NUM};

use crate::cpdi2::DomainUpdateMethod;
use crate::grid::BackgroundGrid;
use crate::state::{ObjectState, ParticleKind};

/// Moves domain corners with their governing velocity field, then lets the
/// domain update method re-place each particle inside its updated domain.
///
/// Enriched corners advect with their own velocity; ordinary corners with
/// the grid velocity interpolated at the corner. Positions are written to
/// the per-particle domains and the welded mesh in the same pass, keeping
/// shared corners single-valued.
pub fn advect_positions(
    objects: &mut [ObjectState],
    grid: &BackgroundGrid,
    method: &dyn DomainUpdateMethod,
    dt: Scalar,
    mass_epsilon: Scalar,
) {
    for (object_index, object) in objects.iter_mut().enumerate() {
        // Welded corners move once, shared or not.
        for corner in 0..object.mesh.vertex_count() {
            let velocity = if object.corner_enriched[corner] {
                object.corner_velocity[corner]
            } else {
                let mut velocity = Vector::ZERO;
                for pair in &object.corner_grid_pairs[corner] {
                    if grid.mass(object_index, pair.node) <= mass_epsilon {
                        continue;
                    }
                    velocity += pair.weight * grid.velocity(object_index, pair.node);
                }
                velocity
            };
            let position = object.mesh.vertex(corner) + velocity * dt;
            object.mesh.set_vertex(corner, position);
        }

        // Mirror the moved corners back into the per-particle domains.
        for p in 0..object.particle_count() {
            for c in 0..CORNER_NUM {
                object.domains[p][c] = object.mesh.vertex(object.mesh.corner_index(p, c));
            }
        }
        method.update_particle_positions(object, dt);
    }
}

/// FLIP-style particle velocity update: each particle's velocity is
/// incremented by the interpolated *change* of its governing degrees of
/// freedom over the step.
pub fn advect_velocities(objects: &mut [ObjectState], grid: &BackgroundGrid, mass_epsilon: Scalar) {
    for (object_index, object) in objects.iter_mut().enumerate() {
        for p in 0..object.particle_count() {
            if object.dirichlet_particles[p] {
                continue;
            }
            let kind = object.particle_kind(p);
            let mut delta = Vector::ZERO;

            if kind != ParticleKind::Enriched {
                for pair in &object.grid_pairs[p] {
                    if grid.mass(object_index, pair.node) <= mass_epsilon {
                        continue;
                    }
                    delta += pair.weight
                        * (grid.velocity(object_index, pair.node)
                            - grid.velocity_before(object_index, pair.node));
                }
            }
            for c in 0..CORNER_NUM {
                let corner = object.mesh.corner_index(p, c);
                if object.corner_enriched[corner] {
                    delta += object.corner_weights[p][c]
                        * (object.corner_velocity[corner]
                            - object.corner_velocity_before[corner]);
                }
            }
            object.particles[p].velocity += delta;
        }
    }
}
