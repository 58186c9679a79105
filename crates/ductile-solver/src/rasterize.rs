//! Particle-to-grid and particle-to-corner rasterization.
//!
//! Ordinary and transient particles scatter mass and momentum onto the
//! background grid through their composed influence pairs; particles with
//! enriched corners additionally scatter onto those corners through the
//! in-domain weights. Fully enriched particles have empty grid influence
//! and transfer through their corners alone.

use ductile_types::{Scalar, Vector, CORNER_NUM};

use crate::grid::BackgroundGrid;
use crate::state::ObjectState;

/// Rasterizes all objects onto `grid` and their enriched corners, then
/// normalizes momenta into velocities.
///
/// `contact_active` suppresses the no-contact merge of multi-object nodes;
/// the installed contact method takes over that responsibility.
pub fn rasterize(
    objects: &mut [ObjectState],
    grid: &mut BackgroundGrid,
    mass_epsilon: Scalar,
    contact_active: bool,
) {
    for (object_index, object) in objects.iter_mut().enumerate() {
        for p in 0..object.particle_count() {
            let particle = object.particles[p];
            let momentum = particle.mass * particle.velocity;

            // Grid scatter through the composed pairs. Mass always lands;
            // momentum is withheld at this object's Dirichlet nodes, whose
            // velocity is prescribed, not accumulated.
            for pair in &object.grid_pairs[p] {
                grid.add_mass(object_index, pair.node, pair.weight * particle.mass);
                if !grid.is_dirichlet(object_index, pair.node) {
                    grid.add_velocity(object_index, pair.node, pair.weight * momentum);
                }
            }

            // Corner scatter through the in-domain weights, enriched
            // corners only.
            for c in 0..CORNER_NUM {
                let corner = object.mesh.corner_index(p, c);
                if !object.corner_enriched[corner] {
                    continue;
                }
                let weight = object.corner_weights[p][c];
                object.corner_mass[corner] += weight * particle.mass;
                object.corner_velocity[corner] += weight * momentum;
            }
        }

        // Corner momentum -> velocity, with the pre-update snapshot for the
        // FLIP delta.
        for corner in 0..object.corner_mass.len() {
            if object.corner_mass[corner] > mass_epsilon {
                object.corner_velocity[corner] /= object.corner_mass[corner];
            } else {
                // Stray sub-epsilon momentum is "no influence", not velocity.
                object.corner_velocity[corner] = Vector::ZERO;
            }
            object.corner_velocity_before[corner] = object.corner_velocity[corner];
        }
    }

    grid.rebuild_active_nodes(mass_epsilon);
    grid.normalize_velocities();
    if !contact_active {
        grid.merge_shared_nodes();
    }
}
