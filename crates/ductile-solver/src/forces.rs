//! Explicit internal-force solve: forward Euler on grid and enriched-corner
//! velocities from particle Cauchy stresses.

use ductile_types::{Scalar, Vector, CORNER_NUM};

use crate::grid::BackgroundGrid;
use crate::state::ObjectState;

/// Applies internal elastic forces to grid node and enriched-corner
/// velocities for one explicit step.
///
/// Each particle contributes `-dt · V_p · σ_p · ∇w` at every influenced
/// degree of freedom. Under the no-contact merge (`contact_active` false)
/// every occupant of a shared node carries the merged mass and must receive
/// the same impulse, so the contribution is written to all occupants.
/// With a contact method installed only the owning object's slot is
/// updated.
pub fn solve_forward_euler(
    objects: &mut [ObjectState],
    grid: &mut BackgroundGrid,
    dt: Scalar,
    gravity: Scalar,
    mass_epsilon: Scalar,
    contact_active: bool,
) {
    let object_count = grid.object_count();
    for (object_index, object) in objects.iter_mut().enumerate() {
        for p in 0..object.particle_count() {
            let particle = object.particles[p];
            let stress_volume = particle.cauchy_stress * particle.volume;

            // Grid part.
            for pair in &object.grid_pairs[p] {
                let force = -(stress_volume * pair.gradient);
                if contact_active {
                    if grid.is_dirichlet(object_index, pair.node)
                        || grid.mass(object_index, pair.node) <= mass_epsilon
                    {
                        continue;
                    }
                    let dv = force * (dt / grid.mass(object_index, pair.node));
                    grid.add_velocity(object_index, pair.node, dv);
                } else {
                    if grid.any_dirichlet(pair.node)
                        || grid.mass(object_index, pair.node) <= mass_epsilon
                    {
                        continue;
                    }
                    // Merged nodes share one mass; the impulse applies to
                    // every occupant identically.
                    let dv = force * (dt / grid.mass(object_index, pair.node));
                    let mask = grid.occupant_mask(pair.node);
                    for other in 0..object_count {
                        if mask & (1 << other) != 0 {
                            grid.add_velocity(other, pair.node, dv);
                        }
                    }
                }
            }

            // Enriched-corner part.
            for c in 0..CORNER_NUM {
                let corner = object.mesh.corner_index(p, c);
                if !object.corner_enriched[corner] || object.corner_mass[corner] <= mass_epsilon
                {
                    continue;
                }
                let force = -(stress_volume * object.corner_gradients[p][c]);
                object.corner_velocity[corner] += force * (dt / object.corner_mass[corner]);
            }
        }

        // Gravity on enriched corners. Grid nodes receive gravity in the
        // grid pass; corners carry their own degrees of freedom and need it
        // here.
        for corner in 0..object.corner_mass.len() {
            if object.corner_enriched[corner] && object.corner_mass[corner] > mass_epsilon {
                object.corner_velocity[corner] += Vector::new(0.0, -gravity) * dt;
            }
        }
    }
}
