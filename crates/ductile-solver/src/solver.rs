//! The invertible explicit solver: per-step orchestration of enrichment
//! classification, weight updates, rasterization, the constitutive update,
//! the force solve, and advection.

use ductile_material::ConstitutiveModel;
use ductile_types::constants::MAX_OBJECTS;
use ductile_types::{DuctileError, DuctileResult, Scalar, Vector, CORNER_NUM};

use crate::advect::{advect_positions, advect_velocities};
use crate::config::SolverConfig;
use crate::constitutive::update_constitutive_state;
use crate::contact::ContactMethod;
use crate::cpdi2::{Cpdi2, DomainUpdateMethod};
use crate::enrichment::{update_enrichment, AlwaysEnrich, EnrichmentCriterion};
use crate::forces::solve_forward_euler;
use crate::grid::{BackgroundGrid, InfluencePair};
use crate::observer::StepObserver;
use crate::rasterize::rasterize;
use crate::state::{ObjectState, ParticleKind};

/// Explicit MPM solver with particle-domain interpolation and domain corner
/// enrichment, robust against extreme compression through the inversion
/// remedy in the deformation-gradient update.
pub struct InvertibleSolver {
    config: SolverConfig,
    objects: Vec<ObjectState>,
    grid: BackgroundGrid,
    update_method: Box<dyn DomainUpdateMethod>,
    criterion: Box<dyn EnrichmentCriterion>,
    contact: Option<Box<dyn ContactMethod>>,
    observers: Vec<Box<dyn StepObserver>>,
    step: u32,
}

impl InvertibleSolver {
    /// Creates a solver over `grid` with the CPDI2 domain update and the
    /// always-enrich criterion.
    pub fn new(grid: BackgroundGrid, config: SolverConfig) -> Self {
        Self {
            config,
            objects: Vec::new(),
            grid,
            update_method: Box::new(Cpdi2),
            criterion: Box::new(AlwaysEnrich),
            contact: None,
            observers: Vec::new(),
            step: 0,
        }
    }

    // ─── Setup ────────────────────────────────────────────────

    /// Adds a simulated object, returning its index.
    pub fn add_object(&mut self, object: ObjectState) -> DuctileResult<usize> {
        if self.objects.len() == MAX_OBJECTS {
            return Err(DuctileError::InvalidConfig(format!(
                "At most {MAX_OBJECTS} objects are supported"
            )));
        }
        self.grid.push_object()?;
        self.objects.push(object);
        Ok(self.objects.len() - 1)
    }

    /// Removes an object and its grid arena slots.
    pub fn remove_object(&mut self, object: usize) -> ObjectState {
        self.grid.remove_object(object);
        self.objects.remove(object)
    }

    /// Replaces the domain update method. The method must expose per-corner
    /// weights; enrichment is built on them.
    pub fn set_update_method(
        &mut self,
        method: Box<dyn DomainUpdateMethod>,
    ) -> DuctileResult<()> {
        if !method.supports_domain_enrichment() {
            return Err(DuctileError::InvalidConfig(format!(
                "Domain update method '{}' does not expose corner weights",
                method.name()
            )));
        }
        self.update_method = method;
        Ok(())
    }

    pub fn set_enrichment_criterion(&mut self, criterion: Box<dyn EnrichmentCriterion>) {
        self.criterion = criterion;
    }

    /// Installs a contact method. The no-contact merge of shared grid nodes
    /// is disabled while one is installed.
    pub fn set_contact_method(&mut self, contact: Option<Box<dyn ContactMethod>>) {
        self.contact = contact;
    }

    pub fn add_observer(&mut self, observer: Box<dyn StepObserver>) {
        self.observers.push(observer);
    }

    pub fn set_object_material(&mut self, object: usize, material: Box<dyn ConstitutiveModel>) {
        self.objects[object].material = Some(material);
    }

    // ─── Accessors ────────────────────────────────────────────

    #[inline]
    pub fn object(&self, object: usize) -> &ObjectState {
        &self.objects[object]
    }

    #[inline]
    pub fn object_mut(&mut self, object: usize) -> &mut ObjectState {
        &mut self.objects[object]
    }

    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn grid(&self) -> &BackgroundGrid {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut BackgroundGrid {
        &mut self.grid
    }

    #[inline]
    pub fn step_index(&self) -> u32 {
        self.step
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    // ─── Stepping ─────────────────────────────────────────────

    /// Advances the simulation by one explicit step of size `dt`.
    pub fn advance(&mut self, dt: Scalar) -> DuctileResult<()> {
        self.prepare_step();

        for observer in &mut self.observers {
            observer.on_rasterize(self.step);
        }
        self.rasterize_particles();

        for observer in &mut self.observers {
            observer.on_constitutive_update(self.step, dt);
        }
        self.update_constitutive(dt)?;

        self.solve_forces(dt);

        for observer in &mut self.observers {
            observer.on_position_update(self.step, dt);
        }
        self.advect_domain_positions(dt);

        for observer in &mut self.observers {
            observer.on_velocity_update(self.step);
        }
        self.advect_particle_velocities();

        self.step += 1;
        Ok(())
    }

    // The phase methods below are what `advance` composes. Hosts stepping
    // the pipeline manually call them in this order, after `prepare_step`.

    /// Runs the rasterization phase alone.
    pub fn rasterize_particles(&mut self) {
        let contact_active = self.contact.is_some();
        rasterize(
            &mut self.objects,
            &mut self.grid,
            self.config.mass_epsilon,
            contact_active,
        );
    }

    /// Runs the constitutive update alone: deformation gradients, volumes,
    /// and stresses from the rasterized velocity fields.
    pub fn update_constitutive(&mut self, dt: Scalar) -> DuctileResult<()> {
        update_constitutive_state(&mut self.objects, &self.grid, dt, self.config.mass_epsilon)
    }

    /// Runs the explicit force solve alone, including grid gravity and the
    /// installed contact method's resolution.
    pub fn solve_forces(&mut self, dt: Scalar) {
        solve_forward_euler(
            &mut self.objects,
            &mut self.grid,
            dt,
            self.config.gravity,
            self.config.mass_epsilon,
            self.contact.is_some(),
        );
        self.grid
            .apply_gravity(Vector::new(0.0, -self.config.gravity), dt);
        if let Some(contact) = &mut self.contact {
            contact.resolve(&mut self.grid, dt);
        }
    }

    /// Runs corner and particle position advection alone.
    pub fn advect_domain_positions(&mut self, dt: Scalar) {
        advect_positions(
            &mut self.objects,
            &self.grid,
            self.update_method.as_ref(),
            dt,
            self.config.mass_epsilon,
        );
    }

    /// Runs the FLIP-style particle velocity update alone.
    pub fn advect_particle_velocities(&mut self) {
        advect_velocities(&mut self.objects, &self.grid, self.config.mass_epsilon);
    }

    /// Resets per-step transfer state, reclassifies enrichment, and rebuilds
    /// every interpolation cache from the current domain shapes.
    pub fn prepare_step(&mut self) {
        let eps = self.config.mass_epsilon;
        self.grid.reset();

        let mut enriched_corners = 0usize;
        let mut total_corners = 0usize;
        for object in &mut self.objects {
            object.reset_corner_step_state();
            enriched_corners += update_enrichment(object, self.criterion.as_ref());
            total_corners += object.mesh.vertex_count();
            self.update_method.update_corner_weights(object);

            // Grid influence at each welded corner.
            for corner in 0..object.mesh.vertex_count() {
                object.corner_grid_pairs[corner] =
                    self.grid.influence_pairs(object.corner_position(corner), eps);
            }

            // Particle-to-grid influence, composed through the non-enriched
            // corners only. Enriched corners transfer separately; composing
            // over the rest keeps the total particle weight a partition of
            // unity for transient particles.
            for p in 0..object.particle_count() {
                object.grid_pairs[p].clear();
                if object.particle_kind(p) == ParticleKind::Enriched {
                    continue;
                }
                for c in 0..CORNER_NUM {
                    let corner = object.mesh.corner_index(p, c);
                    if object.corner_enriched[corner] {
                        continue;
                    }
                    let corner_weight = object.corner_weights[p][c];
                    let corner_gradient = object.corner_gradients[p][c];
                    for k in 0..object.corner_grid_pairs[corner].len() {
                        let pair = object.corner_grid_pairs[corner][k];
                        accumulate_pair(
                            &mut object.grid_pairs[p],
                            pair.node,
                            corner_weight * pair.weight,
                            corner_gradient * pair.weight,
                        );
                    }
                }
            }
        }
        tracing::debug!(
            step = self.step,
            enriched_corners,
            total_corners,
            "enrichment classified"
        );
    }
}

/// Adds a (weight, gradient) contribution for `node`, merging with an
/// existing entry for the same node. Influence lists are at most a few
/// dozen entries; a linear scan keeps insertion order deterministic.
fn accumulate_pair(pairs: &mut Vec<InfluencePair>, node: u32, weight: Scalar, gradient: Vector) {
    if let Some(existing) = pairs.iter_mut().find(|pair| pair.node == node) {
        existing.weight += weight;
        existing.gradient += gradient;
    } else {
        pairs.push(InfluencePair {
            node,
            weight,
            gradient,
        });
    }
}
