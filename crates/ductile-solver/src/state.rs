//! Per-object solver state: particles, their domains, the welded domain
//! corner mesh, and the per-step corner/grid interpolation caches.

use ductile_material::ConstitutiveModel;
use ductile_mesh::DomainMesh;
use ductile_types::{DuctileResult, Matrix, Scalar, Vector, CORNER_NUM};

use crate::grid::InfluencePair;

/// One material point.
#[derive(Debug, Clone, Copy)]
pub struct SolidParticle {
    pub position: Vector,
    pub velocity: Vector,
    pub mass: Scalar,
    /// Current volume, updated from `det(F)` each step.
    pub volume: Scalar,
    /// Reference-configuration volume.
    pub initial_volume: Scalar,
    pub deformation_gradient: Matrix,
    pub cauchy_stress: Matrix,
}

impl SolidParticle {
    /// Creates an undeformed, stress-free particle.
    pub fn new(position: Vector, mass: Scalar, volume: Scalar) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
            mass,
            volume,
            initial_volume: volume,
            deformation_gradient: Matrix::IDENTITY,
            cauchy_stress: Matrix::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Classification of a particle by how many of its domain corners are
/// enriched this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// No corner enriched; pure grid interpolation.
    Ordinary,
    /// Some corners enriched; grid influence restricted to the rest.
    Transient,
    /// Every corner enriched; the particle bypasses the grid entirely.
    Enriched,
}

/// All solver state for one simulated object.
pub struct ObjectState {
    pub particles: Vec<SolidParticle>,
    /// Per-particle domain corner positions, kept in lockstep with
    /// `particles` and mirrored into `mesh`.
    pub domains: Vec<[Vector; CORNER_NUM]>,
    /// Particles whose velocity is externally prescribed.
    pub dirichlet_particles: Vec<bool>,
    pub material: Option<Box<dyn ConstitutiveModel>>,
    /// Welded corner connectivity over `domains`.
    pub mesh: DomainMesh,

    // Per-global-corner state, sized to `mesh` vertex count.
    pub corner_enriched: Vec<bool>,
    pub corner_mass: Vec<Scalar>,
    pub corner_velocity: Vec<Vector>,
    pub corner_velocity_before: Vec<Vector>,

    // Per-particle interpolation caches, rebuilt each step.
    /// In-domain corner weights from the domain update method.
    pub corner_weights: Vec<[Scalar; CORNER_NUM]>,
    /// In-domain corner weight gradients.
    pub corner_gradients: Vec<[Vector; CORNER_NUM]>,
    /// Composed particle-to-grid influence (empty for enriched particles).
    pub grid_pairs: Vec<Vec<InfluencePair>>,
    /// Grid influence at each *global* corner, used to compose particle
    /// weights and to advect ordinary corners.
    pub corner_grid_pairs: Vec<Vec<InfluencePair>>,
}

impl ObjectState {
    /// Builds object state from particles and their initial domains.
    /// `particles` and `domains` must have equal length.
    pub fn new(
        particles: Vec<SolidParticle>,
        domains: Vec<[Vector; CORNER_NUM]>,
    ) -> DuctileResult<Self> {
        let mut state = Self {
            dirichlet_particles: vec![false; particles.len()],
            particles,
            domains,
            material: None,
            mesh: DomainMesh::default(),
            corner_enriched: Vec::new(),
            corner_mass: Vec::new(),
            corner_velocity: Vec::new(),
            corner_velocity_before: Vec::new(),
            corner_weights: Vec::new(),
            corner_gradients: Vec::new(),
            grid_pairs: Vec::new(),
            corner_grid_pairs: Vec::new(),
        };
        state.rebuild_domain_mesh()?;
        Ok(state)
    }

    /// Number of particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Re-welds the domain mesh from `domains` and resizes every corner
    /// and particle cache to match. Must be called whenever the particle
    /// population changes.
    pub fn rebuild_domain_mesh(&mut self) -> DuctileResult<()> {
        self.mesh = DomainMesh::from_particle_domains(&self.domains)?;
        let corner_count = self.mesh.vertex_count();
        let particle_count = self.particles.len();

        self.corner_enriched.clear();
        self.corner_enriched.resize(corner_count, false);
        self.corner_mass.clear();
        self.corner_mass.resize(corner_count, 0.0);
        self.corner_velocity.clear();
        self.corner_velocity.resize(corner_count, Vector::ZERO);
        self.corner_velocity_before.clear();
        self.corner_velocity_before.resize(corner_count, Vector::ZERO);
        self.corner_grid_pairs.clear();
        self.corner_grid_pairs.resize_with(corner_count, Vec::new);

        self.corner_weights
            .resize(particle_count, [0.0; CORNER_NUM]);
        self.corner_gradients
            .resize(particle_count, [Vector::ZERO; CORNER_NUM]);
        self.grid_pairs.resize_with(particle_count, Vec::new);
        self.dirichlet_particles.resize(particle_count, false);
        Ok(())
    }

    /// Adds a particle with its domain, re-welding the corner mesh.
    pub fn push_particle(
        &mut self,
        particle: SolidParticle,
        domain: [Vector; CORNER_NUM],
    ) -> DuctileResult<()> {
        self.particles.push(particle);
        self.domains.push(domain);
        self.dirichlet_particles.push(false);
        self.rebuild_domain_mesh()
    }

    /// Removes a particle and its domain, re-welding the corner mesh.
    pub fn remove_particle(&mut self, particle: usize) -> DuctileResult<SolidParticle> {
        let removed = self.particles.remove(particle);
        self.domains.remove(particle);
        self.dirichlet_particles.remove(particle);
        self.corner_weights.truncate(self.particles.len());
        self.corner_gradients.truncate(self.particles.len());
        self.grid_pairs.truncate(self.particles.len());
        self.rebuild_domain_mesh()?;
        Ok(removed)
    }

    /// Zeroes per-step corner transfer state (mass and velocities).
    /// Enrichment flags are owned by the classifier and left alone.
    pub fn reset_corner_step_state(&mut self) {
        self.corner_mass.fill(0.0);
        self.corner_velocity.fill(Vector::ZERO);
        self.corner_velocity_before.fill(Vector::ZERO);
    }

    /// Number of enriched corners of one particle's domain.
    pub fn enriched_corner_count(&self, particle: usize) -> usize {
        (0..CORNER_NUM)
            .filter(|&corner| self.corner_enriched[self.mesh.corner_index(particle, corner)])
            .count()
    }

    /// Current classification of a particle.
    pub fn particle_kind(&self, particle: usize) -> ParticleKind {
        match self.enriched_corner_count(particle) {
            0 => ParticleKind::Ordinary,
            CORNER_NUM => ParticleKind::Enriched,
            _ => ParticleKind::Transient,
        }
    }

    /// Overwrites a particle's domain, keeping the welded mesh in sync.
    pub fn set_domain(&mut self, particle: usize, corners: [Vector; CORNER_NUM]) {
        self.domains[particle] = corners;
        for (corner, &position) in corners.iter().enumerate() {
            let index = self.mesh.corner_index(particle, corner);
            self.mesh.set_vertex(index, position);
        }
    }

    /// Position of one global domain corner.
    #[inline]
    pub fn corner_position(&self, corner: usize) -> Vector {
        self.mesh.vertex(corner)
    }
}
