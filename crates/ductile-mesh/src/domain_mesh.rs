//! Welded particle-domain mesh with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously
//! (`pos_x: [x0, x1, ...]`, `pos_y: [y0, y1, ...]`), matching the layout of
//! the per-corner state buffers the solver keeps alongside the mesh.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ductile_types::{DuctileError, DuctileResult, Vector, CORNER_NUM};

/// A quad mesh over one object's particle domains.
///
/// Each particle contributes one element of [`CORNER_NUM`] corners; corners
/// at bit-identical positions are welded into a single shared vertex at
/// construction time. Rebuilt whenever the object's particle set changes —
/// during free time-stepping only vertex *positions* move, never topology.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainMesh {
    /// X coordinates of all welded corner vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all welded corner vertices.
    pub pos_y: Vec<f32>,

    /// Connectivity — element `p` occupies
    /// `indices[p * CORNER_NUM .. (p + 1) * CORNER_NUM]`.
    pub indices: Vec<u32>,
}

impl DomainMesh {
    /// Builds the welded mesh from per-particle corner positions.
    ///
    /// Corners are deduplicated by exact position match: two domains share a
    /// mesh vertex iff their corner positions are bit-identical. Approximate
    /// welding would silently glue domains that merely pass near each other.
    pub fn from_particle_domains(domains: &[[Vector; CORNER_NUM]]) -> DuctileResult<Self> {
        let mut pos_x = Vec::new();
        let mut pos_y = Vec::new();
        let mut indices = Vec::with_capacity(domains.len() * CORNER_NUM);

        // Exact-equality weld keyed on the raw bit patterns.
        let mut welded: HashMap<(u32, u32), u32> = HashMap::new();

        for domain in domains {
            for corner in domain {
                let key = (corner.x.to_bits(), corner.y.to_bits());
                let idx = *welded.entry(key).or_insert_with(|| {
                    pos_x.push(corner.x);
                    pos_y.push(corner.y);
                    (pos_x.len() - 1) as u32
                });
                indices.push(idx);
            }
        }

        let mesh = Self {
            pos_x,
            pos_y,
            indices,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Returns the number of welded corner vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of elements (= particles of the owning object).
    #[inline]
    pub fn element_count(&self) -> usize {
        self.indices.len() / CORNER_NUM
    }

    /// Global corner index of local corner `corner` of particle `particle`.
    #[inline]
    pub fn corner_index(&self, particle: usize, corner: usize) -> usize {
        self.indices[particle * CORNER_NUM + corner] as usize
    }

    /// The [`CORNER_NUM`] global corner indices of particle `particle`.
    #[inline]
    pub fn element(&self, particle: usize) -> [u32; CORNER_NUM] {
        let base = particle * CORNER_NUM;
        let mut out = [0u32; CORNER_NUM];
        out.copy_from_slice(&self.indices[base..base + CORNER_NUM]);
        out
    }

    /// Position of welded vertex `i`.
    #[inline]
    pub fn vertex(&self, i: usize) -> Vector {
        Vector::new(self.pos_x[i], self.pos_y[i])
    }

    /// Moves welded vertex `i`.
    #[inline]
    pub fn set_vertex(&mut self, i: usize, position: Vector) {
        self.pos_x[i] = position.x;
        self.pos_y[i] = position.y;
    }

    /// For each welded vertex, the list of particles whose domain touches it.
    ///
    /// Built on demand; used by enrichment diagnostics and tests, not by the
    /// per-step hot path.
    pub fn vertex_particles(&self) -> Vec<Vec<u32>> {
        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); self.vertex_count()];
        for particle in 0..self.element_count() {
            for corner in 0..CORNER_NUM {
                let vertex = self.corner_index(particle, corner);
                adjacency[vertex].push(particle as u32);
            }
        }
        adjacency
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Position arrays have the same length
    /// - Connectivity length is a multiple of [`CORNER_NUM`]
    /// - All corner indices are within bounds
    pub fn validate(&self) -> DuctileResult<()> {
        let n = self.pos_x.len();
        if self.pos_y.len() != n {
            return Err(DuctileError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % CORNER_NUM != 0 {
            return Err(DuctileError::InvalidMesh(format!(
                "Connectivity length ({}) is not a multiple of the corner count ({})",
                self.indices.len(),
                CORNER_NUM
            )));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(DuctileError::InvalidMesh(format!(
                    "Corner index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        Ok(())
    }
}
