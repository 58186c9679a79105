//! Background grid storage — the host-side interface the solver core reads
//! and writes.
//!
//! Every node holds per-object mass, velocity, and a "before update" velocity
//! snapshot, stored as flat node×object arenas (no per-node maps). Which
//! objects occupy which nodes is recomputed each step into an explicit
//! occupancy table: a list of active node ids plus one `u64` object bitmask
//! per node. The no-contact merge and the normalization pass both consume
//! that table.

use ductile_types::constants::MAX_OBJECTS;
use ductile_types::math::{IVec2, UVec2};
use ductile_types::{DuctileError, DuctileResult, Scalar, Vector};

/// One entry of a particle's (or corner's) grid influence list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfluencePair {
    /// Flattened index of the influenced grid node.
    pub node: u32,
    /// Interpolation weight.
    pub weight: Scalar,
    /// Interpolation weight gradient.
    pub gradient: Vector,
}

/// Uniform background grid with per-(node, object) state.
pub struct BackgroundGrid {
    /// Node counts per axis.
    nodes: UVec2,
    /// Node spacing.
    cell_width: Scalar,
    /// Position of node (0, 0).
    origin: Vector,
    /// Number of objects with arena slots.
    object_count: usize,

    // Node×object arenas, indexed `object * node_count + node`.
    mass: Vec<Scalar>,
    velocity: Vec<Vector>,
    velocity_before: Vec<Vector>,
    dirichlet: Vec<bool>,
    dirichlet_velocity: Vec<Vector>,

    // Per-step occupancy table.
    active_nodes: Vec<u32>,
    occupants: Vec<u64>,
}

impl BackgroundGrid {
    /// Creates a grid with `nodes.x × nodes.y` nodes spaced `cell_width`
    /// apart, node (0, 0) sitting at `origin`.
    pub fn new(nodes: UVec2, cell_width: Scalar, origin: Vector) -> Self {
        let node_count = (nodes.x * nodes.y) as usize;
        Self {
            nodes,
            cell_width,
            origin,
            object_count: 0,
            mass: Vec::new(),
            velocity: Vec::new(),
            velocity_before: Vec::new(),
            dirichlet: Vec::new(),
            dirichlet_velocity: Vec::new(),
            active_nodes: Vec::new(),
            occupants: vec![0; node_count],
        }
    }

    /// Total number of grid nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        (self.nodes.x * self.nodes.y) as usize
    }

    /// Number of objects with arena slots.
    #[inline]
    pub fn object_count(&self) -> usize {
        self.object_count
    }

    /// Node spacing.
    #[inline]
    pub fn cell_width(&self) -> Scalar {
        self.cell_width
    }

    /// Flattens a node coordinate, or `None` if it lies outside the grid.
    #[inline]
    pub fn flatten(&self, coord: IVec2) -> Option<u32> {
        if coord.x < 0
            || coord.y < 0
            || coord.x >= self.nodes.x as i32
            || coord.y >= self.nodes.y as i32
        {
            return None;
        }
        Some(coord.y as u32 * self.nodes.x + coord.x as u32)
    }

    /// World-space position of a node.
    #[inline]
    pub fn node_position(&self, node: u32) -> Vector {
        let coord = IVec2::new(
            (node % self.nodes.x) as i32,
            (node / self.nodes.x) as i32,
        );
        self.origin + coord.as_vec2() * self.cell_width
    }

    #[inline]
    fn slot(&self, object: usize, node: u32) -> usize {
        object * self.node_count() + node as usize
    }

    /// Appends arena slots for one more object.
    pub fn push_object(&mut self) -> DuctileResult<()> {
        if self.object_count == MAX_OBJECTS {
            return Err(DuctileError::InvalidConfig(format!(
                "The occupancy table supports at most {MAX_OBJECTS} objects"
            )));
        }
        let node_count = self.node_count();
        self.object_count += 1;
        self.mass.resize(self.object_count * node_count, 0.0);
        self.velocity
            .resize(self.object_count * node_count, Vector::ZERO);
        self.velocity_before
            .resize(self.object_count * node_count, Vector::ZERO);
        self.dirichlet.resize(self.object_count * node_count, false);
        self.dirichlet_velocity
            .resize(self.object_count * node_count, Vector::ZERO);
        Ok(())
    }

    /// Removes the arena slots of one object, shifting later objects down.
    pub fn remove_object(&mut self, object: usize) {
        let node_count = self.node_count();
        let range = object * node_count..(object + 1) * node_count;
        self.mass.drain(range.clone());
        self.velocity.drain(range.clone());
        self.velocity_before.drain(range.clone());
        self.dirichlet.drain(range.clone());
        self.dirichlet_velocity.drain(range);
        self.object_count -= 1;
    }

    // ─── Per-slot accessors ───────────────────────────────────

    #[inline]
    pub fn mass(&self, object: usize, node: u32) -> Scalar {
        self.mass[self.slot(object, node)]
    }

    #[inline]
    pub fn add_mass(&mut self, object: usize, node: u32, amount: Scalar) {
        let slot = self.slot(object, node);
        self.mass[slot] += amount;
    }

    #[inline]
    pub fn velocity(&self, object: usize, node: u32) -> Vector {
        self.velocity[self.slot(object, node)]
    }

    #[inline]
    pub fn velocity_before(&self, object: usize, node: u32) -> Vector {
        self.velocity_before[self.slot(object, node)]
    }

    #[inline]
    pub fn add_velocity(&mut self, object: usize, node: u32, amount: Vector) {
        let slot = self.slot(object, node);
        self.velocity[slot] += amount;
    }

    /// Marks a node Dirichlet for one object with a prescribed velocity.
    ///
    /// The prescription persists across steps until cleared; each step's
    /// reset re-seeds the node velocity from it.
    pub fn set_dirichlet(&mut self, object: usize, node: u32, velocity: Vector) {
        let slot = self.slot(object, node);
        self.dirichlet[slot] = true;
        self.dirichlet_velocity[slot] = velocity;
        self.velocity[slot] = velocity;
    }

    /// Clears a Dirichlet prescription.
    pub fn clear_dirichlet(&mut self, object: usize, node: u32) {
        let slot = self.slot(object, node);
        self.dirichlet[slot] = false;
        self.dirichlet_velocity[slot] = Vector::ZERO;
    }

    #[inline]
    pub fn is_dirichlet(&self, object: usize, node: u32) -> bool {
        self.dirichlet[self.slot(object, node)]
    }

    /// True if the node is Dirichlet for *any* object.
    pub fn any_dirichlet(&self, node: u32) -> bool {
        (0..self.object_count).any(|object| self.is_dirichlet(object, node))
    }

    // ─── Occupancy table ──────────────────────────────────────

    /// Active node ids for the current step.
    #[inline]
    pub fn active_nodes(&self) -> &[u32] {
        &self.active_nodes
    }

    /// Bitmask of objects occupying `node` (bit `o` = object `o`).
    #[inline]
    pub fn occupant_mask(&self, node: u32) -> u64 {
        self.occupants[node as usize]
    }

    // ─── Per-step passes ──────────────────────────────────────

    /// Zeroes all per-step state. Dirichlet slots keep their prescribed
    /// velocity; everything else starts the step at zero.
    pub fn reset(&mut self) {
        self.mass.fill(0.0);
        self.velocity_before.fill(Vector::ZERO);
        for slot in 0..self.velocity.len() {
            self.velocity[slot] = if self.dirichlet[slot] {
                self.dirichlet_velocity[slot]
            } else {
                Vector::ZERO
            };
        }
        self.active_nodes.clear();
        self.occupants.fill(0);
    }

    /// Recomputes the occupancy table from current mass values.
    pub fn rebuild_active_nodes(&mut self, mass_epsilon: Scalar) {
        let node_count = self.node_count();
        self.active_nodes.clear();
        self.occupants.fill(0);
        for node in 0..node_count {
            let mut mask = 0u64;
            for object in 0..self.object_count {
                if self.mass[object * node_count + node] > mass_epsilon {
                    mask |= 1 << object;
                }
            }
            if mask != 0 {
                self.occupants[node] = mask;
                self.active_nodes.push(node as u32);
            }
        }
    }

    /// Divides momentum by mass at every active slot (skipping Dirichlet
    /// slots, whose velocity is prescribed) and snapshots the result as the
    /// "before update" velocity.
    pub fn normalize_velocities(&mut self) {
        let node_count = self.node_count();
        for k in 0..self.active_nodes.len() {
            let node = self.active_nodes[k] as usize;
            let mask = self.occupants[node];
            for object in 0..self.object_count {
                if mask & (1 << object) == 0 {
                    continue;
                }
                let slot = object * node_count + node;
                if !self.dirichlet[slot] {
                    self.velocity[slot] /= self.mass[slot];
                }
                self.velocity_before[slot] = self.velocity[slot];
            }
        }
    }

    /// The no-contact merge: force-unifies (mass, velocity) at every node
    /// occupied by more than one object, emulating frictionless perfect
    /// coupling. If any occupant marks the node Dirichlet, that object's
    /// prescribed velocity wins and is propagated to all occupants.
    ///
    /// Must run after [`normalize_velocities`](Self::normalize_velocities);
    /// an external contact method replaces this pass entirely.
    pub fn merge_shared_nodes(&mut self) {
        let node_count = self.node_count();
        for k in 0..self.active_nodes.len() {
            let node = self.active_nodes[k] as usize;
            let mask = self.occupants[node];
            if mask.count_ones() < 2 {
                continue;
            }

            let mut total_mass = 0.0;
            let mut momentum = Vector::ZERO;
            for object in 0..self.object_count {
                if mask & (1 << object) == 0 {
                    continue;
                }
                let slot = object * node_count + node;
                total_mass += self.mass[slot];
                momentum += self.mass[slot] * self.velocity[slot];
            }
            let mut merged_velocity = momentum / total_mass;

            // A Dirichlet prescription by any occupant binds them all.
            for object in 0..self.object_count {
                let slot = object * node_count + node;
                if mask & (1 << object) != 0 && self.dirichlet[slot] {
                    merged_velocity = self.velocity[slot];
                    break;
                }
            }

            for object in 0..self.object_count {
                if mask & (1 << object) == 0 {
                    continue;
                }
                let slot = object * node_count + node;
                self.mass[slot] = total_mass;
                self.velocity[slot] = merged_velocity;
                self.velocity_before[slot] = merged_velocity;
            }
        }
    }

    /// Applies gravity to every active non-Dirichlet slot — the standard
    /// grid path for ordinary/transient influence. Enriched domain corners
    /// receive gravity separately, in the explicit corner solve.
    pub fn apply_gravity(&mut self, gravity: Vector, dt: Scalar) {
        let node_count = self.node_count();
        for k in 0..self.active_nodes.len() {
            let node = self.active_nodes[k] as usize;
            let mask = self.occupants[node];
            for object in 0..self.object_count {
                if mask & (1 << object) == 0 {
                    continue;
                }
                let slot = object * node_count + node;
                if !self.dirichlet[slot] {
                    self.velocity[slot] += gravity * dt;
                }
            }
        }
    }

    // ─── Interpolation ────────────────────────────────────────

    /// Quadratic B-spline influence pairs (3×3 stencil) for a world-space
    /// position. Nodes outside the grid and near-zero weights are skipped.
    pub fn influence_pairs(&self, position: Vector, weight_epsilon: Scalar) -> Vec<InfluencePair> {
        let inv_h = 1.0 / self.cell_width;
        let u = (position - self.origin) * inv_h;
        let center = u.round().as_ivec2();
        let d = u - center.as_vec2();

        let wx = bspline_weights(d.x);
        let wy = bspline_weights(d.y);
        let dwx = bspline_derivatives(d.x);
        let dwy = bspline_derivatives(d.y);

        let mut pairs = Vec::with_capacity(9);
        for j in 0..3 {
            for i in 0..3 {
                let coord = center + IVec2::new(i as i32 - 1, j as i32 - 1);
                let Some(node) = self.flatten(coord) else {
                    continue;
                };
                let weight = wx[i] * wy[j];
                if weight <= weight_epsilon {
                    continue;
                }
                pairs.push(InfluencePair {
                    node,
                    weight,
                    gradient: Vector::new(dwx[i] * wy[j], wx[i] * dwy[j]) * inv_h,
                });
            }
        }
        pairs
    }
}

/// Quadratic B-spline weights for the 3-node stencil, `d` the offset from
/// the center node in node-space units (`|d| ≤ 0.5`).
#[inline]
fn bspline_weights(d: Scalar) -> [Scalar; 3] {
    [
        0.5 * (0.5 - d) * (0.5 - d),
        0.75 - d * d,
        0.5 * (0.5 + d) * (0.5 + d),
    ]
}

/// Derivatives of [`bspline_weights`] with respect to `d`.
#[inline]
fn bspline_derivatives(d: Scalar) -> [Scalar; 3] {
    [d - 0.5, -2.0 * d, d + 0.5]
}
