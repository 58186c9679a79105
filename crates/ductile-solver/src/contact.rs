//! Pluggable inter-object contact resolution.
//!
//! When no contact method is installed, the solver force-unifies grid nodes
//! shared by multiple objects (the no-contact merge in
//! [`BackgroundGrid::merge_shared_nodes`]). Installing a method disables
//! that merge and hands the post-rasterization grid state to the method
//! instead.

use ductile_types::Scalar;

use crate::grid::BackgroundGrid;

/// Resolves velocities at grid nodes occupied by more than one object.
pub trait ContactMethod: Send {
    /// Called once per step, after rasterization and normalization, with
    /// per-object nodal state still separated.
    fn resolve(&mut self, grid: &mut BackgroundGrid, dt: Scalar);

    fn name(&self) -> &str;
}
