//! # ductile-mesh
//!
//! Particle-domain mesh representation for CPDI2-style MPM.
//!
//! Every particle owns a deformable quad domain; co-located corners of
//! neighboring domains are welded into shared mesh vertices. The mesh is the
//! single source of truth for the (particle, local corner) → global corner
//! mapping that enrichment, rasterization, and advection all index through.
//!
//! ## Key Types
//!
//! - [`DomainMesh`] — welded quad mesh with SoA vertex storage and a flat
//!   per-particle connectivity table.

pub mod domain_mesh;

pub use domain_mesh::DomainMesh;
