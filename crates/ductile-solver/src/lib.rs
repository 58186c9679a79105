//! # ductile-solver
//!
//! One explicit time step of invertible-elastic MPM with a hybrid
//! GIMP/CPDI2 particle-domain representation.
//!
//! Each particle owns a deformable quad domain whose corners are welded into
//! a per-object particle-domain mesh. Per step, every domain corner is
//! classified *ordinary* (interpolated from the background grid) or
//! *enriched* (carrying its own mass/velocity, decoupled from the grid), and
//! the pipeline runs: rasterize → constitutive update → explicit force solve
//! → advection (positions, then velocities).
//!
//! ## Key Types
//!
//! - [`InvertibleSolver`] — the step pipeline façade
//! - [`state::ObjectState`] / [`state::SolidParticle`] — per-object state
//! - [`grid::BackgroundGrid`] — per-(node, object) grid storage
//! - [`cpdi2::Cpdi2`] — the domain update method (the only supported one)
//! - [`enrichment::EnrichmentCriterion`] — pluggable enrichment trigger
//! - [`observer::StepObserver`] — step-boundary hooks for host plugins

pub mod advect;
pub mod config;
pub mod constitutive;
pub mod contact;
pub mod cpdi2;
pub mod enrichment;
pub mod forces;
pub mod grid;
pub mod observer;
pub mod rasterize;
pub mod solver;
pub mod state;

pub use config::SolverConfig;
pub use solver::InvertibleSolver;
