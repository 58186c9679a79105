//! # ductile-material
//!
//! Constitutive models for invertible elastic solids: map a particle's
//! deformation gradient to its Cauchy stress. The solver treats stress as
//! externally computed state, so models plug in behind a trait.
//!
//! ## Key Types
//!
//! - [`ConstitutiveModel`] — the material strategy trait
//! - [`NeoHookean`] — compressible Neo-Hookean, survives large deformation
//! - [`LinearElastic`] — small-strain baseline, cheap but rotation-naive
//! - [`ElasticProperties`] — measurable parameters with Lamé conversions

pub mod linear;
pub mod neo_hookean;
pub mod properties;
pub mod traits;

pub use linear::LinearElastic;
pub use neo_hookean::NeoHookean;
pub use properties::ElasticProperties;
pub use traits::ConstitutiveModel;
