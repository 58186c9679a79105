//! Domain corner enrichment: deciding which corners carry their own
//! velocity degrees of freedom instead of following the background grid.

use ductile_types::{Scalar, CORNER_NUM};

use crate::state::ObjectState;

/// Per-particle enrichment decision.
///
/// Enrichment is decided per *particle*; the classifier then marks all of
/// that particle's domain corners, so a corner shared with a neighbor
/// enriches the neighbor's side too (making the neighbor transient).
pub trait EnrichmentCriterion: Send + Sync {
    fn should_enrich(&self, object: &ObjectState, particle: usize) -> bool;

    fn name(&self) -> &str;
}

/// Enriches every particle. The default: the full corner-based transfer
/// is in effect everywhere and the solver degenerates gracefully to grid
/// interpolation only where a host swaps the criterion.
pub struct AlwaysEnrich;

impl EnrichmentCriterion for AlwaysEnrich {
    fn should_enrich(&self, _object: &ObjectState, _particle: usize) -> bool {
        true
    }

    fn name(&self) -> &str {
        "always-enrich"
    }
}

/// Enriches nothing, reducing the scheme to plain CPDI2-on-grid transfer.
pub struct NeverEnrich;

impl EnrichmentCriterion for NeverEnrich {
    fn should_enrich(&self, _object: &ObjectState, _particle: usize) -> bool {
        false
    }

    fn name(&self) -> &str {
        "never-enrich"
    }
}

/// Enriches particles whose deformation Jacobian has dropped below a
/// threshold, confining corner degrees of freedom to regions approaching
/// degeneracy.
pub struct JacobianThreshold {
    pub min_jacobian: Scalar,
}

impl Default for JacobianThreshold {
    fn default() -> Self {
        Self { min_jacobian: 0.2 }
    }
}

impl EnrichmentCriterion for JacobianThreshold {
    fn should_enrich(&self, object: &ObjectState, particle: usize) -> bool {
        object.particles[particle]
            .deformation_gradient
            .determinant()
            < self.min_jacobian
    }

    fn name(&self) -> &str {
        "jacobian-threshold"
    }
}

/// Reclassifies all corners of `object` against `criterion`, returning the
/// number of enriched corners.
pub fn update_enrichment(object: &mut ObjectState, criterion: &dyn EnrichmentCriterion) -> usize {
    object.corner_enriched.fill(false);

    // Two passes: all decisions are made before any flag is written.
    let satisfied: Vec<usize> = (0..object.particle_count())
        .filter(|&p| criterion.should_enrich(object, p))
        .collect();

    for p in satisfied {
        for c in 0..CORNER_NUM {
            let corner = object.mesh.corner_index(p, c);
            object.corner_enriched[corner] = true;
        }
    }
    object.corner_enriched.iter().filter(|&&e| e).count()
}
