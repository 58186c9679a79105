//! Integration tests for ductile-mesh.

use ductile_mesh::DomainMesh;
use ductile_types::{Vector, CORNER_NUM};

/// Two unit quads side by side, sharing their middle edge.
fn two_adjacent_domains() -> Vec<[Vector; CORNER_NUM]> {
    vec![
        [
            Vector::new(0.0, 0.0),
            Vector::new(1.0, 0.0),
            Vector::new(1.0, 1.0),
            Vector::new(0.0, 1.0),
        ],
        [
            Vector::new(1.0, 0.0),
            Vector::new(2.0, 0.0),
            Vector::new(2.0, 1.0),
            Vector::new(1.0, 1.0),
        ],
    ]
}

// ─── Construction / welding ───────────────────────────────────

#[test]
fn single_domain_has_four_vertices() {
    let domains = vec![[
        Vector::new(0.0, 0.0),
        Vector::new(1.0, 0.0),
        Vector::new(1.0, 1.0),
        Vector::new(0.0, 1.0),
    ]];
    let mesh = DomainMesh::from_particle_domains(&domains).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.element_count(), 1);
}

#[test]
fn shared_corners_are_welded() {
    let mesh = DomainMesh::from_particle_domains(&two_adjacent_domains()).unwrap();
    // 4 + 4 corners, 2 shared along the common edge.
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.element_count(), 2);

    // The shared edge maps both particles to the same global vertices.
    assert_eq!(mesh.corner_index(0, 1), mesh.corner_index(1, 0));
    assert_eq!(mesh.corner_index(0, 2), mesh.corner_index(1, 3));
}

#[test]
fn nearby_but_unequal_corners_are_not_welded() {
    let mut domains = two_adjacent_domains();
    domains[1][0].x += 1.0e-6; // close, but not bit-identical
    let mesh = DomainMesh::from_particle_domains(&domains).unwrap();
    assert_eq!(mesh.vertex_count(), 7);
}

#[test]
fn connectivity_round_trip() {
    let domains = two_adjacent_domains();
    let mesh = DomainMesh::from_particle_domains(&domains).unwrap();
    for (p, domain) in domains.iter().enumerate() {
        for (c, corner) in domain.iter().enumerate() {
            assert_eq!(mesh.vertex(mesh.corner_index(p, c)), *corner);
        }
    }
}

// ─── Accessors ────────────────────────────────────────────────

#[test]
fn set_vertex_moves_all_sharing_particles() {
    let mut mesh = DomainMesh::from_particle_domains(&two_adjacent_domains()).unwrap();
    let shared = mesh.corner_index(0, 1);
    mesh.set_vertex(shared, Vector::new(1.5, -0.5));
    assert_eq!(mesh.vertex(mesh.corner_index(1, 0)), Vector::new(1.5, -0.5));
}

#[test]
fn vertex_particles_adjacency() {
    let mesh = DomainMesh::from_particle_domains(&two_adjacent_domains()).unwrap();
    let adjacency = mesh.vertex_particles();
    let shared = mesh.corner_index(0, 1);
    assert_eq!(adjacency[shared], vec![0, 1]);
    // An unshared corner belongs to exactly one particle.
    let lone = mesh.corner_index(0, 0);
    assert_eq!(adjacency[lone], vec![0]);
}

// ─── Validation ───────────────────────────────────────────────

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = DomainMesh::from_particle_domains(&two_adjacent_domains()).unwrap();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = DomainMesh::from_particle_domains(&two_adjacent_domains()).unwrap();
    mesh.indices[3] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_ragged_connectivity() {
    let mut mesh = DomainMesh::from_particle_domains(&two_adjacent_domains()).unwrap();
    mesh.indices.pop();
    assert!(mesh.validate().is_err());
}
