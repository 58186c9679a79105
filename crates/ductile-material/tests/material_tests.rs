//! Integration tests for ductile-material.

use ductile_material::{ConstitutiveModel, ElasticProperties, LinearElastic, NeoHookean};
use ductile_types::Matrix;

const TOL: f32 = 1.0e-5;

fn max_abs(m: &Matrix) -> f32 {
    m.x_axis
        .abs()
        .max(m.y_axis.abs())
        .max_element()
}

// ─── Rest state ───────────────────────────────────────────────

#[test]
fn neo_hookean_stress_free_at_rest() {
    let model = NeoHookean::new(1000.0, 500.0);
    let stress = model.cauchy_stress(&Matrix::IDENTITY);
    assert!(max_abs(&stress) < TOL);
}

#[test]
fn linear_stress_free_at_rest() {
    let model = LinearElastic::new(1000.0, 500.0);
    let stress = model.cauchy_stress(&Matrix::IDENTITY);
    assert!(max_abs(&stress) < TOL);
}

// ─── Compression / tension signs ──────────────────────────────

#[test]
fn neo_hookean_compression_pushes_back() {
    let model = NeoHookean::new(1000.0, 500.0);
    // Uniform 20% compression.
    let f = Matrix::IDENTITY * 0.8;
    let stress = model.cauchy_stress(&f);
    // Compressive state => negative pressure on the diagonal.
    assert!(stress.x_axis.x < 0.0);
    assert!(stress.y_axis.y < 0.0);
}

#[test]
fn neo_hookean_tension_pulls_in() {
    let model = NeoHookean::new(1000.0, 500.0);
    let f = Matrix::IDENTITY * 1.2;
    let stress = model.cauchy_stress(&f);
    assert!(stress.x_axis.x > 0.0);
    assert!(stress.y_axis.y > 0.0);
}

#[test]
fn linear_uniaxial_stretch_sign() {
    let model = LinearElastic::new(1000.0, 500.0);
    let f = Matrix::from_cols([1.1, 0.0].into(), [0.0, 1.0].into());
    let stress = model.cauchy_stress(&f);
    assert!(stress.x_axis.x > 0.0);
}

// ─── Agreement in the small-strain limit ──────────────────────

#[test]
fn models_agree_for_small_strain() {
    let props = ElasticProperties::soft_rubber();
    let nh = NeoHookean::from_properties(&props);
    let lin = LinearElastic::from_properties(&props);

    let f = Matrix::from_cols([1.001, 0.0005].into(), [0.0005, 0.999].into());
    let diff = nh.cauchy_stress(&f) - lin.cauchy_stress(&f);
    let scale = max_abs(&lin.cauchy_stress(&f)).max(1.0);
    assert!(max_abs(&diff) / scale < 0.05);
}

// ─── Properties ───────────────────────────────────────────────

#[test]
fn lame_conversions() {
    let props = ElasticProperties {
        name: "test".into(),
        youngs_modulus: 1.0e5,
        poisson_ratio: 0.25,
        density: 1000.0,
    };
    // E = 1e5, nu = 0.25 => mu = 4e4, lambda = 4e4.
    assert!((props.lame_mu() - 4.0e4).abs() < 1.0);
    assert!((props.lame_lambda() - 4.0e4).abs() < 1.0);
}

#[test]
fn model_names() {
    assert_eq!(NeoHookean::new(1.0, 1.0).name(), "neo_hookean");
    assert_eq!(LinearElastic::new(1.0, 1.0).name(), "linear_elastic");
}
