//! Integration tests for the plotting pipeline
//!
//! These tests drive the full text-to-segments pipeline:
//! 1. Expressions compile and sample over the default domain
//! 2. Poles split curves into separate runs
//! 3. Every sample gets a ray to the north pole
//! 4. The scene resets and overlays plots the way the viewer uses it

use riemann_core::projection::{NORTH_POLE, RAY_PLANE_Z, SPHERE_CENTER};
use riemann_core::{
    graph, split_polyline, Color, CompiledFunction, Plot, PlotError, PlotScene, SampleDomain,
    SceneLayers, SceneSettings, Vec3,
};

const RED: u32 = 0xff0000;
const ORANGE: u32 = 0xff8800;
const PINK: u32 = 0xff0088;

// ==================== Sampling Pipeline ====================

#[test]
fn test_reciprocal_over_default_domain() {
    let f = CompiledFunction::compile("1 / x").unwrap();
    let samples = graph(|x| f.call(x), &SampleDomain::default()).unwrap();
    let runs = split_polyline(&samples);

    assert_eq!(samples.len(), 6400);
    assert_eq!(runs.len(), 2, "1/x has one pole, so two branches");
    assert!(runs[0].iter().all(|s| s.x < 0.0));
    assert!(runs[1].iter().all(|s| s.x > 0.0));
    assert_eq!(runs[0].len() + runs[1].len(), 6400);
}

#[test]
fn test_log_only_draws_where_defined() {
    let f = CompiledFunction::compile("ln(x)").unwrap();
    let samples = graph(|x| f.call(x), &SampleDomain::new(4.0, 0.5)).unwrap();
    let runs = split_polyline(&samples);

    assert_eq!(runs.len(), 1);
    assert!(runs[0].iter().all(|s| s.x > 0.0 && s.y.is_finite()));
}

#[test]
fn test_polynomial_still_breaks_at_origin() {
    // The plane curve is always split at x = 0, even for continuous input
    let f = CompiledFunction::compile("x^2").unwrap();
    let samples = graph(|x| f.call(x), &SampleDomain::new(1.0, 0.25)).unwrap();
    assert_eq!(split_polyline(&samples).len(), 2);
}

#[test]
fn test_huge_values_never_reach_vertices() {
    // 32^30 fits in f64 but not in f32
    let settings = SceneSettings {
        domain: SampleDomain::new(32.0, 0.5),
        ..SceneSettings::default()
    };
    let plot = Plot::build("x^30", Color::WHITE, &settings).unwrap();

    let finite = |v: Vec3| v.x.is_finite() && v.y.is_finite() && v.z.is_finite();
    let mut segments = plot.curve.iter().chain(&plot.rays).chain(&plot.trace);
    assert!(segments.all(|s| finite(s.a) && finite(s.b)));
    assert!(plot.rays.len() < plot.sample_count);
    assert!(!plot.curve.is_empty());
}

// ==================== Scene Behaviour ====================

fn scene() -> PlotScene {
    PlotScene::new(SceneSettings {
        domain: SampleDomain::new(4.0, 0.1),
        ..SceneSettings::default()
    })
    .expect("valid settings")
}

#[test]
fn test_first_slot_replaces_and_others_overlay() {
    let mut scene = scene();

    // Slot 1 resets then draws
    scene.init();
    scene.draw("1 / x", Color::from_hex(RED)).unwrap();

    // Slots 2 and 3 overlay
    scene.draw("x", Color::from_hex(ORANGE)).unwrap();
    scene.draw("-x", Color::from_hex(PINK)).unwrap();
    assert_eq!(scene.plot_count(), 3);

    // Slot 1 again: only its plot remains
    scene.init();
    scene.draw("sin(x)", Color::from_hex(RED)).unwrap();
    assert_eq!(scene.plot_count(), 1);

    let (_, plot) = scene.plots().next().unwrap();
    assert_eq!(plot.source, "sin(x)");
    assert_eq!(plot.color, Color::from_hex(RED));
}

#[test]
fn test_bad_expression_reports_position() {
    let mut scene = scene();
    let err = scene.draw("2 * y", Color::WHITE).unwrap_err();
    match err {
        PlotError::Expr(e) => assert!(e.to_string().contains("'y' at 4")),
        other => panic!("Expected expression error, got {:?}", other),
    }
    assert_eq!(scene.plot_count(), 0);
}

#[test]
fn test_rays_converge_on_north_pole() {
    let mut scene = scene();
    let key = scene.draw("x / 2", Color::WHITE).unwrap();
    let plot = scene.plot(key).unwrap();

    assert_eq!(plot.rays.len(), plot.sample_count);
    for ray in &plot.rays {
        assert_eq!(ray.b, NORTH_POLE);
        assert_eq!(ray.a.z, RAY_PLANE_Z);
    }
}

#[test]
fn test_each_sample_pairs_curve_and_ray() {
    let mut scene = scene();
    let key = scene.draw("x", Color::WHITE).unwrap();
    let plot = scene.plot(key).unwrap();

    // Every interior curve vertex is the plane end of some ray
    for segment in &plot.curve {
        let lifted = Vec3::new(segment.b.x, segment.b.y, RAY_PLANE_Z);
        assert!(plot.rays.iter().any(|r| r.a == lifted));
    }
}

#[test]
fn test_trace_lies_on_sphere() {
    let mut scene = scene();
    scene.toggle_layer(SceneLayers::TRACES);
    let key = scene.draw("1 / x", Color::WHITE).unwrap();

    for segment in &scene.plot(key).unwrap().trace {
        assert!(((segment.a - SPHERE_CENTER).length() - 1.0).abs() < 1e-4);
        assert!(((segment.b - SPHERE_CENTER).length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn test_hidden_layers_do_not_render() {
    let mut scene = scene();
    scene.draw("x", Color::from_hex(RED)).unwrap();
    scene.set_layers(SceneLayers::SPHERE);

    let red = Color::from_hex(RED);
    assert!(scene.segments().all(|s| s.color != red));
}
