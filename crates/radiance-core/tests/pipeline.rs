//! Integration tests for the cast, merge and sample pipeline

// Tests are allowed to use expect/unwrap for cleaner error messages
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use radiance_core::prelude::*;

fn hierarchy(width: f32, height: f32) -> CascadeHierarchy {
    CascadeHierarchy::new(Vec2::new(width, height), CascadeConfig::default())
        .expect("default config should build")
}

fn lit_scene() -> (Scene, PointLight) {
    let scene = Scene::new()
        .with(circle(Vec2::new(160.0, 128.0), 16.0))
        .with(box2(Vec2::new(60.0, 220.0), Vec2::new(40.0, 8.0)));
    let light = PointLight::new(Vec2::new(64.0, 128.0), Vec3::new(1.0, 0.8, 0.6), 4.0);
    (scene, light)
}

#[test]
fn hd_topology_matches_cascade_rules() {
    let h = hierarchy(1280.0, 720.0);

    assert_eq!(h.cascade_count(), 4);
    let directions: Vec<u32> = h.layouts().iter().map(|l| l.directions).collect();
    assert_eq!(directions, [16, 64, 256, 1024]);
    let probes_x: Vec<u32> = (0..4).map(|i| h.cascade(i).unwrap().probe_count().x).collect();
    assert_eq!(probes_x, [40, 20, 10, 5]);

    for i in 1..h.cascade_count() {
        let prev = h.cascade(i - 1).unwrap().layout();
        let cur = h.cascade(i).unwrap().layout();
        assert_relative_eq!(cur.interval_start, prev.interval_start + prev.interval_length);
    }
}

#[test]
fn identical_inputs_build_identical_topology() {
    let a = hierarchy(1280.0, 720.0);
    let b = hierarchy(1280.0, 720.0);
    assert_eq!(a.layouts(), b.layouts());
}

#[test]
fn empty_scene_stays_dark() {
    let mut h = hierarchy(256.0, 256.0);
    let light = PointLight::new(Vec2::splat(128.0), Vec3::ONE, 10.0);

    let stats = h.update(&Scene::new(), &light);
    assert_eq!(stats.hits, 0);

    for probe in h.cascade(0).unwrap().probes() {
        assert_eq!(probe.irradiance(), Vec3::ZERO);
    }
    let map = h.irradiance_map(32, 32).unwrap();
    assert!(map.iter().all(|e| *e == Vec3::ZERO));
}

#[test]
fn unlit_scene_stays_dark() {
    let mut h = hierarchy(256.0, 256.0);
    let (scene, mut light) = lit_scene();
    light.intensity = 0.0;

    let stats = h.update(&scene, &light);
    assert!(stats.hits > 0);
    assert_eq!(h.sample_irradiance(Vec2::new(128.0, 128.0)), Vec3::ZERO);
}

#[test]
fn light_inside_a_solid_lights_nothing() {
    let mut h = hierarchy(256.0, 256.0);
    let scene = Scene::new().with(circle(Vec2::splat(128.0), 40.0));
    let light = PointLight::new(Vec2::splat(128.0), Vec3::ONE, 10.0);

    // Every visible surface faces away from the buried light
    let stats = h.update(&scene, &light);
    assert!(stats.hits > 0);
    let map = h.irradiance_map(32, 32).unwrap();
    assert!(map.iter().all(|e| *e == Vec3::ZERO));
}

#[test]
fn lit_surface_illuminates_nearby_points() {
    let mut h = hierarchy(256.0, 256.0);
    let (scene, light) = lit_scene();
    h.update(&scene, &light);

    // Between the light and the lit face of the circle
    let e = h.sample_irradiance(Vec2::new(128.0, 128.0));
    assert!(e.x > 0.0, "expected light near the lit face, got {e:?}");
    // Color of the light carries through
    assert!(e.x >= e.y && e.y >= e.z);
}

#[test]
fn irradiance_at_probe_is_its_average() {
    let mut h = hierarchy(256.0, 256.0);
    let (scene, light) = lit_scene();
    h.update(&scene, &light);

    let cascade = h.cascade(0).unwrap();
    for (x, y) in [(3, 3), (4, 4), (0, 7)] {
        let probe = cascade.probe(x, y).unwrap();
        let e = h.sample_irradiance(probe.position);
        let avg = probe.irradiance();
        assert_relative_eq!(e.x, avg.x, epsilon = 1e-5);
        assert_relative_eq!(e.y, avg.y, epsilon = 1e-5);
        assert_relative_eq!(e.z, avg.z, epsilon = 1e-5);
    }
}

#[test]
fn updates_replace_previous_results() {
    let (scene, light) = lit_scene();

    let mut once = hierarchy(256.0, 256.0);
    once.update(&scene, &light);

    let mut twice = hierarchy(256.0, 256.0);
    let dark = PointLight {
        intensity: 0.0,
        ..light
    };
    twice.update(&scene, &dark);
    twice.update(&scene, &light);

    assert_eq!(once.cascades(), twice.cascades());
}

#[test]
fn moving_the_light_changes_the_result() {
    let (scene, light) = lit_scene();
    let mut h = hierarchy(256.0, 256.0);
    h.update(&scene, &light);
    let before = h.cascade(0).unwrap().clone();

    let moved = PointLight {
        position: Vec2::new(220.0, 40.0),
        ..light
    };
    h.update(&scene, &moved);
    assert_ne!(h.cascade(0).unwrap(), &before);
}

#[test]
fn scene_node_and_scene_agree() {
    let (scene, light) = lit_scene();
    let node = circle(Vec2::new(160.0, 128.0), 16.0).union(box2(Vec2::new(60.0, 220.0), Vec2::new(40.0, 8.0)));

    let mut a = hierarchy(256.0, 256.0);
    let mut b = hierarchy(256.0, 256.0);
    a.update(&scene, &light);
    b.update(&node, &light);

    assert_eq!(a.cascades(), b.cascades());
}
