//! Tests for the pairwise collision and attraction rules

use glam::Vec2;
use orbit_core::engine::{Body, Mobility, World};
use orbit_core::resolver::{interact, resolve};
use orbit_core::tests::test_helpers::{approx_eq_f32, vec_approx_eq};
use orbit_core::{EngineConfig, SimulationMode};

fn movable(x: f32, y: f32, mass: f32, vel: Vec2) -> Body {
    Body::new(Vec2::new(x, y), vel, mass, Mobility::Movable)
}

fn fixed(x: f32, y: f32, mass: f32) -> Body {
    Body::new(Vec2::new(x, y), Vec2::ZERO, mass, Mobility::Fixed)
}

#[test]
fn test_collision_reflection_preserves_speed() {
    let config = EngineConfig::default();
    // Distance 10, sum of masses 10: touching counts as overlap
    let a = movable(0.0, 0.0, 5.0, Vec2::new(0.0, -1.0));
    let b = movable(6.0, -8.0, 5.0, Vec2::ZERO);

    let vel = interact(&a, a.vel, &b, &config);
    assert!(approx_eq_f32(vel.length(), 1.0, 1e-6));
    assert_ne!(vel, a.vel);
}

#[test]
fn test_head_on_collision_reverses_normal_velocity() {
    let config = EngineConfig::default();
    let a = movable(0.0, 0.0, 5.0, Vec2::new(0.0, -1.0));
    let b = fixed(0.0, -8.0, 5.0);

    let vel = interact(&a, a.vel, &b, &config);
    assert!(vec_approx_eq(vel, Vec2::new(0.0, 1.0), 1e-6));
}

#[test]
fn test_bounce_coefficient_scales_rebound() {
    let mut config = EngineConfig::default();
    config.set_bounce_coefficient(0.5);
    let a = movable(0.0, 0.0, 5.0, Vec2::new(0.0, -2.0));
    let b = fixed(0.0, -8.0, 5.0);

    let vel = interact(&a, a.vel, &b, &config);
    assert!(vec_approx_eq(vel, Vec2::new(0.0, 1.0), 1e-6));

    config.set_bounce_coefficient(0.0);
    let vel = interact(&a, a.vel, &b, &config);
    assert!(vec_approx_eq(vel, Vec2::ZERO, 1e-6));
}

#[test]
fn test_attraction_points_toward_other_body() {
    let config = EngineConfig::default();
    let a = movable(0.0, 0.0, 1.0, Vec2::ZERO);
    let b = fixed(30.0, 40.0, 2.0);

    let vel = interact(&a, a.vel, &b, &config);

    // |dv| = m_b / r^2 = 2 / 2500, along (0.6, 0.8)
    let expected = Vec2::new(0.6, 0.8) * (2.0 / 2500.0);
    assert!(vec_approx_eq(vel, expected, 1e-7));
}

#[test]
fn test_attraction_ignores_subject_mass() {
    let config = EngineConfig::default();
    let light = movable(0.0, 0.0, 1.0, Vec2::ZERO);
    let heavy = movable(0.0, 0.0, 9.0, Vec2::ZERO);
    let b = fixed(100.0, 0.0, 20.0);

    let v_light = interact(&light, light.vel, &b, &config);
    let v_heavy = interact(&heavy, heavy.vel, &b, &config);
    assert!(vec_approx_eq(v_light, v_heavy, 1e-7));
}

#[test]
fn test_resolve_leaves_fixed_bodies_and_positions_alone() {
    let config = EngineConfig::default();
    let mut world = World::new();
    world.push(movable(100.0, 100.0, 5.0, Vec2::ZERO)).unwrap();
    world.push(fixed(300.0, 100.0, 50.0)).unwrap();

    resolve(&mut world, &config);

    let bodies = world.bodies();
    assert_eq!(bodies[0].pos, Vec2::new(100.0, 100.0));
    assert!(bodies[0].vel.x > 0.0);
    assert_eq!(bodies[1].pos, Vec2::new(300.0, 100.0));
    assert_eq!(bodies[1].vel, Vec2::ZERO);
}

#[test]
fn test_resolve_collision_only_mode() {
    let mut config = EngineConfig::default();
    config.mode = SimulationMode::CollisionOnly;
    let mut world = World::new();
    world.push(movable(0.0, 0.0, 5.0, Vec2::new(1.0, 0.0))).unwrap();
    world.push(fixed(200.0, 0.0, 5.0)).unwrap();

    resolve(&mut world, &config);
    assert_eq!(world.bodies()[0].vel, Vec2::new(1.0, 0.0));
}

#[test]
fn test_coincident_bodies_do_not_produce_nan() {
    let config = EngineConfig::default();
    let mut world = World::new();
    world.push(movable(50.0, 50.0, 3.0, Vec2::new(0.5, 0.5))).unwrap();
    world.push(movable(50.0, 50.0, 3.0, Vec2::ZERO)).unwrap();

    resolve(&mut world, &config);

    for body in world.iter() {
        assert!(body.vel.is_finite());
    }
    assert_eq!(world.bodies()[0].vel, Vec2::new(0.5, 0.5));
}
