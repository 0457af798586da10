//! Pairwise interaction between bodies
//!
//! For an ordered pair `(a, b)` only `a` is affected, so the full
//! interaction needs both orderings. Overlapping pairs collide, separated
//! pairs attract (unless the mode is collision-only).

use crate::config::EngineConfig;
use crate::engine::{Body, World};
use glam::Vec2;

/// Compute the new velocity of `subject` after interacting with `other`.
///
/// `vel` is the subject's velocity so far this step; earlier pairs may
/// already have changed it. Degenerate pairs return `vel` unchanged.
pub fn interact(subject: &Body, vel: Vec2, other: &Body, config: &EngineConfig) -> Vec2 {
    let d = other.pos - subject.pos;
    let distance = d.length();

    if distance == 0.0 || !distance.is_finite() {
        log::trace!("skipping coincident pair at ({}, {})", subject.pos.x, subject.pos.y);
        return vel;
    }

    let next = if subject.radius() + other.radius() >= distance {
        reflect(vel, d / distance, config.bounce_coefficient())
    } else if config.mode.attracts() {
        vel + attraction(subject.mass, other.mass, d, distance)
    } else {
        return vel;
    };

    if next.is_finite() {
        next
    } else {
        log::warn!("discarding non-finite velocity from pair interaction");
        vel
    }
}

/// Flip the normal component of `vel`, scaled by `bounce`.
/// The tangential component is kept as is.
fn reflect(vel: Vec2, normal: Vec2, bounce: f32) -> Vec2 {
    let v_n = vel.dot(normal) * normal;
    let v_t = vel - v_n;
    v_t - v_n * bounce
}

/// Velocity change from gravitational pull toward `other`
fn attraction(mass: f32, other_mass: f32, d: Vec2, distance: f32) -> Vec2 {
    let force = (mass * other_mass) / (distance * distance);
    let accel = force / mass;

    let angle = d.y.atan2(d.x);
    Vec2::new(accel * angle.cos(), accel * angle.sin())
}

/// Update the velocity of every movable body from all other bodies.
/// Positions are not touched.
pub fn resolve(world: &mut World, config: &EngineConfig) {
    let bodies = world.bodies_mut();
    let n = bodies.len();

    for i in 0..n {
        if !bodies[i].is_movable() {
            continue;
        }

        let mut vel = bodies[i].vel;
        for j in 0..n {
            if i == j {
                continue;
            }
            vel = interact(&bodies[i], vel, &bodies[j], config);
        }
        bodies[i].vel = vel;
    }
}
