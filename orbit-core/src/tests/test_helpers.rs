//! Test helper utilities for orbit tests

use crate::runtime::{BodyState, Simulation};
use glam::Vec2;

/// Check if two f32 values are approximately equal within tolerance
pub fn approx_eq_f32(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// Check if two vectors are approximately equal component-wise
pub fn vec_approx_eq(a: Vec2, b: Vec2, tol: f32) -> bool {
    approx_eq_f32(a.x, b.x, tol) && approx_eq_f32(a.y, b.y, tol)
}

/// Panic if any body holds a NaN or infinite position or velocity
pub fn assert_finite(states: &[BodyState]) {
    for (i, state) in states.iter().enumerate() {
        assert!(state.pos.is_finite(), "body {} position {:?}", i, state.pos);
        assert!(state.vel.is_finite(), "body {} velocity {:?}", i, state.vel);
    }
}

/// Run `ticks` steps and return the final snapshot
pub fn run_ticks(sim: &mut Simulation, ticks: usize) -> Vec<BodyState> {
    for _ in 0..ticks {
        sim.tick();
    }
    sim.snapshot()
}
