use crate::engine::World;

/// Advance every movable body by its velocity (explicit Euler, one frame)
pub fn step(world: &mut World) {
    for body in world.bodies_mut().iter_mut().filter(|b| b.is_movable()) {
        body.pos += body.vel;
    }
}
