use glam::Vec2;
use thiserror::Error;

/// Whether a body is moved by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mobility {
    /// Never moves; still attracts and deflects other bodies
    Fixed,
    Movable,
}

impl Mobility {
    pub fn is_movable(self) -> bool {
        matches!(self, Mobility::Movable)
    }
}

/// A point mass in the sandbox
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Also used as the collision and render radius
    pub mass: f32,
    pub mobility: Mobility,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, mass: f32, mobility: Mobility) -> Self {
        Self {
            pos,
            vel,
            mass,
            mobility,
        }
    }

    pub fn radius(&self) -> f32 {
        self.mass
    }

    pub fn is_movable(&self) -> bool {
        self.mobility.is_movable()
    }
}

/// Index of a body in its [`World`], valid until the next [`World::clear`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Rejected body input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("position ({x}, {y}) is not finite")]
    NonFinitePosition { x: f32, y: f32 },
    #[error("velocity ({x}, {y}) is not finite")]
    NonFiniteVelocity { x: f32, y: f32 },
    #[error("mass {0} must be finite and positive")]
    InvalidMass(f32),
}

/// Ordered body registry. Insertion order is render order.
#[derive(Debug, Default)]
pub struct World {
    bodies: Vec<Body>,
}

impl World {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// Append a body at the tail of the registry.
    /// Fixed bodies are always stored at rest.
    pub fn push(&mut self, mut body: Body) -> Result<BodyHandle, EngineError> {
        if !body.is_movable() {
            body.vel = Vec2::ZERO;
        }
        validate(&body)?;
        let handle = BodyHandle(self.bodies.len());
        self.bodies.push(body);
        Ok(handle)
    }

    /// Drop every body and release the storage
    pub fn clear(&mut self) {
        self.bodies = Vec::new();
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }
}

impl<'a> IntoIterator for &'a World {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate(body: &Body) -> Result<(), EngineError> {
    if !body.pos.is_finite() {
        return Err(EngineError::NonFinitePosition {
            x: body.pos.x,
            y: body.pos.y,
        });
    }
    if !body.vel.is_finite() {
        return Err(EngineError::NonFiniteVelocity {
            x: body.vel.x,
            y: body.vel.y,
        });
    }
    if !body.mass.is_finite() || body.mass <= 0.0 {
        return Err(EngineError::InvalidMass(body.mass));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_follow_insertion_order() {
        let mut world = World::new();
        let a = world
            .push(Body::new(Vec2::ZERO, Vec2::ZERO, 1.0, Mobility::Movable))
            .unwrap();
        let b = world
            .push(Body::new(Vec2::ONE, Vec2::ZERO, 2.0, Mobility::Fixed))
            .unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(world.get(b).map(|body| body.mass), Some(2.0));
    }

    #[test]
    fn rejects_non_finite_input() {
        let mut world = World::new();
        let nan_pos = Body::new(Vec2::new(f32::NAN, 0.0), Vec2::ZERO, 1.0, Mobility::Movable);
        let inf_vel = Body::new(Vec2::ZERO, Vec2::new(0.0, f32::INFINITY), 1.0, Mobility::Movable);
        let zero_mass = Body::new(Vec2::ZERO, Vec2::ZERO, 0.0, Mobility::Fixed);

        assert!(matches!(world.push(nan_pos), Err(EngineError::NonFinitePosition { .. })));
        assert!(matches!(world.push(inf_vel), Err(EngineError::NonFiniteVelocity { .. })));
        assert_eq!(world.push(zero_mass), Err(EngineError::InvalidMass(0.0)));
        assert!(world.is_empty());
    }

    #[test]
    fn fixed_bodies_are_stored_at_rest() {
        let mut world = World::new();
        let fixed = world
            .push(Body::new(Vec2::ZERO, Vec2::new(3.0, 0.0), 5.0, Mobility::Fixed))
            .unwrap();
        let movable = world
            .push(Body::new(Vec2::ONE, Vec2::new(3.0, 0.0), 5.0, Mobility::Movable))
            .unwrap();

        assert_eq!(world.get(fixed).unwrap().vel, Vec2::ZERO);
        assert_eq!(world.get(movable).unwrap().vel, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn clear_on_empty_world_is_fine() {
        let mut world = World::new();
        world.clear();
        world.clear();
        assert_eq!(world.len(), 0);
    }
}
