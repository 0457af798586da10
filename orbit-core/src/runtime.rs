use crate::config::{clamp_mass, EngineConfig, SimulationMode};
use crate::engine::{Body, BodyHandle, EngineError, Mobility, World};
use crate::integrator::step;
use crate::resolver::resolve;
use glam::Vec2;

/// Read-only view of a body, handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub pos: Vec2,
    pub vel: Vec2,
    pub mass: f32,
    pub mobility: Mobility,
}

impl BodyState {
    /// End point of the direction line drawn from the body centre
    pub fn velocity_indicator(&self, scale: f32) -> Vec2 {
        self.pos + self.vel * self.mass * scale
    }
}

impl From<&Body> for BodyState {
    fn from(body: &Body) -> Self {
        Self {
            pos: body.pos,
            vel: body.vel,
            mass: body.mass,
            mobility: body.mobility,
        }
    }
}

/// Discrete requests from the input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Spawn { pos: Vec2, mobility: Mobility },
    /// Change the spawn mass by this many steps
    AdjustMass(i32),
    /// Change the bounce coefficient by this many steps
    AdjustBounce(i32),
    SetMode(SimulationMode),
    Clear,
    Quit,
}

/// What the frame driver should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The sandbox: owns every body and the engine settings
#[derive(Debug, Default)]
pub struct Simulation {
    pub world: World,
    pub config: EngineConfig,
    pub tick_count: u64,
}

impl Simulation {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            world: World::new(),
            config,
            tick_count: 0,
        }
    }

    /// Add a body with the current default spawn mass
    pub fn spawn(&mut self, pos: Vec2, mobility: Mobility) -> Result<BodyHandle, EngineError> {
        self.spawn_with_mass(pos, mobility, self.config.default_spawn_mass())
    }

    /// Add a body with an explicit mass (clamped to the spawnable range)
    pub fn spawn_with_mass(
        &mut self,
        pos: Vec2,
        mobility: Mobility,
        mass: f32,
    ) -> Result<BodyHandle, EngineError> {
        if !mass.is_finite() {
            return Err(EngineError::InvalidMass(mass));
        }
        let vel = match mobility {
            Mobility::Movable => self.config.spawn_velocity,
            Mobility::Fixed => Vec2::ZERO,
        };

        let handle = self
            .world
            .push(Body::new(pos, vel, clamp_mass(mass), mobility))?;
        log::debug!(
            "spawned {:?} body #{} at ({}, {})",
            mobility,
            handle.index(),
            pos.x,
            pos.y
        );
        Ok(handle)
    }

    pub fn clear(&mut self) {
        log::debug!("clearing {} bodies", self.world.len());
        self.world.clear();
    }

    pub fn set_default_spawn_mass(&mut self, value: f32) {
        self.config.set_default_spawn_mass(value);
    }

    pub fn set_bounce_coefficient(&mut self, value: f32) {
        self.config.set_bounce_coefficient(value);
    }

    pub fn set_mode(&mut self, mode: SimulationMode) {
        log::debug!("simulation mode set to {}", mode);
        self.config.mode = mode;
    }

    /// Advance one frame: all velocity updates, then all position updates
    pub fn tick(&mut self) {
        resolve(&mut self.world, &self.config);
        step(&mut self.world);
        self.tick_count += 1;
    }

    pub fn snapshot(&self) -> Vec<BodyState> {
        self.world.iter().map(BodyState::from).collect()
    }

    /// Execute an input command
    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Spawn { pos, mobility } => {
                if let Err(e) = self.spawn(pos, mobility) {
                    log::warn!("spawn rejected: {}", e);
                }
            }
            Command::AdjustMass(steps) => self.config.adjust_spawn_mass(steps),
            Command::AdjustBounce(steps) => self.config.adjust_bounce(steps),
            Command::SetMode(mode) => self.set_mode(mode),
            Command::Clear => self.clear(),
            Command::Quit => return Flow::Exit,
        }
        Flow::Continue
    }
}

/// Index pairs `(i, j)`, `i < j`, whose centres are within
/// `(mass_i + mass_j) * factor` of each other
pub fn proximity_pairs(states: &[BodyState], factor: f32) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in states.iter().enumerate() {
        for (j, b) in states.iter().enumerate().skip(i + 1) {
            if a.pos.distance(b.pos) <= (a.mass + b.mass) * factor {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
