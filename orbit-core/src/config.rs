//! Engine configuration
//!
//! Holds the values the input layer tweaks at runtime (spawn mass and
//! bounce strength) and the interaction mode. Every setter clamps, so an
//! out-of-range request is never an error.

use glam::Vec2;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Smallest mass a spawned body may have
pub const MIN_SPAWN_MASS: f32 = 1.0;
/// Smallest bounce coefficient (fully absorbing collisions)
pub const MIN_BOUNCE: f32 = 0.0;

/// Spawn mass change per wheel notch or key press
pub const MASS_STEP: f32 = 2.0;
/// Bounce change per key press
pub const BOUNCE_STEP: f32 = 0.5;

pub const DEFAULT_SPAWN_MASS: f32 = 7.0;
pub const DEFAULT_BOUNCE: f32 = 1.0;

/// Which interactions are evaluated for each pair of bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationMode {
    /// Collide when overlapping, attract otherwise
    #[default]
    Orbit,
    /// Collide when overlapping, ignore separated pairs
    CollisionOnly,
}

impl SimulationMode {
    pub fn attracts(self) -> bool {
        matches!(self, SimulationMode::Orbit)
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            SimulationMode::Orbit => SimulationMode::CollisionOnly,
            SimulationMode::CollisionOnly => SimulationMode::Orbit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown simulation mode '{0}' (expected 'orbit' or 'collision')")]
pub struct ModeParseError(pub String);

impl FromStr for SimulationMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orbit" => Ok(SimulationMode::Orbit),
            "collision" | "collision-only" => Ok(SimulationMode::CollisionOnly),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationMode::Orbit => write!(f, "orbit"),
            SimulationMode::CollisionOnly => write!(f, "collision"),
        }
    }
}

/// Mutable engine settings owned by a [`crate::Simulation`]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    default_spawn_mass: f32,
    bounce_coefficient: f32,
    /// Starting velocity of newly spawned movable bodies
    pub spawn_velocity: Vec2,
    pub mode: SimulationMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::orbit()
    }
}

impl EngineConfig {
    /// Gravity and collisions, bodies spawn at rest
    pub fn orbit() -> Self {
        Self {
            default_spawn_mass: DEFAULT_SPAWN_MASS,
            bounce_coefficient: DEFAULT_BOUNCE,
            spawn_velocity: Vec2::ZERO,
            mode: SimulationMode::Orbit,
        }
    }

    /// Collisions only, bodies spawn with an upward impulse
    pub fn collision() -> Self {
        Self {
            default_spawn_mass: DEFAULT_SPAWN_MASS,
            bounce_coefficient: DEFAULT_BOUNCE,
            spawn_velocity: Vec2::new(0.0, -1.0),
            mode: SimulationMode::CollisionOnly,
        }
    }

    /// Preset matching `mode`
    pub fn for_mode(mode: SimulationMode) -> Self {
        match mode {
            SimulationMode::Orbit => Self::orbit(),
            SimulationMode::CollisionOnly => Self::collision(),
        }
    }

    pub fn default_spawn_mass(&self) -> f32 {
        self.default_spawn_mass
    }

    pub fn bounce_coefficient(&self) -> f32 {
        self.bounce_coefficient
    }

    pub fn set_default_spawn_mass(&mut self, value: f32) {
        if !value.is_finite() {
            log::warn!("ignoring non-finite spawn mass {}", value);
            return;
        }
        self.default_spawn_mass = clamp_mass(value);
        log::debug!("spawn mass set to {}", self.default_spawn_mass);
    }

    pub fn set_bounce_coefficient(&mut self, value: f32) {
        if !value.is_finite() {
            log::warn!("ignoring non-finite bounce coefficient {}", value);
            return;
        }
        self.bounce_coefficient = value.max(MIN_BOUNCE);
        log::debug!("bounce coefficient set to {}", self.bounce_coefficient);
    }

    /// Move the spawn mass by `steps` increments of [`MASS_STEP`]
    pub fn adjust_spawn_mass(&mut self, steps: i32) {
        self.set_default_spawn_mass(self.default_spawn_mass + steps as f32 * MASS_STEP);
    }

    /// Move the bounce coefficient by `steps` increments of [`BOUNCE_STEP`]
    pub fn adjust_bounce(&mut self, steps: i32) {
        self.set_bounce_coefficient(self.bounce_coefficient + steps as f32 * BOUNCE_STEP);
    }
}

/// Raise a finite mass to the spawnable floor
pub fn clamp_mass(value: f32) -> f32 {
    value.max(MIN_SPAWN_MASS)
}
