pub mod config;
pub mod engine;
pub mod integrator;
pub mod resolver;
pub mod runtime;

pub use config::{EngineConfig, ModeParseError, SimulationMode};
pub use engine::{Body, BodyHandle, EngineError, Mobility, World};
pub use runtime::{proximity_pairs, BodyState, Command, Flow, Simulation};

// Test helpers module (public for integration tests)
pub mod tests;
