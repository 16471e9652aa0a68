pub mod simulation;
pub mod configuration;
pub mod error;
#[cfg(feature = "viewer")]
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Particle, ParticleState, StateView, NVec2};
pub use simulation::forces::{Acceleration, AccelSet, NBodyGravity, FixedHeadChain, Softening};
pub use simulation::integrator::symplectic_euler;
pub use simulation::params::{Parameters, FiniteCheck};
pub use simulation::scenario::{Scenario, NBodyScenario, ChainScenario, BodySpec, ThreeBodySetup, Appearance};
pub use simulation::engine::SimulationLoop;

pub use configuration::config::{ScenarioConfig, EngineConfig, ModelConfig, ThreeBodyConfig, NBodyConfig, BodyConfig, ChainConfig};

pub use error::{ConfigError, SimulationError};

#[cfg(feature = "viewer")]
pub use visualization::viewer2d::run_2d;

pub use benchmark::benchmark::bench_force_pass;
