//! Simulation loop and host-facing control surface
//!
//! `SimulationLoop` owns the particle state, the force model and the pause
//! flag. Each substep is a full force pass over every particle followed by
//! one integration pass; the next force pass only starts once the previous
//! integration has finished, so nothing ever reads a stale snapshot.

use crate::configuration::config::ScenarioConfig;
use crate::error::{ConfigError, SimulationError};
use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::symplectic_euler;
use crate::simulation::params::{FiniteCheck, Parameters};
use crate::simulation::scenario::{Appearance, Scenario};
use crate::simulation::states::{NVec2, ParticleState};

pub struct SimulationLoop {
    scenario: Scenario,
    parameters: Parameters,
    forces: AccelSet,
    appearance: Appearance,
    state: ParticleState,
    paused: bool,
    steps: u64, // substeps since the last initialize
}

impl SimulationLoop {
    /// Validate `scenario` and `parameters`, then initialize the state.
    /// Nothing is stepped if this fails.
    pub fn new(scenario: Scenario, parameters: Parameters) -> Result<Self, ConfigError> {
        scenario.validate()?;
        if !(parameters.h > 0.0 && parameters.h.is_finite()) {
            return Err(ConfigError::InvalidTimeStep(parameters.h));
        }
        if parameters.substeps == 0 {
            return Err(ConfigError::ZeroSubsteps);
        }

        let forces = scenario.force_model();
        let appearance = scenario.appearance();

        let mut sim = Self {
            scenario,
            parameters,
            forces,
            appearance,
            state: ParticleState::from_particles(&[]),
            paused: false,
            steps: 0,
        };
        sim.initialize();
        Ok(sim)
    }

    /// Build with the step settings the scenario preset was tuned for
    pub fn with_preset_parameters(scenario: Scenario) -> Result<Self, ConfigError> {
        let parameters = scenario.preset_parameters();
        Self::new(scenario, parameters)
    }

    /// Build from a YAML-facing configuration
    pub fn from_config(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let (scenario, parameters) = cfg.build_scenario();
        Self::new(scenario, parameters)
    }

    /// Load the scenario's initial condition and unpause
    pub fn initialize(&mut self) {
        self.state = self.scenario.initial_state();
        self.paused = false;
        self.steps = 0;
        log::info!(
            "initialized {} scenario with {} particles (dt = {:e})",
            self.scenario.name(),
            self.state.len(),
            self.parameters.dt()
        );
    }

    /// Same as [`initialize`](Self::initialize); legal at any time
    pub fn reset(&mut self) {
        self.initialize();
    }

    /// Run `substeps` force/integrate pairs unless paused.
    ///
    /// With [`FiniteCheck::Strict`] the state is checked after every
    /// substep and the first non-finite particle stops the batch.
    pub fn advance(&mut self, substeps: u32) -> Result<(), SimulationError> {
        if self.paused {
            return Ok(());
        }

        let dt = self.parameters.dt();
        for _ in 0..substeps {
            self.substep(dt);
            self.steps += 1;

            if self.parameters.finite_check == FiniteCheck::Strict {
                if let Some(index) = self.state.first_non_finite() {
                    log::warn!("particle {} diverged at substep {}", index, self.steps);
                    return Err(SimulationError::NonFinite { index, step: self.steps });
                }
            }
        }
        Ok(())
    }

    /// One displayed frame: the configured number of substeps
    pub fn advance_frame(&mut self) -> Result<(), SimulationError> {
        self.advance(self.parameters.substeps)?;
        log::debug!("t = {:.6}, substeps = {}", self.state.t, self.steps);
        Ok(())
    }

    fn substep(&mut self, dt: f64) {
        let t = self.state.t;
        let (view, out) = self.state.split_for_forces();
        self.forces.accumulate_accels(t, &view, out);
        symplectic_euler(&mut self.state, dt);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current positions, anchor included
    pub fn positions(&self) -> &[NVec2] {
        &self.state.x
    }

    pub fn velocities(&self) -> &[NVec2] {
        &self.state.v
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    pub fn time(&self) -> f64 {
        self.state.t
    }
}
